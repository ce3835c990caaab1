//! `From` implementations bridging `tremor_config` sections to runtime configs.

use std::time::Duration;

use crate::config::{HoldCfg, TapCfg, TraceCfg};

impl From<&tremor_config::HoldCfg> for HoldCfg {
    fn from(c: &tremor_config::HoldCfg) -> Self {
        Self {
            duration_s: c.duration_s,
            tick: Duration::from_millis(c.tick_ms),
            samples_per_tick: c.samples_per_tick,
        }
    }
}

impl From<&tremor_config::TapCfg> for TapCfg {
    fn from(c: &tremor_config::TapCfg) -> Self {
        Self {
            duration_s: c.duration_s,
            tick: Duration::from_millis(c.tick_ms),
            ideal_gap_ms: c.ideal_gap_ms,
            rhythm_min_taps: c.rhythm_min_taps,
            fatigue_min_taps: c.fatigue_min_taps,
            fatigue_window: c.fatigue_window,
            chart_bars: c.chart_bars,
        }
    }
}

impl From<&tremor_config::TraceCfg> for TraceCfg {
    fn from(c: &tremor_config::TraceCfg) -> Self {
        Self {
            target_y: c.target_y,
            min_points: c.min_points,
            ..TraceCfg::default()
        }
    }
}
