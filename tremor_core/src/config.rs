//! Runtime configuration for the mini-tests.
//!
//! These are the structs the kernel consumes. They are separate from the
//! TOML-deserialized sections in `tremor_config`; see `conversions`.

use std::time::Duration;

/// Steady-hold test parameters.
#[derive(Debug, Clone)]
pub struct HoldCfg {
    /// Run length in ticks.
    pub duration_s: u32,
    /// Tick period.
    pub tick: Duration,
    /// Motion samples captured on every tick.
    pub samples_per_tick: usize,
}

impl Default for HoldCfg {
    fn default() -> Self {
        Self {
            duration_s: 10,
            tick: Duration::from_secs(1),
            samples_per_tick: 4,
        }
    }
}

/// Rapid-tap test parameters.
#[derive(Debug, Clone)]
pub struct TapCfg {
    pub duration_s: u32,
    pub tick: Duration,
    /// Ideal inter-tap interval; 10 ms of deviation costs one rhythm point.
    pub ideal_gap_ms: f64,
    /// Taps required before a rhythm score is reported.
    pub rhythm_min_taps: usize,
    /// Taps required before a fatigue index is reported.
    pub fatigue_min_taps: usize,
    /// Gaps averaged at each end of the run for the fatigue index.
    pub fatigue_window: usize,
    /// Number of most recent gaps in the gap chart.
    pub chart_bars: usize,
}

impl Default for TapCfg {
    fn default() -> Self {
        Self {
            duration_s: 15,
            tick: Duration::from_secs(1),
            ideal_gap_ms: 500.0,
            rhythm_min_taps: 3,
            fatigue_min_taps: 6,
            fatigue_window: 3,
            chart_bars: 20,
        }
    }
}

/// Line-trace parameters.
#[derive(Debug, Clone)]
pub struct TraceCfg {
    /// y of the horizontal reference line, in surface pixels.
    pub target_y: f64,
    /// Fewer captured points than this leaves the trace unscored.
    pub min_points: usize,
    /// Horizontal inset of the reference line from each surface edge.
    pub margin_px: f64,
}

impl Default for TraceCfg {
    fn default() -> Self {
        Self {
            target_y: 90.0,
            min_points: 5,
            margin_px: 20.0,
        }
    }
}
