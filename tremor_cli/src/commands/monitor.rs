//! `tremor monitor`: one patient's intensity, weekly trend and raw signal.

use serde_json::json;
use tremor_core::error::Result as CoreResult;
use tremor_sim::RawSignalSimulator;
use tremor_ui::{TextChart, render_monitor};

use super::{CHART_WIDTH, emit_json};

pub fn run(cfg: &tremor_config::Config, samples: usize, seed: Option<u64>) -> CoreResult<()> {
    let fx = &cfg.dashboard;
    let raw = RawSignalSimulator::new(seed).take(samples);
    tracing::info!(samples = raw.len(), seed, "monitor view");

    if crate::cli::json_mode() {
        let intensity: Vec<serde_json::Value> = fx
            .realtime_intensity
            .iter()
            .map(|p| json!({ "label": p.label, "value": p.value }))
            .collect();
        let weekly: Vec<serde_json::Value> = fx
            .weekly_comparison
            .iter()
            .map(|w| json!({ "day": w.day, "this_week": w.this_week, "last_week": w.last_week }))
            .collect();
        emit_json(&json!({
            "test": "monitor",
            "realtime_intensity": intensity,
            "weekly_comparison": weekly,
            "raw_signal": raw,
        }));
        return Ok(());
    }

    let mut chart = TextChart::to_string_buffer(CHART_WIDTH);
    render_monitor(fx, &raw, &mut chart).map_err(|e| eyre::eyre!("render monitor: {e}"))?;
    print!("{}", chart.into_inner());
    Ok(())
}
