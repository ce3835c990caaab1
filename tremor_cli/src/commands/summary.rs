//! `tremor summary`: the performance summary panel as text.

use std::path::Path;

use serde_json::json;
use tremor_core::error::Result as CoreResult;
use tremor_ui::{TextChart, render_summary};

use super::{CHART_WIDTH, emit_json};

pub fn run(cfg: &tremor_config::Config, fixtures: Option<&Path>) -> CoreResult<()> {
    let mut fx = cfg.dashboard.clone();
    if let Some(path) = fixtures {
        fx.stability_trend = tremor_config::load_series_csv(path)?;
        tracing::info!(points = fx.stability_trend.len(), ?path, "stability trend loaded");
    }

    if crate::cli::json_mode() {
        let series = |s: &[tremor_config::SeriesPoint]| -> Vec<serde_json::Value> {
            s.iter()
                .map(|p| json!({ "label": p.label, "value": p.value }))
                .collect()
        };
        let summary: Vec<serde_json::Value> = fx
            .summary
            .iter()
            .map(|s| json!({ "label": s.label, "value": s.value, "unit": s.unit }))
            .collect();
        emit_json(&json!({
            "test": "summary",
            "summary": summary,
            "stability_trend": series(&fx.stability_trend),
            "reaction_trend": series(&fx.reaction_trend),
        }));
        return Ok(());
    }

    let mut out = String::new();
    let mut chart = TextChart::to_string_buffer(CHART_WIDTH);
    render_summary(&fx, &mut out, &mut chart).map_err(|e| eyre::eyre!("render summary: {e}"))?;
    print!("{out}{}", chart.into_inner());
    Ok(())
}
