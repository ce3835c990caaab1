//! `tremor patients`: clinician roster with search and the alert list.

use serde_json::json;
use tremor_core::error::Result as CoreResult;
use tremor_core::{Severity, filter_patients, roster_stats};
use tremor_ui::{render_alerts, render_roster, roster_cards};

use super::{emit_json, print_cards};

pub fn run(cfg: &tremor_config::Config, search: &str) -> CoreResult<()> {
    let fx = &cfg.dashboard;
    let matches = filter_patients(&fx.patients, search);
    let stats = roster_stats(&fx.patients, &fx.alerts);
    tracing::info!(
        total = stats.total,
        matched = matches.len(),
        search,
        "patient roster"
    );

    if crate::cli::json_mode() {
        let rows: Vec<serde_json::Value> = matches
            .iter()
            .map(|p| {
                json!({
                    "id": p.id,
                    "name": p.name,
                    "connected": p.connected,
                    "reading": p.reading,
                    "severity": Severity::from_reading(&p.reading).to_string(),
                    "score": p.score,
                    "score_severity": Severity::from_score(p.score).to_string(),
                })
            })
            .collect();
        let alerts: Vec<serde_json::Value> = fx
            .alerts
            .iter()
            .map(|a| json!({ "patient": a.patient, "msg": a.msg, "time": a.time, "level": a.level }))
            .collect();
        emit_json(&json!({
            "test": "patients",
            "search": search,
            "total": stats.total,
            "high_severity": stats.high_severity,
            "active_alerts": stats.active_alerts,
            "mean_score": stats.mean_score,
            "patients": rows,
            "alerts": alerts,
        }));
        return Ok(());
    }

    print_cards("Patient Overview", &roster_cards(&stats));
    let mut out = String::new();
    render_alerts(&mut out, &fx.alerts).map_err(|e| eyre::eyre!("render alerts: {e}"))?;
    render_roster(&mut out, &matches).map_err(|e| eyre::eyre!("render roster: {e}"))?;
    print!("{out}");
    Ok(())
}
