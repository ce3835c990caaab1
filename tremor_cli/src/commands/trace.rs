//! `tremor trace`: feed a pointer path through input capture and score it.

use std::path::PathBuf;

use serde_json::json;
use tremor_core::error::{AssessError, Result as CoreResult};
use tremor_core::{FixedSurface, PointerEvent, TraceCfg, TraceScorer};
use tremor_sim::{TraceSimulator, TraceStyle};
use tremor_ui::{PLACEHOLDER, rating_badge, trace_cards};

use super::{emit_json, print_cards};

#[derive(Debug, Clone)]
pub struct TraceOpts {
    pub points: Option<PathBuf>,
    pub displayed_width: Option<f64>,
    pub displayed_height: Option<f64>,
    pub simulate: bool,
    pub seed: Option<u64>,
}

/// Largest displayed surface edge accepted from the command line, px.
const MAX_DISPLAYED_PX: f64 = 16_384.0;

fn plausible_edge(px: f64) -> bool {
    px.is_finite() && px > 0.0 && px <= MAX_DISPLAYED_PX
}

pub fn run(cfg: &tremor_config::Config, opts: &TraceOpts) -> CoreResult<()> {
    let (w, h) = (cfg.trace.surface_width, cfg.trace.surface_height);
    let dw = opts.displayed_width.unwrap_or(w);
    let dh = opts.displayed_height.unwrap_or(h);
    if !(plausible_edge(dw) && plausible_edge(dh)) {
        return Err(AssessError::Config(format!(
            "displayed size must be within (0, {MAX_DISPLAYED_PX}] px, got {dw}x{dh}"
        ))
        .into());
    }
    let surface = FixedSurface::unscaled(w, h).displayed_at(dw, dh);
    let trace_cfg: TraceCfg = (&cfg.trace).into();
    let mut scorer = TraceScorer::new(trace_cfg);

    let raw = client_path(&scorer, opts, (w, h), (dw, dh))?;
    tracing::info!(points = raw.len(), displayed = ?(dw, dh), "trace start");

    let mut events = Vec::with_capacity(raw.len() + 1);
    let mut it = raw.iter();
    if let Some(&(x, y)) = it.next() {
        events.push(PointerEvent::Down { x, y });
    }
    events.extend(it.map(|&(x, y)| PointerEvent::Move { x, y }));
    events.push(PointerEvent::Up);
    for ev in events {
        scorer.handle(&surface, ev);
    }

    report(&scorer);
    Ok(())
}

/// Client-space points: from the CSV, or a synthetic stroke drawn on the
/// displayed surface along the scaled target line.
fn client_path(
    scorer: &TraceScorer,
    opts: &TraceOpts,
    (w, h): (f64, f64),
    (dw, dh): (f64, f64),
) -> CoreResult<Vec<(f64, f64)>> {
    if let Some(path) = &opts.points {
        let pts = tremor_config::load_points_csv(path)?;
        return Ok(pts.into_iter().map(|p| (p.x, p.y)).collect());
    }
    if opts.simulate {
        let (start, _) = scorer.target_line(w);
        let mut sim = TraceSimulator::new(TraceStyle::default(), opts.seed)?;
        let margin = start.x * dw / w;
        return Ok(sim.stroke(dw, margin, scorer.target_y() * dh / h));
    }
    eyre::bail!("trace needs --points FILE or --simulate")
}

fn report(scorer: &TraceScorer) {
    let m = scorer.metrics();
    if crate::cli::json_mode() {
        emit_json(&json!({
            "test": "trace",
            "state": scorer.state().to_string(),
            "points": scorer.points().len(),
            "average_deviation_px": m.map(|m| m.average_deviation),
            "smoothness": m.map(|m| m.smoothness),
            "direction_changes": m.map(|m| m.direction_changes),
            "rating": m.map(|m| m.rating.to_string()),
        }));
        return;
    }
    let badge = m.map_or_else(|| PLACEHOLDER.to_string(), |m| rating_badge(m.rating));
    print_cards(&format!("Line Trace {badge}"), &trace_cards(m));
    if m.is_none() {
        println!(
            "  Not enough points to score ({} captured).",
            scorer.points().len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displayed_edges_must_be_finite_and_bounded() {
        assert!(plausible_edge(230.0));
        assert!(plausible_edge(MAX_DISPLAYED_PX));
        for bad in [0.0, -1.0, 1e300, f64::INFINITY, f64::NAN] {
            assert!(!plausible_edge(bad), "{bad} accepted");
        }
    }
}
