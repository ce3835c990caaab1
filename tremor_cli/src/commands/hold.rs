//! `tremor hold`: steady-hold test on a real ticker with simulated motion.

use std::sync::atomic::AtomicBool;
use std::time::Duration;

use serde_json::json;
use tremor_core::error::{AssessError, Result as CoreResult};
use tremor_core::{HoldCfg, RunOutcome, SteadyHoldTest, run_until_done};
use tremor_sim::{FluctuationSimulator, SimulatedStabilityScorer};
use tremor_traits::ChartSink;
use tremor_ui::{TextChart, hold_cards, rating_badge};

use super::{CHART_WIDTH, draw_countdown, emit_json, print_cards};

pub fn run(
    cfg: &tremor_config::Config,
    tick_ms: Option<u64>,
    seed: Option<u64>,
    shutdown: &AtomicBool,
) -> CoreResult<()> {
    let mut hold: HoldCfg = (&cfg.hold).into();
    if let Some(ms) = tick_ms {
        hold.tick = Duration::from_millis(ms);
    }
    let duration_s = hold.duration_s;
    let tick_ms = hold.tick.as_millis();

    // Distinct streams so the score does not mirror the fluctuation noise.
    let motion = FluctuationSimulator::new(seed);
    let scorer = SimulatedStabilityScorer::new(seed.map(|s| s.wrapping_add(1)));
    let mut test = SteadyHoldTest::builder()
        .with_config(hold)
        .with_motion(motion)
        .with_scorer(scorer)
        .build()?;

    tracing::info!(duration_s, tick_ms = tick_ms as u64, seed, "hold start");
    test.start_ticking();
    let outcome = run_until_done(&mut test, shutdown, |t, tr| {
        draw_countdown("Keep your hand still…", tr, t.remaining(), t.progress());
        Ok(())
    })?;
    if outcome == RunOutcome::Cancelled {
        test.dispose();
        return Err(AssessError::Cancelled.into());
    }

    let metrics = test.completed_metrics()?;
    tracing::info!(
        stability = metrics.stability_score,
        rating = %metrics.rating,
        samples = metrics.samples,
        dropped = test.dropped_samples(),
        "hold complete"
    );

    if crate::cli::json_mode() {
        let fluctuation: Vec<f64> = test.samples().iter().map(|s| s.value).collect();
        emit_json(&json!({
            "test": "hold",
            "stability_score": metrics.stability_score,
            "rating": metrics.rating.to_string(),
            "samples": metrics.samples,
            "fluctuation": fluctuation,
        }));
    } else {
        print_cards(
            &format!("Steady Hold {}", rating_badge(metrics.rating)),
            &hold_cards(Some(&metrics)),
        );
        let (points, opts) = test.fluctuation_series();
        let mut chart = TextChart::to_string_buffer(CHART_WIDTH);
        chart
            .render("Micro-movement fluctuation during hold:", &points, &opts)
            .map_err(|e| eyre::eyre!("render fluctuation chart: {e}"))?;
        print!("{}", chart.into_inner());
    }
    test.dispose();
    Ok(())
}
