//! `tremor tap`: rapid-tap test from stdin lines or a scripted tapper.

use std::io::BufRead;
use std::sync::atomic::AtomicBool;
use std::time::{Duration, Instant};

use serde_json::json;
use tremor_core::error::{AssessError, Result as CoreResult};
use tremor_core::{RapidTapTest, RunOutcome, TapCfg, TapMetrics, run_with_input};
use tremor_sim::ScriptedTapper;
use tremor_traits::{ChartOptions, ChartSink, MonotonicClock};
use tremor_ui::{TextChart, signed_percent, tap_cards};

use super::{CHART_WIDTH, draw_countdown, emit_json, print_cards};

#[derive(Debug, Clone)]
pub struct TapOpts {
    pub tick_ms: Option<u64>,
    pub simulate: bool,
    pub interval_ms: u64,
    pub drift_ms: i64,
    pub jitter_ms: u64,
    pub seed: Option<u64>,
}

pub fn run(cfg: &tremor_config::Config, opts: &TapOpts, shutdown: &AtomicBool) -> CoreResult<()> {
    let mut tap: TapCfg = (&cfg.tap).into();
    if let Some(ms) = opts.tick_ms {
        tap.tick = Duration::from_millis(ms);
    }
    let mut test = RapidTapTest::new(tap, MonotonicClock::new())?;
    tracing::info!(
        duration_s = test.duration(),
        simulate = opts.simulate,
        "tap start"
    );

    if opts.simulate {
        run_scripted(&mut test, opts)?;
    } else {
        run_interactive(&mut test, shutdown)?;
    }

    let metrics = *test
        .metrics()
        .ok_or_else(|| AssessError::State("tap test completed without metrics".into()))?;
    tracing::info!(
        taps = metrics.taps,
        tps = metrics.taps_per_second,
        rhythm = ?metrics.rhythm_score,
        "tap complete"
    );
    report(&test, &metrics)?;
    test.dispose();
    Ok(())
}

/// Drive ticks by hand so the run is instant and reproducible.
fn run_scripted(test: &mut RapidTapTest, opts: &TapOpts) -> CoreResult<()> {
    let mut tapper = ScriptedTapper::new(opts.interval_ms, opts.seed)?
        .with_jitter(opts.jitter_ms)
        .with_drift(opts.drift_ms);
    let window_ms = u64::from(test.duration()) * 1000;
    let taps = tapper.taps(window_ms);
    let mut pending = taps.iter().copied().peekable();

    test.start();
    for second in 1..=u64::from(test.duration()) {
        while let Some(t) = pending.next_if(|&t| t < second * 1000) {
            test.tap_at(t);
        }
        test.tick();
    }
    Ok(())
}

/// One tap per stdin line, timestamped when the line is read.
fn run_interactive(test: &mut RapidTapTest, shutdown: &AtomicBool) -> CoreResult<()> {
    let (tx, rx) = crossbeam_channel::unbounded::<Instant>();
    test.start_ticking();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            if line.is_err() || tx.send(Instant::now()).is_err() {
                break;
            }
        }
    });
    if !crate::cli::json_mode() {
        eprintln!("Press Enter to tap. Go!");
    }

    let outcome = run_with_input(
        test,
        shutdown,
        |t| {
            for at in rx.try_iter() {
                t.tap_at_instant(at);
            }
            Ok(())
        },
        |t, tr| {
            draw_countdown("Taps:", tr, t.remaining(), progress(t));
            Ok(())
        },
    )?;
    if outcome == RunOutcome::Cancelled {
        return Err(AssessError::Cancelled.into());
    }
    Ok(())
}

fn progress(t: &RapidTapTest) -> f64 {
    f64::from(t.elapsed()) / f64::from(t.duration().max(1))
}

fn report(test: &RapidTapTest, m: &TapMetrics) -> CoreResult<()> {
    let gaps = test.gap_series();
    if crate::cli::json_mode() {
        let gap_ms: Vec<f64> = gaps.iter().map(|p| p.value).collect();
        emit_json(&json!({
            "test": "tap",
            "taps": m.taps,
            "taps_per_second": m.taps_per_second,
            "mean_gap_ms": m.mean_gap_ms,
            "rhythm_score": m.rhythm_score,
            "fatigue_index_percent": m.fatigue_index_percent,
            "fatigue": signed_percent(m.fatigue_index_percent),
            "recent_gaps_ms": gap_ms,
        }));
        return Ok(());
    }
    print_cards(&format!("Rapid Tap ({} taps)", m.taps), &tap_cards(Some(m)));
    if !gaps.is_empty() {
        let mut chart = TextChart::to_string_buffer(CHART_WIDTH);
        chart
            .render("Inter-tap interval (ms):", &gaps, &ChartOptions::bar())
            .map_err(|e| eyre::eyre!("render gap chart: {e}"))?;
        print!("{}", chart.into_inner());
    }
    Ok(())
}
