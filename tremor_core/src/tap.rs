//! Rapid-tap test: speed, rhythm consistency, and fatigue trend.
//!
//! Taps are only recorded while the countdown is running. Each tap stores the
//! gap to the previous one (0 for the first). Metrics are derived once, on the
//! Running -> Done edge, and stay frozen until reset.

use std::time::{Duration, Instant};

use tremor_traits::{ChartPoint, Clock, MonotonicClock};

use crate::config::TapCfg;
use crate::error::Result;
use crate::phase::{TestPhase, Transition};
use crate::timer::TimerController;
use crate::util::{mean, round_half_up, round_tenths};

/// Points lost per millisecond of mean-gap deviation from the ideal.
const RHYTHM_MS_PER_POINT: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapEvent {
    /// 1-based arrival order.
    pub index: usize,
    /// Milliseconds since the previous tap; 0 for the first.
    pub inter_arrival_ms: f64,
    /// Milliseconds since the run started.
    pub at_ms: u64,
}

/// Derived tap metrics. `None` means not enough taps, not zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapMetrics {
    pub taps: usize,
    /// Taps per second over the full duration, one decimal place.
    pub taps_per_second: f64,
    /// Mean gap over taps 2..N, rounded to whole milliseconds.
    pub mean_gap_ms: Option<f64>,
    /// Up to 100; may go negative for very irregular tapping.
    pub rhythm_score: Option<i64>,
    /// Positive when tapping slowed towards the end.
    pub fatigue_index_percent: Option<i64>,
}

/// Accumulates tap events and computes rhythm metrics from them.
#[derive(Debug, Clone)]
pub struct TapRhythmAnalyzer {
    cfg: TapCfg,
    events: Vec<TapEvent>,
    last_tap_ms: Option<u64>,
}

impl TapRhythmAnalyzer {
    pub fn new(cfg: TapCfg) -> Self {
        Self {
            cfg,
            events: Vec::new(),
            last_tap_ms: None,
        }
    }

    /// Append a tap observed at `now_ms` (monotonic, same origin for the whole run).
    pub fn record(&mut self, now_ms: u64) -> TapEvent {
        let gap = self
            .last_tap_ms
            .map_or(0.0, |last| now_ms.saturating_sub(last) as f64);
        self.last_tap_ms = Some(now_ms);
        let ev = TapEvent {
            index: self.events.len() + 1,
            inter_arrival_ms: gap,
            at_ms: now_ms,
        };
        self.events.push(ev);
        ev
    }

    pub fn events(&self) -> &[TapEvent] {
        &self.events
    }
    pub fn len(&self) -> usize {
        self.events.len()
    }
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.last_tap_ms = None;
    }

    /// Gaps of taps 2..N; the first tap has no reference and is skipped.
    pub fn gaps(&self) -> impl Iterator<Item = f64> + '_ {
        self.events.iter().skip(1).map(|e| e.inter_arrival_ms)
    }

    pub fn mean_gap_ms(&self) -> Option<f64> {
        mean(self.gaps()).map(round_half_up)
    }

    pub fn taps_per_second(&self, duration_s: u32) -> f64 {
        if duration_s == 0 {
            return 0.0;
        }
        round_tenths(self.events.len() as f64 / f64::from(duration_s))
    }

    /// `min(100, round(100 - |mean_gap - ideal| / 10))`, no lower clamp.
    pub fn rhythm_score(&self) -> Option<i64> {
        if self.events.len() < self.cfg.rhythm_min_taps {
            return None;
        }
        let gap = self.mean_gap_ms()?;
        let deviation = (gap - self.cfg.ideal_gap_ms).abs() / RHYTHM_MS_PER_POINT;
        Some((round_half_up(100.0 - deviation) as i64).min(100))
    }

    /// Percent change from the leading to the trailing window of gaps.
    pub fn fatigue_index_percent(&self) -> Option<i64> {
        let n = self.events.len();
        let w = self.cfg.fatigue_window;
        if w == 0 || n < self.cfg.fatigue_min_taps || n < w + 1 {
            return None;
        }
        let first = mean(self.events[1..=w].iter().map(|e| e.inter_arrival_ms))?;
        let last = mean(self.events[n - w..].iter().map(|e| e.inter_arrival_ms))?;
        if first <= 0.0 {
            // Simultaneous taps give no baseline to compare against.
            return None;
        }
        Some(round_half_up((last - first) / first * 100.0) as i64)
    }

    pub fn metrics(&self, duration_s: u32) -> TapMetrics {
        TapMetrics {
            taps: self.events.len(),
            taps_per_second: self.taps_per_second(duration_s),
            mean_gap_ms: self.mean_gap_ms(),
            rhythm_score: self.rhythm_score(),
            fatigue_index_percent: self.fatigue_index_percent(),
        }
    }

    /// Most recent gaps as bar-chart points labelled by gap number.
    pub fn gap_series(&self) -> Vec<ChartPoint> {
        let gaps: Vec<(usize, f64)> = self
            .gaps()
            .enumerate()
            .map(|(i, g)| (i + 1, round_half_up(g)))
            .collect();
        let skip = gaps.len().saturating_sub(self.cfg.chart_bars);
        gaps.into_iter()
            .skip(skip)
            .map(|(i, g)| ChartPoint::new(i.to_string(), g))
            .collect()
    }
}

/// Countdown plus tap capture for one rapid-tap attempt.
pub struct RapidTapTest<C: Clock = MonotonicClock> {
    timer: TimerController,
    analyzer: TapRhythmAnalyzer,
    clock: C,
    epoch: Instant,
    metrics: Option<TapMetrics>,
}

impl<C: Clock> core::fmt::Debug for RapidTapTest<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RapidTapTest")
            .field("phase", &self.timer.phase())
            .field("elapsed", &self.timer.elapsed())
            .field("taps", &self.analyzer.len())
            .finish()
    }
}

impl<C: Clock> RapidTapTest<C> {
    pub fn new(cfg: TapCfg, clock: C) -> Result<Self> {
        let timer = TimerController::new(cfg.duration_s, cfg.tick)?;
        let epoch = clock.now();
        Ok(Self {
            timer,
            analyzer: TapRhythmAnalyzer::new(cfg),
            clock,
            epoch,
            metrics: None,
        })
    }

    pub fn phase(&self) -> TestPhase {
        self.timer.phase()
    }
    pub fn elapsed(&self) -> u32 {
        self.timer.elapsed()
    }
    pub fn remaining(&self) -> u32 {
        self.timer.remaining()
    }
    pub fn duration(&self) -> u32 {
        self.timer.state().duration
    }
    pub fn tick_period(&self) -> Duration {
        self.timer.period()
    }
    pub fn taps(&self) -> usize {
        self.analyzer.len()
    }
    pub fn analyzer(&self) -> &TapRhythmAnalyzer {
        &self.analyzer
    }
    /// Frozen metrics; `None` until the run completes.
    pub fn metrics(&self) -> Option<&TapMetrics> {
        self.metrics.as_ref()
    }
    pub fn gap_series(&self) -> Vec<ChartPoint> {
        self.analyzer.gap_series()
    }

    /// Start with caller-driven ticks.
    pub fn start(&mut self) -> Transition {
        let tr = self.timer.start();
        self.on_started(tr);
        tr
    }

    /// Start with a background ticker.
    pub fn start_ticking(&mut self) -> Transition {
        let tr = self.timer.start_ticking();
        self.on_started(tr);
        tr
    }

    fn on_started(&mut self, tr: Transition) {
        if tr == Transition::Started {
            self.epoch = self.clock.now();
        }
    }

    /// Record a tap now. Ignored unless Running.
    pub fn tap(&mut self) -> Option<TapEvent> {
        let now_ms = self.clock.ms_since(self.epoch);
        self.tap_at(now_ms)
    }

    /// Record a tap observed at `at`, e.g. when input is read on another thread.
    pub fn tap_at_instant(&mut self, at: Instant) -> Option<TapEvent> {
        let ms = u64::try_from(at.saturating_duration_since(self.epoch).as_millis()).unwrap_or(u64::MAX);
        self.tap_at(ms)
    }

    /// Record a tap `at_ms` milliseconds after the run started.
    pub fn tap_at(&mut self, at_ms: u64) -> Option<TapEvent> {
        if self.timer.phase() != TestPhase::Running {
            tracing::trace!(phase = %self.timer.phase(), "tap outside running phase ignored");
            return None;
        }
        let ev = self.analyzer.record(at_ms);
        tracing::trace!(index = ev.index, gap_ms = ev.inter_arrival_ms, "tap");
        Some(ev)
    }

    pub fn tick(&mut self) -> Transition {
        let tr = self.timer.tick();
        self.absorb(tr)
    }

    pub fn next_tick(&mut self, timeout: Duration) -> Option<Transition> {
        let tr = self.timer.next_tick(timeout)?;
        Some(self.absorb(tr))
    }

    pub fn is_ticking(&self) -> bool {
        self.timer.is_ticking()
    }

    fn absorb(&mut self, tr: Transition) -> Transition {
        if tr == Transition::Completed {
            let m = self.analyzer.metrics(self.duration());
            tracing::debug!(
                taps = m.taps,
                tps = m.taps_per_second,
                rhythm = ?m.rhythm_score,
                fatigue_pct = ?m.fatigue_index_percent,
                "tap test complete"
            );
            self.metrics = Some(m);
        }
        tr
    }

    /// Cancel any ticker, drop all taps and metrics, return to Idle.
    pub fn reset(&mut self) -> Transition {
        let tr = self.timer.reset();
        self.analyzer.clear();
        self.metrics = None;
        tr
    }

    pub fn dispose(self) {
        self.timer.dispose();
    }
}
