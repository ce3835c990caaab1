//! Steady-hold test: keep the hand still for the whole countdown.
//!
//! Every tick pulls a few fluctuation samples from the [`MotionSource`]. When
//! the countdown completes, the [`StabilityScorer`] turns the captured series
//! into a single 0..=100 score, computed exactly once.

use std::time::Duration;

use tremor_traits::{ChartOptions, ChartPoint, MotionSource, StabilityScorer};

use crate::config::HoldCfg;
use crate::error::{AssessError, Result};
use crate::phase::{TestPhase, Transition};
use crate::rating::{Rating, rate_stability};
use crate::timer::TimerController;

/// Fixed y-axis bounds for the fluctuation chart.
pub const FLUCTUATION_DOMAIN: (f64, f64) = (-3.0, 3.0);

/// A value captured `t_ms` milliseconds into the run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedSample {
    pub t_ms: u64,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldMetrics {
    pub stability_score: u32,
    pub rating: Rating,
    pub samples: usize,
}

pub struct SteadyHoldTest<M: MotionSource, S: StabilityScorer> {
    pub(crate) timer: TimerController,
    pub(crate) cfg: HoldCfg,
    pub(crate) motion: M,
    pub(crate) scorer: S,
    pub(crate) samples: Vec<TimedSample>,
    pub(crate) dropped: usize,
    pub(crate) metrics: Option<HoldMetrics>,
}

impl<M: MotionSource, S: StabilityScorer> core::fmt::Debug for SteadyHoldTest<M, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SteadyHoldTest")
            .field("phase", &self.timer.phase())
            .field("elapsed", &self.timer.elapsed())
            .field("samples", &self.samples.len())
            .field("dropped", &self.dropped)
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl<M: MotionSource, S: StabilityScorer> SteadyHoldTest<M, S> {
    pub fn phase(&self) -> TestPhase {
        self.timer.phase()
    }
    pub fn elapsed(&self) -> u32 {
        self.timer.elapsed()
    }
    pub fn remaining(&self) -> u32 {
        self.timer.remaining()
    }
    pub fn progress(&self) -> f64 {
        self.timer.state().progress()
    }
    pub fn duration(&self) -> u32 {
        self.timer.state().duration
    }
    pub fn samples(&self) -> &[TimedSample] {
        &self.samples
    }
    pub fn metrics(&self) -> Option<&HoldMetrics> {
        self.metrics.as_ref()
    }
    /// Samples discarded this run because the source failed or returned a non-finite value.
    pub fn dropped_samples(&self) -> usize {
        self.dropped
    }

    /// Metrics of a completed run whose motion source produced something.
    ///
    /// A run where every sample was dropped is a source failure, not a perfect hold.
    pub fn completed_metrics(&self) -> Result<HoldMetrics> {
        let m = self
            .metrics
            .ok_or_else(|| AssessError::State("hold test has not completed".into()))?;
        if m.samples == 0 && self.dropped > 0 {
            return Err(AssessError::Source(format!(
                "no usable motion samples ({} dropped)",
                self.dropped
            ))
            .into());
        }
        Ok(m)
    }
    pub fn is_ticking(&self) -> bool {
        self.timer.is_ticking()
    }

    pub fn start(&mut self) -> Transition {
        self.timer.start()
    }

    pub fn start_ticking(&mut self) -> Transition {
        self.timer.start_ticking()
    }

    pub fn tick(&mut self) -> Transition {
        let tr = self.timer.tick();
        self.absorb(tr)
    }

    pub fn next_tick(&mut self, timeout: Duration) -> Option<Transition> {
        let tr = self.timer.next_tick(timeout)?;
        Some(self.absorb(tr))
    }

    pub fn reset(&mut self) -> Transition {
        let tr = self.timer.reset();
        self.samples.clear();
        self.dropped = 0;
        self.metrics = None;
        tr
    }

    pub fn dispose(self) {
        self.timer.dispose();
    }

    /// Fluctuation series for the chart collaborator.
    pub fn fluctuation_series(&self) -> (Vec<ChartPoint>, ChartOptions) {
        let points = self
            .samples
            .iter()
            .enumerate()
            .map(|(i, s)| ChartPoint::new(i.to_string(), s.value))
            .collect();
        (points, ChartOptions::area(FLUCTUATION_DOMAIN))
    }

    fn absorb(&mut self, tr: Transition) -> Transition {
        if tr.advanced() {
            // Samples for the interval that just ended.
            self.capture(self.timer.elapsed().saturating_sub(1));
        }
        if tr == Transition::Completed {
            let values: Vec<f64> = self.samples.iter().map(|s| s.value).collect();
            let stability_score = self.scorer.score(&values).min(100);
            let m = HoldMetrics {
                stability_score,
                rating: rate_stability(stability_score),
                samples: values.len(),
            };
            tracing::debug!(
                stability = m.stability_score,
                rating = %m.rating,
                samples = m.samples,
                "hold test complete"
            );
            self.metrics = Some(m);
        }
        tr
    }

    fn capture(&mut self, tick_index: u32) {
        let per_tick = self.cfg.samples_per_tick.max(1);
        let tick_ms = u64::try_from(self.cfg.tick.as_millis()).unwrap_or(u64::MAX);
        let base = u64::from(tick_index).saturating_mul(tick_ms);
        for k in 0..per_tick {
            let t_ms = base + tick_ms * k as u64 / per_tick as u64;
            match self.motion.sample() {
                Ok(v) if v.is_finite() => self.samples.push(TimedSample { t_ms, value: v }),
                Ok(v) => {
                    self.dropped += 1;
                    tracing::warn!(value = v, t_ms, "non-finite motion sample dropped");
                }
                Err(e) => {
                    self.dropped += 1;
                    tracing::warn!(error = %e, t_ms, "motion sample failed");
                }
            }
        }
    }
}
