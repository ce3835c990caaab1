//! Builder for `SteadyHoldTest`.
//!
//! Motion source and scorer are required; config falls back to defaults.
//! `build()` validates and reports the first missing or invalid piece.

use tremor_traits::{MotionSource, StabilityScorer};

use crate::config::HoldCfg;
use crate::error::{BuildError, Result};
use crate::hold::SteadyHoldTest;
use crate::timer::TimerController;

pub struct SteadyHoldTestBuilder<M, S> {
    cfg: Option<HoldCfg>,
    motion: Option<M>,
    scorer: Option<S>,
}

impl<M, S> Default for SteadyHoldTestBuilder<M, S> {
    fn default() -> Self {
        Self {
            cfg: None,
            motion: None,
            scorer: None,
        }
    }
}

impl<M: MotionSource, S: StabilityScorer> SteadyHoldTest<M, S> {
    pub fn builder() -> SteadyHoldTestBuilder<M, S> {
        SteadyHoldTestBuilder::default()
    }
}

impl<M: MotionSource, S: StabilityScorer> SteadyHoldTestBuilder<M, S> {
    pub fn with_config(mut self, cfg: HoldCfg) -> Self {
        self.cfg = Some(cfg);
        self
    }

    pub fn with_motion(mut self, motion: M) -> Self {
        self.motion = Some(motion);
        self
    }

    pub fn with_scorer(mut self, scorer: S) -> Self {
        self.scorer = Some(scorer);
        self
    }

    pub fn build(self) -> Result<SteadyHoldTest<M, S>> {
        let motion = self
            .motion
            .ok_or_else(|| eyre::Report::new(BuildError::MissingMotion))?;
        let scorer = self
            .scorer
            .ok_or_else(|| eyre::Report::new(BuildError::MissingScorer))?;
        let cfg = self.cfg.unwrap_or_default();
        if cfg.samples_per_tick == 0 {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "samples_per_tick must be >= 1",
            )));
        }
        let timer = TimerController::new(cfg.duration_s, cfg.tick)?;
        let capacity = cfg.samples_per_tick.saturating_mul(cfg.duration_s as usize);
        Ok(SteadyHoldTest {
            timer,
            cfg,
            motion,
            scorer,
            samples: Vec::with_capacity(capacity),
            dropped: 0,
            metrics: None,
        })
    }
}
