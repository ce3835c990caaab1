//! Synthetic finger taps.

use rand::Rng;
use rand::rngs::StdRng;

use crate::error::{Result, SimError};
use crate::seeded_rng;

/// Produces tap timestamps with a base interval, uniform jitter, and a
/// per-gap drift (positive drift means the tapper slows down).
pub struct ScriptedTapper {
    interval_ms: u64,
    jitter_ms: u64,
    drift_ms: i64,
    rng: StdRng,
}

impl ScriptedTapper {
    pub fn new(interval_ms: u64, seed: Option<u64>) -> Result<Self> {
        if interval_ms == 0 {
            return Err(SimError::InvalidParam("interval_ms must be > 0"));
        }
        Ok(Self {
            interval_ms,
            jitter_ms: 0,
            drift_ms: 0,
            rng: seeded_rng(seed),
        })
    }

    pub fn with_jitter(mut self, jitter_ms: u64) -> Self {
        self.jitter_ms = jitter_ms;
        self
    }

    pub fn with_drift(mut self, drift_ms: i64) -> Self {
        self.drift_ms = drift_ms;
        self
    }

    /// Tap times in `[0, window_ms)`, first tap at 0. Gaps never drop below 1 ms.
    pub fn taps(&mut self, window_ms: u64) -> Vec<u64> {
        let mut out = Vec::new();
        if window_ms == 0 {
            return out;
        }
        let mut t = 0u64;
        let mut k = 0i64;
        while t < window_ms {
            out.push(t);
            let jitter = if self.jitter_ms == 0 {
                0
            } else {
                let j = self.jitter_ms as i64;
                self.rng.gen_range(-j..=j)
            };
            let gap = (self.interval_ms as i64 + k * self.drift_ms + jitter).max(1);
            t = t.saturating_add(gap as u64);
            k += 1;
        }
        tracing::debug!(taps = out.len(), window_ms, "synthetic taps generated");
        out
    }
}
