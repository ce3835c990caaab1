//! Raw accelerometer preview: two tremor harmonics plus sensor noise.

use rand::Rng;
use rand::rngs::StdRng;

use crate::seeded_rng;

/// Samples shown in the raw-signal preview.
pub const PREVIEW_LEN: usize = 50;

/// `sin(0.6 i)·2 + sin(1.8 i)·0.8 + (U − 0.5)·0.4` for sample `i`.
pub struct RawSignalSimulator {
    rng: StdRng,
    i: u64,
}

impl RawSignalSimulator {
    pub const BASE_STEP: f64 = 0.6;
    pub const BASE_AMPLITUDE: f64 = 2.0;
    pub const HARMONIC_STEP: f64 = 1.8;
    pub const HARMONIC_AMPLITUDE: f64 = 0.8;
    pub const NOISE: f64 = 0.4;

    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: seeded_rng(seed),
            i: 0,
        }
    }

    /// The noiseless part of sample `i`.
    pub fn clean(i: u64) -> f64 {
        let t = i as f64;
        (t * Self::BASE_STEP).sin() * Self::BASE_AMPLITUDE
            + (t * Self::HARMONIC_STEP).sin() * Self::HARMONIC_AMPLITUDE
    }

    pub fn next_sample(&mut self) -> f64 {
        let clean = Self::clean(self.i);
        self.i += 1;
        let u: f64 = self.rng.r#gen();
        clean + (u - 0.5) * Self::NOISE
    }

    pub fn take(&mut self, n: usize) -> Vec<f64> {
        let out: Vec<f64> = (0..n).map(|_| self.next_sample()).collect();
        tracing::debug!(samples = out.len(), "raw signal generated");
        out
    }
}
