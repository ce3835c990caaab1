//! Simulated input devices for running assessments without a patient.
//!
//! Everything here draws from a `StdRng`, so a fixed seed reproduces a run
//! exactly. Pass `None` to seed from the OS instead.

pub mod error;
pub mod signal;
pub mod tapper;
pub mod tracer;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tremor_traits::{MotionSource, StabilityScorer};

pub use error::SimError;
pub use signal::{PREVIEW_LEN, RawSignalSimulator};
pub use tapper::ScriptedTapper;
pub use tracer::{MAX_STROKE_POINTS, TraceSimulator, TraceStyle};

/// Seeded when asked, OS entropy otherwise.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// Stand-in stability scorer: uniform in `72..=87`, ignoring the samples.
pub struct SimulatedStabilityScorer {
    rng: StdRng,
}

impl SimulatedStabilityScorer {
    pub const BASE: f64 = 72.0;
    pub const SPREAD: f64 = 15.0;

    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: seeded_rng(seed),
        }
    }
}

impl StabilityScorer for SimulatedStabilityScorer {
    fn score(&mut self, fluctuations: &[f64]) -> u32 {
        let u: f64 = self.rng.r#gen();
        let s = (Self::BASE + u * Self::SPREAD + 0.5).floor();
        tracing::debug!(samples = fluctuations.len(), score = s, "simulated stability score");
        s as u32
    }
}

/// Hand fluctuation: a slow sine with a little uniform noise on top.
pub struct FluctuationSimulator {
    rng: StdRng,
    i: u64,
    amplitude: f64,
    noise: f64,
    limit: Option<usize>,
}

impl FluctuationSimulator {
    /// Phase advance per sample, in radians.
    pub const STEP: f64 = 0.5;

    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: seeded_rng(seed),
            i: 0,
            amplitude: 1.2,
            noise: 0.6,
            limit: None,
        }
    }

    pub fn with_amplitude(mut self, amplitude: f64, noise: f64) -> error::Result<Self> {
        if !amplitude.is_finite() || !noise.is_finite() || amplitude < 0.0 || noise < 0.0 {
            return Err(SimError::InvalidParam("amplitude and noise must be finite and >= 0"));
        }
        self.amplitude = amplitude;
        self.noise = noise;
        Ok(self)
    }

    /// Fail every sample after the first `n`; exercises error paths downstream.
    pub fn with_limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    fn next_value(&mut self) -> f64 {
        let phase = self.i as f64 * Self::STEP;
        self.i += 1;
        let u: f64 = self.rng.r#gen();
        phase.sin() * self.amplitude + (u - 0.5) * self.noise
    }
}

impl MotionSource for FluctuationSimulator {
    fn sample(&mut self) -> Result<f64, Box<dyn std::error::Error + Send + Sync>> {
        if let Some(n) = self.limit
            && self.i as usize >= n
        {
            return Err(Box::new(SimError::Exhausted(n)));
        }
        Ok(self.next_value())
    }
}
