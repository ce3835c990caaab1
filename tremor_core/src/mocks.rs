//! Test and helper doubles for tremor_core.

/// Motion source that replays a fixed sequence, then repeats the last value.
#[derive(Debug, Clone, Default)]
pub struct ScriptedMotion {
    values: Vec<f64>,
    idx: usize,
}

impl ScriptedMotion {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, idx: 0 }
    }

    /// A hand that never moves.
    pub fn still() -> Self {
        Self::new(vec![0.0])
    }
}

impl tremor_traits::MotionSource for ScriptedMotion {
    fn sample(&mut self) -> Result<f64, Box<dyn std::error::Error + Send + Sync>> {
        let v = self
            .values
            .get(self.idx)
            .or_else(|| self.values.last())
            .copied()
            .ok_or_else(|| std::io::Error::other("scripted motion is empty"))?;
        self.idx = self.idx.saturating_add(1);
        Ok(v)
    }
}

/// Scorer that always returns the same value.
#[derive(Debug, Clone, Copy)]
pub struct FixedScorer(pub u32);

impl tremor_traits::StabilityScorer for FixedScorer {
    fn score(&mut self, _fluctuations: &[f64]) -> u32 {
        self.0
    }
}
