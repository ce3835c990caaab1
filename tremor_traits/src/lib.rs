pub mod chart;
pub mod clock;

pub use chart::{ChartKind, ChartOptions, ChartPoint, ChartSink, Stroke};
pub use clock::{Clock, MonotonicClock};

/// Placement of a drawing surface in client (viewport) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// A drawable area whose backing store may be displayed scaled.
pub trait DrawingSurface {
    /// Backing-store size in surface pixels, `(width, height)`.
    fn intrinsic_size(&self) -> (f64, f64);
    /// Where the surface currently sits on screen.
    fn client_rect(&self) -> ClientRect;
}

/// Source of hand-motion fluctuation samples for the steady-hold test.
pub trait MotionSource {
    fn sample(&mut self) -> Result<f64, Box<dyn std::error::Error + Send + Sync>>;
}

/// Turns the fluctuations captured during a hold into a 0..=100 score.
pub trait StabilityScorer {
    fn score(&mut self, fluctuations: &[f64]) -> u32;
}

impl<F> StabilityScorer for F
where
    F: FnMut(&[f64]) -> u32,
{
    fn score(&mut self, fluctuations: &[f64]) -> u32 {
        self(fluctuations)
    }
}
