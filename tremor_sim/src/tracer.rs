//! Synthetic pointer strokes along a horizontal target line.

use rand::Rng;
use rand::rngs::StdRng;

use crate::error::{Result, SimError};
use crate::seeded_rng;

/// Upper bound on points in one synthetic stroke.
pub const MAX_STROKE_POINTS: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceStyle {
    /// Horizontal distance between successive samples, px.
    pub step_px: f64,
    /// Peak of the slow wander away from the line, px.
    pub wander_px: f64,
    /// Uniform per-sample noise amplitude, px.
    pub noise_px: f64,
    /// Constant vertical bias, px (positive is below the line).
    pub offset_px: f64,
}

impl Default for TraceStyle {
    fn default() -> Self {
        Self {
            step_px: 8.0,
            wander_px: 6.0,
            noise_px: 2.0,
            offset_px: 0.0,
        }
    }
}

pub struct TraceSimulator {
    style: TraceStyle,
    rng: StdRng,
}

impl TraceSimulator {
    pub fn new(style: TraceStyle, seed: Option<u64>) -> Result<Self> {
        if !(style.step_px.is_finite() && style.step_px > 0.0) {
            return Err(SimError::InvalidParam("step_px must be > 0"));
        }
        if style.noise_px < 0.0 || style.wander_px < 0.0 {
            return Err(SimError::InvalidParam("noise_px and wander_px must be >= 0"));
        }
        Ok(Self {
            style,
            rng: seeded_rng(seed),
        })
    }

    /// Points from `margin` to `width - margin` around `target_y`, at most
    /// [`MAX_STROKE_POINTS`] of them.
    pub fn stroke(&mut self, width: f64, margin: f64, target_y: f64) -> Vec<(f64, f64)> {
        let s = self.style;
        let end = width - margin;
        let mut out = Vec::new();
        if end.is_nan() {
            return out;
        }
        for i in 0..MAX_STROKE_POINTS {
            let x = margin + i as f64 * s.step_px;
            if x > end {
                break;
            }
            let wander = (x / 40.0).sin() * s.wander_px;
            let noise = if s.noise_px > 0.0 {
                self.rng.gen_range(-s.noise_px..=s.noise_px)
            } else {
                0.0
            };
            out.push((x, target_y + s.offset_px + wander + noise));
        }
        tracing::debug!(points = out.len(), "synthetic stroke generated");
        out
    }
}
