//! Pointer/touch normalization against a drawing surface.
//!
//! Surfaces are often displayed at a different size than their backing
//! store. A raw client coordinate is mapped into surface pixels with
//! `(raw - origin) * intrinsic / displayed`, using the geometry reported at
//! capture time.

use tremor_traits::{ClientRect, DrawingSurface};

/// A point in surface-local pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TracePoint {
    pub x: f64,
    pub y: f64,
}

impl TracePoint {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pointer or touch event in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up,
}

/// Scale factor for one axis; a collapsed display maps 1:1.
#[inline]
fn axis_scale(intrinsic: f64, displayed: f64) -> f64 {
    if displayed > 0.0 && intrinsic.is_finite() && displayed.is_finite() {
        intrinsic / displayed
    } else {
        1.0
    }
}

/// Map a client-space coordinate into `surface` pixels.
pub fn to_surface<S: DrawingSurface + ?Sized>(surface: &S, raw_x: f64, raw_y: f64) -> TracePoint {
    let rect = surface.client_rect();
    let (w, h) = surface.intrinsic_size();
    TracePoint {
        x: (raw_x - rect.left) * axis_scale(w, rect.width),
        y: (raw_y - rect.top) * axis_scale(h, rect.height),
    }
}

/// Surface with fixed geometry, for callers without a live layout engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSurface {
    pub intrinsic: (f64, f64),
    pub rect: ClientRect,
}

impl FixedSurface {
    /// Surface displayed at its intrinsic size at the client origin.
    pub fn unscaled(width: f64, height: f64) -> Self {
        Self {
            intrinsic: (width, height),
            rect: ClientRect {
                left: 0.0,
                top: 0.0,
                width,
                height,
            },
        }
    }

    /// Same backing store, displayed at `width` x `height`.
    pub fn displayed_at(mut self, width: f64, height: f64) -> Self {
        self.rect.width = width;
        self.rect.height = height;
        self
    }

    pub fn offset(mut self, left: f64, top: f64) -> Self {
        self.rect.left = left;
        self.rect.top = top;
        self
    }
}

impl DrawingSurface for FixedSurface {
    fn intrinsic_size(&self) -> (f64, f64) {
        self.intrinsic
    }

    fn client_rect(&self) -> ClientRect {
        self.rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_when_displayed_at_intrinsic_size() {
        let s = FixedSurface::unscaled(460.0, 180.0);
        assert_eq!(to_surface(&s, 12.0, 90.0), TracePoint::new(12.0, 90.0));
    }

    #[test]
    fn scales_by_intrinsic_over_displayed() {
        // 460x180 store shown at half size, 10px from the viewport origin.
        let s = FixedSurface::unscaled(460.0, 180.0)
            .displayed_at(230.0, 90.0)
            .offset(10.0, 10.0);
        assert_eq!(to_surface(&s, 10.0, 10.0), TracePoint::new(0.0, 0.0));
        assert_eq!(to_surface(&s, 120.0, 55.0), TracePoint::new(220.0, 90.0));
    }

    #[test]
    fn collapsed_display_does_not_divide_by_zero() {
        let s = FixedSurface::unscaled(460.0, 180.0).displayed_at(0.0, 0.0);
        let p = to_surface(&s, 5.0, 7.0);
        assert!(p.x.is_finite() && p.y.is_finite());
        assert_eq!(p, TracePoint::new(5.0, 7.0));
    }
}
