//! Freehand line-trace scoring.
//!
//! The user traces a horizontal reference line between a pointer-down and a
//! pointer-up. Points are captured while drawing; on pointer-up the path is
//! scored once for vertical deviation from the line and for smoothness
//! (how rarely the vertical direction flips).

use tremor_traits::DrawingSurface;

use crate::capture::{PointerEvent, TracePoint, to_surface};
use crate::config::TraceCfg;
use crate::rating::{Rating, rate_deviation};
use crate::util::{mean, round_half_up};

/// Penalty weight: each direction change per captured point costs this much.
const DIRECTION_CHANGE_PENALTY: f64 = 400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraceState {
    /// Waiting for a pointer-down.
    #[default]
    Ready,
    Drawing,
    /// Pointer released. Metrics are present only if enough points were captured.
    Done,
}

impl std::fmt::Display for TraceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Ready => "ready",
            Self::Drawing => "drawing",
            Self::Done => "done",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceMetrics {
    /// Mean `|y - target_y|`, rounded to whole pixels.
    pub average_deviation: u32,
    /// 0..=100, higher is smoother.
    pub smoothness: u32,
    pub direction_changes: usize,
    pub points: usize,
    pub rating: Rating,
}

/// Sign with zero as its own class, so a flat segment breaks a run.
#[inline]
fn sign(d: f64) -> i8 {
    if d > 0.0 {
        1
    } else if d < 0.0 {
        -1
    } else {
        0
    }
}

/// Count indices `i >= 2` where the vertical step direction differs from the previous one.
pub fn direction_changes(points: &[TracePoint]) -> usize {
    points
        .windows(3)
        .filter(|w| sign(w[1].y - w[0].y) != sign(w[2].y - w[1].y))
        .count()
}

/// Score a captured path against a horizontal line at `target_y`.
///
/// Returns `None` for an empty path; callers enforce their own minimum.
pub fn score_path(points: &[TracePoint], target_y: f64) -> Option<TraceMetrics> {
    let avg = mean(points.iter().map(|p| (p.y - target_y).abs()))?;
    let average_deviation = round_half_up(avg).max(0.0) as u32;

    let changes = direction_changes(points);
    let raw = 100.0 - (changes as f64 / points.len() as f64) * DIRECTION_CHANGE_PENALTY;
    let smoothness = round_half_up(raw).clamp(0.0, 100.0) as u32;

    Some(TraceMetrics {
        average_deviation,
        smoothness,
        direction_changes: changes,
        points: points.len(),
        rating: rate_deviation(average_deviation),
    })
}

/// Drawing-surface state machine for one trace attempt.
#[derive(Debug, Clone)]
pub struct TraceScorer {
    cfg: TraceCfg,
    state: TraceState,
    points: Vec<TracePoint>,
    cursor: Option<TracePoint>,
    metrics: Option<TraceMetrics>,
}

impl TraceScorer {
    pub fn new(cfg: TraceCfg) -> Self {
        Self {
            cfg,
            state: TraceState::Ready,
            points: Vec::new(),
            cursor: None,
            metrics: None,
        }
    }

    pub fn state(&self) -> TraceState {
        self.state
    }
    pub fn points(&self) -> &[TracePoint] {
        &self.points
    }
    /// Last captured point; where a renderer continues the stroke from.
    pub fn cursor(&self) -> Option<TracePoint> {
        self.cursor
    }
    pub fn metrics(&self) -> Option<&TraceMetrics> {
        self.metrics.as_ref()
    }
    pub fn target_y(&self) -> f64 {
        self.cfg.target_y
    }

    /// Endpoints of the reference line on a surface `width` pixels wide.
    pub fn target_line(&self, width: f64) -> (TracePoint, TracePoint) {
        let y = self.cfg.target_y;
        let m = self.cfg.margin_px.min(width / 2.0);
        (TracePoint::new(m, y), TracePoint::new(width - m, y))
    }

    /// Begin a stroke. Ignored once the attempt is done.
    pub fn pointer_down(&mut self, p: TracePoint) -> bool {
        if self.state == TraceState::Done {
            tracing::trace!("pointer down after completion ignored");
            return false;
        }
        self.points.clear();
        self.points.push(p);
        self.cursor = Some(p);
        self.state = TraceState::Drawing;
        tracing::debug!(x = p.x, y = p.y, "trace started");
        true
    }

    pub fn pointer_move(&mut self, p: TracePoint) -> bool {
        if self.state != TraceState::Drawing {
            return false;
        }
        self.points.push(p);
        self.cursor = Some(p);
        true
    }

    /// End the stroke and score it once.
    pub fn pointer_up(&mut self) -> Option<&TraceMetrics> {
        if self.state != TraceState::Drawing {
            return None;
        }
        self.state = TraceState::Done;
        if self.points.len() < self.cfg.min_points {
            tracing::debug!(
                points = self.points.len(),
                min_points = self.cfg.min_points,
                "trace too short; left unscored"
            );
            return None;
        }
        self.metrics = score_path(&self.points, self.cfg.target_y);
        if let Some(m) = &self.metrics {
            tracing::debug!(
                deviation_px = m.average_deviation,
                smoothness = m.smoothness,
                changes = m.direction_changes,
                rating = %m.rating,
                "trace scored"
            );
        }
        self.metrics.as_ref()
    }

    /// Route a client-space event through input capture.
    pub fn handle<S: DrawingSurface + ?Sized>(&mut self, surface: &S, ev: PointerEvent) -> bool {
        match ev {
            PointerEvent::Down { x, y } => self.pointer_down(to_surface(surface, x, y)),
            PointerEvent::Move { x, y } => self.pointer_move(to_surface(surface, x, y)),
            PointerEvent::Up => {
                let was_drawing = self.state == TraceState::Drawing;
                self.pointer_up();
                was_drawing
            }
        }
    }

    /// Discard the attempt. The reference line is unchanged.
    pub fn reset(&mut self) {
        self.points.clear();
        self.cursor = None;
        self.metrics = None;
        self.state = TraceState::Ready;
    }
}

impl Default for TraceScorer {
    fn default() -> Self {
        Self::new(TraceCfg::default())
    }
}
