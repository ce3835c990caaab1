//! Lifecycle shared by the timed mini-tests.

use std::fmt;

/// Where a timed test is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TestPhase {
    #[default]
    Idle,
    Running,
    Done,
}

impl fmt::Display for TestPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TestPhase::Idle => "idle",
            TestPhase::Running => "running",
            TestPhase::Done => "done",
        })
    }
}

/// Observable effect of feeding one event to a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Event had no effect (wrong phase or stale tick).
    Ignored,
    /// Idle -> Running.
    Started,
    /// Elapsed advanced while still Running.
    Ticked { elapsed: u32 },
    /// Running -> Done; derived metrics are computed on this edge.
    Completed,
    /// Any -> Idle.
    Reset,
}

impl Transition {
    /// True for transitions that advanced elapsed time.
    #[inline]
    pub fn advanced(self) -> bool {
        matches!(self, Transition::Ticked { .. } | Transition::Completed)
    }
}
