//! Fixed-duration countdown shared by the steady-hold and rapid-tap tests.
//!
//! The state machine is a pure function, [`apply`], over [`TimerState`].
//! [`TimerController`] wraps it with an optional [`Ticker`] and owns the
//! cancellation discipline: the tick source is stopped before the state
//! leaves `Running`, and every tick carries the generation of the run that
//! produced it so a late tick can never touch a newer run.

use std::time::Duration;

use crate::error::{BuildError, Result};
use crate::phase::{TestPhase, Transition};
use crate::ticker::Ticker;

/// Snapshot of a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerState {
    pub phase: TestPhase,
    pub elapsed: u32,
    pub duration: u32,
    /// Incremented on every start; ticks from other generations are stale.
    pub generation: u64,
}

impl TimerState {
    pub fn new(duration: u32) -> Self {
        Self {
            phase: TestPhase::Idle,
            elapsed: 0,
            duration,
            generation: 0,
        }
    }

    #[inline]
    pub fn remaining(&self) -> u32 {
        self.duration.saturating_sub(self.elapsed)
    }

    /// Fraction of the run completed, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.duration == 0 {
            return 0.0;
        }
        f64::from(self.elapsed.min(self.duration)) / f64::from(self.duration)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Start,
    Tick { generation: u64 },
    Reset,
}

/// Pure transition function: `(event, state) -> (state', effect)`.
pub fn apply(event: TimerEvent, state: &TimerState) -> (TimerState, Transition) {
    let mut next = *state;
    match event {
        TimerEvent::Start => {
            // Only an idle timer can start; a finished run must be reset first.
            if state.phase != TestPhase::Idle {
                return (next, Transition::Ignored);
            }
            next.phase = TestPhase::Running;
            next.elapsed = 0;
            next.generation = state.generation.wrapping_add(1);
            (next, Transition::Started)
        }
        TimerEvent::Tick { generation } => {
            if state.phase != TestPhase::Running || generation != state.generation {
                return (next, Transition::Ignored);
            }
            next.elapsed = state.elapsed.saturating_add(1);
            if next.elapsed >= state.duration {
                next.elapsed = state.duration;
                next.phase = TestPhase::Done;
                (next, Transition::Completed)
            } else {
                (
                    next,
                    Transition::Ticked {
                        elapsed: next.elapsed,
                    },
                )
            }
        }
        TimerEvent::Reset => {
            next.phase = TestPhase::Idle;
            next.elapsed = 0;
            (next, Transition::Reset)
        }
    }
}

/// Owner of one countdown and at most one tick source.
pub struct TimerController {
    state: TimerState,
    period: Duration,
    ticker: Option<Ticker>,
}

impl core::fmt::Debug for TimerController {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TimerController")
            .field("state", &self.state)
            .field("period", &self.period)
            .field("ticking", &self.ticker.is_some())
            .finish()
    }
}

impl TimerController {
    pub fn new(duration: u32, period: Duration) -> Result<Self> {
        if duration == 0 {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "duration must be >= 1 tick",
            )));
        }
        if period.is_zero() {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "tick period must be > 0",
            )));
        }
        Ok(Self {
            state: TimerState::new(duration),
            period,
            ticker: None,
        })
    }

    #[inline]
    pub fn state(&self) -> &TimerState {
        &self.state
    }
    #[inline]
    pub fn phase(&self) -> TestPhase {
        self.state.phase
    }
    #[inline]
    pub fn elapsed(&self) -> u32 {
        self.state.elapsed
    }
    #[inline]
    pub fn remaining(&self) -> u32 {
        self.state.remaining()
    }
    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }
    #[inline]
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    /// Start without a tick source; the caller drives [`Self::tick`].
    pub fn start(&mut self) -> Transition {
        self.commit(TimerEvent::Start)
    }

    /// Start and spawn a background ticker at the configured period.
    ///
    /// A no-op while Running or Done, so at most one ticker exists.
    pub fn start_ticking(&mut self) -> Transition {
        let tr = self.commit(TimerEvent::Start);
        if tr == Transition::Started {
            self.ticker = Some(Ticker::spawn(self.state.generation, self.period));
        }
        tr
    }

    /// Advance by one tick of the current run.
    pub fn tick(&mut self) -> Transition {
        self.commit(TimerEvent::Tick {
            generation: self.state.generation,
        })
    }

    /// Feed a tick that was stamped with `generation`.
    pub fn tick_from(&mut self, generation: u64) -> Transition {
        self.commit(TimerEvent::Tick { generation })
    }

    /// Wait up to `timeout` for the next background tick and apply it.
    ///
    /// Returns `None` when no tick arrived or no ticker is running.
    pub fn next_tick(&mut self, timeout: Duration) -> Option<Transition> {
        let generation = self.ticker.as_ref()?.recv_timeout(timeout)?;
        Some(self.tick_from(generation))
    }

    /// Return to Idle. The tick source is cancelled first.
    pub fn reset(&mut self) -> Transition {
        self.cancel_ticker();
        self.commit(TimerEvent::Reset)
    }

    /// Release the tick source and consume the controller.
    pub fn dispose(mut self) {
        self.cancel_ticker();
    }

    fn cancel_ticker(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }

    fn commit(&mut self, event: TimerEvent) -> Transition {
        let (next, tr) = apply(event, &self.state);
        if tr == Transition::Completed {
            // Stop the source before Done becomes observable.
            self.cancel_ticker();
        }
        match tr {
            Transition::Ignored => {
                tracing::trace!(?event, phase = %self.state.phase, "timer event ignored")
            }
            Transition::Ticked { elapsed } => {
                tracing::trace!(elapsed, duration = next.duration, "tick")
            }
            _ => tracing::debug!(
                from = %self.state.phase,
                to = %next.phase,
                elapsed = next.elapsed,
                generation = next.generation,
                "timer transition"
            ),
        }
        self.state = next;
        tr
    }
}

impl Drop for TimerController {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_is_only_accepted_from_idle() {
        let s = TimerState::new(3);
        let (running, tr) = apply(TimerEvent::Start, &s);
        assert_eq!(tr, Transition::Started);
        assert_eq!(running.generation, 1);

        let (again, tr) = apply(TimerEvent::Start, &running);
        assert_eq!(tr, Transition::Ignored);
        assert_eq!(again, running);

        let mut done = running;
        done.phase = TestPhase::Done;
        assert_eq!(apply(TimerEvent::Start, &done).1, Transition::Ignored);
    }

    #[test]
    fn stale_generation_is_ignored() {
        let s = TimerState::new(3);
        let (running, _) = apply(TimerEvent::Start, &s);
        let (after, tr) = apply(TimerEvent::Tick { generation: 0 }, &running);
        assert_eq!(tr, Transition::Ignored);
        assert_eq!(after.elapsed, 0);
    }

    #[test]
    fn ticks_outside_running_are_ignored() {
        let s = TimerState::new(3);
        assert_eq!(
            apply(TimerEvent::Tick { generation: 0 }, &s).1,
            Transition::Ignored
        );
    }

    #[test]
    fn completes_on_the_last_tick() {
        let mut s = apply(TimerEvent::Start, &TimerState::new(2)).0;
        let g = s.generation;
        let (n, tr) = apply(TimerEvent::Tick { generation: g }, &s);
        assert_eq!(tr, Transition::Ticked { elapsed: 1 });
        s = n;
        let (n, tr) = apply(TimerEvent::Tick { generation: g }, &s);
        assert_eq!(tr, Transition::Completed);
        assert_eq!(n.phase, TestPhase::Done);
        assert_eq!(n.elapsed, 2);
        assert_eq!(n.remaining(), 0);
        assert_eq!(n.progress(), 1.0);
    }

    #[test]
    fn rejects_zero_duration_and_period() {
        assert!(TimerController::new(0, Duration::from_secs(1)).is_err());
        assert!(TimerController::new(5, Duration::ZERO).is_err());
    }
}
