//! Drive a ticking test to completion on the caller's thread.
//!
//! The runner owns the wait loop: it pulls ticks from the test's background
//! ticker, hands control to a per-poll callback (render a countdown, feed
//! input), honours a shutdown flag, and watches for a stalled tick source.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tremor_traits::{Clock, MotionSource, StabilityScorer};

use crate::error::{AssessError, Result};
use crate::hold::SteadyHoldTest;
use crate::phase::{TestPhase, Transition};
use crate::tap::RapidTapTest;

/// Common surface of the countdown-driven tests.
pub trait TimedTest {
    fn phase(&self) -> TestPhase;
    fn is_ticking(&self) -> bool;
    fn tick_period(&self) -> Duration;
    fn next_tick(&mut self, timeout: Duration) -> Option<Transition>;
    fn reset(&mut self) -> Transition;
}

impl<M: MotionSource, S: StabilityScorer> TimedTest for SteadyHoldTest<M, S> {
    fn phase(&self) -> TestPhase {
        SteadyHoldTest::phase(self)
    }
    fn is_ticking(&self) -> bool {
        SteadyHoldTest::is_ticking(self)
    }
    fn tick_period(&self) -> Duration {
        self.timer.period()
    }
    fn next_tick(&mut self, timeout: Duration) -> Option<Transition> {
        SteadyHoldTest::next_tick(self, timeout)
    }
    fn reset(&mut self) -> Transition {
        SteadyHoldTest::reset(self)
    }
}

impl<C: Clock> TimedTest for RapidTapTest<C> {
    fn phase(&self) -> TestPhase {
        RapidTapTest::phase(self)
    }
    fn is_ticking(&self) -> bool {
        RapidTapTest::is_ticking(self)
    }
    fn tick_period(&self) -> Duration {
        self.tick_period()
    }
    fn next_tick(&mut self, timeout: Duration) -> Option<Transition> {
        RapidTapTest::next_tick(self, timeout)
    }
    fn reset(&mut self) -> Transition {
        RapidTapTest::reset(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    /// Shutdown was requested or the callback reset the test.
    Cancelled,
}

/// How long without a tick before the source is declared stalled.
///
/// Four periods tolerates scheduler hiccups; never below 50 ms so very short
/// test periods are not flagged on a busy machine.
#[inline]
pub fn stall_threshold(period: Duration) -> Duration {
    period.saturating_mul(4).max(Duration::from_millis(50))
}

/// Poll interval: short enough for responsive input, at most one period.
#[inline]
pub fn poll_interval(period: Duration) -> Duration {
    period.min(Duration::from_millis(10)).max(Duration::from_millis(1))
}

/// Block until `test` reaches Done, is cancelled, or its ticker stalls.
///
/// `on_poll` runs after every wait with the transition that was applied, or
/// `None` when the wait timed out.
pub fn run_until_done<T, F>(test: &mut T, shutdown: &AtomicBool, on_poll: F) -> Result<RunOutcome>
where
    T: TimedTest,
    F: FnMut(&mut T, Option<Transition>) -> Result<()>,
{
    run_with_input(test, shutdown, |_| Ok(()), on_poll)
}

/// [`run_until_done`] with an input hook.
///
/// `feed` runs before every wait, so input queued while Running lands before
/// a tick that would complete the run.
pub fn run_with_input<T, I, F>(
    test: &mut T,
    shutdown: &AtomicBool,
    mut feed: I,
    mut on_poll: F,
) -> Result<RunOutcome>
where
    T: TimedTest,
    I: FnMut(&mut T) -> Result<()>,
    F: FnMut(&mut T, Option<Transition>) -> Result<()>,
{
    match test.phase() {
        TestPhase::Idle => {
            return Err(AssessError::State("test has not been started".into()).into());
        }
        TestPhase::Done => return Ok(RunOutcome::Completed),
        TestPhase::Running => {}
    }
    if !test.is_ticking() {
        return Err(AssessError::State("running without a tick source".into()).into());
    }

    let period = test.tick_period();
    let poll = poll_interval(period);
    let stall = stall_threshold(period);
    let mut last_tick = Instant::now();

    loop {
        if shutdown.load(Ordering::Relaxed) {
            test.reset();
            tracing::info!("run cancelled by shutdown request");
            return Ok(RunOutcome::Cancelled);
        }

        feed(test)?;
        let tr = test.next_tick(poll);
        if tr.is_some_and(Transition::advanced) {
            last_tick = Instant::now();
        }
        on_poll(test, tr)?;

        match test.phase() {
            TestPhase::Done => return Ok(RunOutcome::Completed),
            TestPhase::Idle => return Ok(RunOutcome::Cancelled),
            TestPhase::Running => {}
        }

        if last_tick.elapsed() > stall {
            test.reset();
            tracing::error!(?stall, "tick source stalled");
            return Err(AssessError::State("tick source stalled".into()).into());
        }
    }
}
