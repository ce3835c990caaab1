use std::time::Duration;

use proptest::prelude::*;
use rstest::rstest;
use tremor_core::{TestPhase, TimerController, TimerEvent, TimerState, Transition, apply};

fn controller(duration: u32) -> TimerController {
    TimerController::new(duration, Duration::from_secs(1)).expect("valid timer")
}

proptest! {
    #[test]
    fn emits_exactly_duration_increments(duration in 1u32..120, extra in 0u32..10) {
        let mut t = controller(duration);
        prop_assert_eq!(t.start(), Transition::Started);

        let mut increments = 0;
        let mut completed = 0;
        for _ in 0..(duration + extra) {
            match t.tick() {
                Transition::Ticked { .. } => increments += 1,
                Transition::Completed => { increments += 1; completed += 1; }
                Transition::Ignored => {}
                other => prop_assert!(false, "unexpected transition {:?}", other),
            }
            prop_assert!(t.elapsed() <= duration);
        }
        prop_assert_eq!(increments, duration);
        prop_assert_eq!(completed, 1);
        prop_assert_eq!(t.phase(), TestPhase::Done);
        prop_assert_eq!(t.remaining(), 0);
    }

    #[test]
    fn reset_from_any_point_returns_to_idle(duration in 1u32..30, ticks in 0u32..40) {
        let mut t = controller(duration);
        t.start();
        for _ in 0..ticks {
            t.tick();
        }
        t.reset();
        let once = *t.state();
        t.reset();
        prop_assert_eq!(*t.state(), once);
        prop_assert_eq!(once.phase, TestPhase::Idle);
        prop_assert_eq!(once.elapsed, 0);
        // no tick is observed after reset
        prop_assert_eq!(t.tick(), Transition::Ignored);
        prop_assert_eq!(t.elapsed(), 0);
    }
}

#[rstest]
#[case(TestPhase::Idle)]
#[case(TestPhase::Running)]
#[case(TestPhase::Done)]
fn pure_reset_from_every_phase(#[case] phase: TestPhase) {
    let s = TimerState {
        phase,
        elapsed: 3,
        duration: 10,
        generation: 4,
    };
    let (next, tr) = apply(TimerEvent::Reset, &s);
    assert_eq!(tr, Transition::Reset);
    assert_eq!(next.phase, TestPhase::Idle);
    assert_eq!(next.elapsed, 0);
    assert_eq!(next.duration, 10);
}

#[test]
fn start_while_running_is_a_no_op() {
    let mut t = controller(10);
    t.start();
    t.tick();
    t.tick();
    assert_eq!(t.start(), Transition::Ignored);
    assert_eq!(t.elapsed(), 2);
}

#[test]
fn done_requires_reset_before_restart() {
    let mut t = controller(1);
    t.start();
    assert_eq!(t.tick(), Transition::Completed);
    assert_eq!(t.start(), Transition::Ignored);
    t.reset();
    assert_eq!(t.start(), Transition::Started);
}

#[test]
fn ticks_from_a_previous_run_are_rejected() {
    let mut t = controller(5);
    t.start();
    let old = t.state().generation;
    t.tick();
    t.reset();
    t.start();
    assert_eq!(t.tick_from(old), Transition::Ignored);
    assert_eq!(t.elapsed(), 0);
    assert_eq!(t.tick(), Transition::Ticked { elapsed: 1 });
}
