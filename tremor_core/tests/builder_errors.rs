use std::time::Duration;

use rstest::rstest;
use tremor_core::error::BuildError;
use tremor_core::mocks::{FixedScorer, ScriptedMotion};
use tremor_core::{HoldCfg, SteadyHoldTest};

type Hold = SteadyHoldTest<ScriptedMotion, FixedScorer>;

#[rstest]
fn missing_motion_yields_typed_build_error() {
    let err = Hold::builder()
        .with_scorer(FixedScorer(80))
        .build()
        .expect_err("should fail with MissingMotion");
    match err.downcast_ref::<BuildError>() {
        Some(BuildError::MissingMotion) => {}
        other => panic!("expected MissingMotion, got: {other:?}"),
    }
}

#[rstest]
fn missing_scorer_yields_typed_build_error() {
    let err = Hold::builder()
        .with_motion(ScriptedMotion::still())
        .build()
        .expect_err("should fail with MissingScorer");
    match err.downcast_ref::<BuildError>() {
        Some(BuildError::MissingScorer) => {}
        other => panic!("expected MissingScorer, got: {other:?}"),
    }
}

#[rstest]
fn zero_samples_per_tick_is_rejected() {
    let err = Hold::builder()
        .with_motion(ScriptedMotion::still())
        .with_scorer(FixedScorer(80))
        .with_config(HoldCfg {
            samples_per_tick: 0,
            ..HoldCfg::default()
        })
        .build()
        .expect_err("invalid config");
    assert!(matches!(
        err.downcast_ref::<BuildError>(),
        Some(BuildError::InvalidConfig(_))
    ));
}

#[rstest]
#[case(0, Duration::from_secs(1))]
#[case(10, Duration::ZERO)]
fn degenerate_timers_are_rejected(#[case] duration_s: u32, #[case] tick: Duration) {
    let err = Hold::builder()
        .with_motion(ScriptedMotion::still())
        .with_scorer(FixedScorer(80))
        .with_config(HoldCfg {
            duration_s,
            tick,
            ..HoldCfg::default()
        })
        .build()
        .expect_err("invalid timer");
    assert!(matches!(
        err.downcast_ref::<BuildError>(),
        Some(BuildError::InvalidConfig(_))
    ));
}
