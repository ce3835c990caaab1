#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Motor assessment kernel (UI-agnostic).
//!
//! Three mini-tests share one countdown state machine. Rendering, input
//! devices, and randomness all come in through `tremor_traits`, so every
//! score here is deterministic given its inputs.
//!
//! ## Architecture
//!
//! - **Timer**: pure `apply(event, state)` transitions plus a controller that
//!   owns the background ticker (`timer`, `ticker`)
//! - **Capture**: client to surface coordinate normalization (`capture`)
//! - **Trace**: deviation/smoothness scoring of a drawn line (`trace`)
//! - **Tap**: speed, rhythm, and fatigue from tap gaps (`tap`)
//! - **Hold**: stability via a pluggable scorer (`hold`, `builder`)
//! - **Runner**: blocking wait loop with shutdown and stall handling (`runner`)
//! - **Roster**: patient search and severity tiers for the clinician view (`roster`)
//!
//! Derived metrics are computed once, on the Running -> Done edge, and stay
//! frozen until the test is reset.

pub mod builder;
pub mod capture;
pub mod config;
pub mod conversions;
pub mod error;
pub mod hold;
pub mod mocks;
pub mod phase;
pub mod rating;
pub mod roster;
pub mod runner;
pub mod tap;
pub mod ticker;
pub mod timer;
pub mod trace;
pub mod util;

pub use builder::SteadyHoldTestBuilder;
pub use capture::{FixedSurface, PointerEvent, TracePoint, to_surface};
pub use config::{HoldCfg, TapCfg, TraceCfg};
pub use error::{AssessError, BuildError};
pub use hold::{HoldMetrics, SteadyHoldTest, TimedSample};
pub use phase::{TestPhase, Transition};
pub use rating::Rating;
pub use roster::{RosterStats, Severity, filter_patients, roster_stats};
pub use runner::{RunOutcome, TimedTest, run_until_done, run_with_input};
pub use tap::{RapidTapTest, TapEvent, TapMetrics, TapRhythmAnalyzer};
pub use timer::{TimerController, TimerEvent, TimerState, apply};
pub use trace::{TraceMetrics, TraceScorer, TraceState};
