#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Plain-text presentation of assessment state.
//!
//! Nothing here decides anything; it only formats what `tremor_core`
//! computed. Missing metrics render as [`PLACEHOLDER`].

pub mod cards;
pub mod chart;
pub mod dashboard;
pub mod patients;

pub use cards::{
    MetricCard, PLACEHOLDER, Tone, countdown, hold_cards, progress_bar, rating_badge, signed_percent,
    tap_cards, trace_cards,
};
pub use chart::TextChart;
pub use dashboard::{render_summary, series_points};
pub use patients::{render_alerts, render_monitor, render_roster, roster_cards, severity_badge};
