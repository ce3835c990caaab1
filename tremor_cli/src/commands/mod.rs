//! One module per subcommand, plus the output helpers they share.

pub mod hold;
pub mod monitor;
pub mod patients;
pub mod summary;
pub mod tap;
pub mod trace;

use std::io::Write;

use tremor_core::Transition;
use tremor_ui::{MetricCard, countdown, progress_bar};

/// Width of the text charts and progress bar.
pub const CHART_WIDTH: usize = 40;

/// Print one JSON object per line on stdout.
pub fn emit_json(value: &serde_json::Value) {
    println!("{value}");
}

pub fn print_cards(title: &str, cards: &[MetricCard]) {
    println!("{title}");
    for c in cards {
        println!("  {c}");
    }
}

/// Redraw the countdown line on stderr after every advancing tick.
pub fn draw_countdown(prompt: &str, tr: Option<Transition>, remaining: u32, progress: f64) {
    if crate::cli::json_mode() || !tr.is_some_and(Transition::advanced) {
        return;
    }
    let mut err = std::io::stderr().lock();
    let _ = write!(
        err,
        "\r{prompt} {:>4} {}",
        countdown(remaining),
        progress_bar(progress, CHART_WIDTH / 2)
    );
    if tr == Some(Transition::Completed) {
        let _ = writeln!(err);
    }
    let _ = err.flush();
}
