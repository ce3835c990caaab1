//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[inline]
pub fn json_mode() -> bool {
    JSON_MODE.get().copied().unwrap_or(false)
}

#[derive(Parser, Debug)]
#[command(name = "tremor", version, about = "Daily motor assessment")]
pub struct Cli {
    /// Path to config TOML (typed); built-in defaults when omitted
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log and report as JSON lines instead of text
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace); overrides [logging] level
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Steady-hold test: keep still while the countdown runs
    Hold {
        /// Override the countdown tick period
        #[arg(long, value_name = "MS")]
        tick_ms: Option<u64>,
        /// Seed the simulated motion source and scorer
        #[arg(long, value_name = "N")]
        seed: Option<u64>,
    },
    /// Rapid-tap test: each line on stdin is one tap
    Tap {
        /// Override the countdown tick period
        #[arg(long, value_name = "MS")]
        tick_ms: Option<u64>,
        /// Replay scripted taps instead of reading stdin
        #[arg(long, action = ArgAction::SetTrue)]
        simulate: bool,
        /// Base gap between scripted taps
        #[arg(long, value_name = "MS", default_value_t = 500)]
        interval_ms: u64,
        /// Change applied to every successive scripted gap (positive slows down)
        #[arg(long, value_name = "MS", default_value_t = 0, allow_hyphen_values = true)]
        drift_ms: i64,
        /// Uniform jitter on scripted gaps
        #[arg(long, value_name = "MS", default_value_t = 0)]
        jitter_ms: u64,
        /// Seed for scripted jitter
        #[arg(long, value_name = "N")]
        seed: Option<u64>,
    },
    /// Line-trace test: score a pointer path against the target line
    Trace {
        /// Pointer path as CSV with headers 'x,y' (client coordinates)
        #[arg(long, value_name = "FILE", conflicts_with = "simulate")]
        points: Option<PathBuf>,
        /// Width the surface is displayed at (defaults to its intrinsic width)
        #[arg(long, value_name = "W")]
        displayed_width: Option<f64>,
        /// Height the surface is displayed at (defaults to its intrinsic height)
        #[arg(long, value_name = "H")]
        displayed_height: Option<f64>,
        /// Draw a synthetic stroke instead of reading a file
        #[arg(long, action = ArgAction::SetTrue)]
        simulate: bool,
        /// Seed for the synthetic stroke
        #[arg(long, value_name = "N")]
        seed: Option<u64>,
    },
    /// Performance summary from dashboard fixtures
    Summary {
        /// Replacement stability trend as CSV with headers 'label,value'
        #[arg(long, value_name = "FILE")]
        fixtures: Option<PathBuf>,
    },
    /// Patient roster, alerts and headline counts
    Patients {
        /// Keep patients whose name (any case) or id contains this text
        #[arg(long, value_name = "TEXT", default_value = "")]
        search: String,
    },
    /// Single-patient monitor: intensity, weekly trend, raw sensor preview
    Monitor {
        /// Raw signal samples to preview
        #[arg(long, value_name = "N", default_value_t = tremor_sim::PREVIEW_LEN)]
        samples: usize,
        /// Seed for the raw signal noise
        #[arg(long, value_name = "N")]
        seed: Option<u64>,
    },
    /// Validate the configuration and exit
    SelfCheck,
}
