//! Human-readable error descriptions and structured JSON error formatting.

use tremor_core::error::{AssessError, BuildError};
use tremor_sim::SimError;

/// Exit status for a run interrupted by Ctrl-C (128 + SIGINT).
pub const EXIT_CANCELLED: i32 = 130;

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(be) = err.downcast_ref::<BuildError>() {
        return match be {
            BuildError::MissingMotion => {
                "What happened: No motion source was provided to the hold test.\nLikely causes: The simulator failed to initialize or was not wired into the builder.\nHow to fix: Pass a source via with_motion(...).".to_string()
            }
            BuildError::MissingScorer => {
                "What happened: No stability scorer was provided to the hold test.\nLikely causes: The scorer was not wired into the builder.\nHow to fix: Pass a scorer via with_scorer(...).".to_string()
            }
            BuildError::InvalidConfig(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: Zero durations, tick periods, or sample counts.\nHow to fix: Edit the config file or the --tick-ms flag, then rerun."
            ),
        };
    }

    if let Some(ae) = err.downcast_ref::<AssessError>() {
        return match ae {
            AssessError::Cancelled => "Test cancelled; no results were recorded.".to_string(),
            AssessError::State(msg) if msg.contains("stalled") => {
                "What happened: The countdown stopped ticking.\nLikely causes: The machine is heavily loaded or the process was suspended.\nHow to fix: Rerun the test.".to_string()
            }
            other => format!(
                "What happened: {other}.\nLikely causes: See logs.\nHow to fix: Re-run with --log-level=debug or set RUST_LOG for more detail."
            ),
        };
    }

    if let Some(SimError::InvalidParam(msg)) = err.downcast_ref::<SimError>() {
        return format!(
            "What happened: Invalid simulation setting ({msg}).\nHow to fix: Adjust the --interval-ms/--jitter-ms flags or the [simulation] section."
        );
    }

    // String-based heuristics for errors coming from init or config
    let msg = err.to_string();
    let chain = format!("{err:#}");
    let lower = chain.to_ascii_lowercase();

    if lower.contains("csv must have headers") {
        return format!("Invalid headers in CSV. {}", last_cause(err));
    }

    if lower.contains("open csv") || lower.contains("read config") {
        return format!(
            "What happened: An input file could not be opened.\nLikely causes: Wrong path or missing permissions.\nHow to fix: Check the path and rerun. ({})",
            last_cause(err)
        );
    }

    if lower.contains("invalid configuration") || lower.contains("parse config") {
        return format!(
            "What happened: Configuration is invalid.\nLikely causes: {}\nHow to fix: Edit the TOML config and try again.",
            last_cause(err)
        );
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Detail: {msg}"
    )
}

fn last_cause(err: &eyre::Report) -> String {
    err.chain()
        .last()
        .map_or_else(|| err.to_string(), ToString::to_string)
}

/// Stable exit codes: 130 cancelled, 2 bad config/input, 3 stalled, 1 otherwise.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    if let Some(ae) = err.downcast_ref::<AssessError>() {
        return match ae {
            AssessError::Cancelled => EXIT_CANCELLED,
            AssessError::Config(_) => 2,
            AssessError::State(_) => 3,
            AssessError::Source(_) => 1,
        };
    }
    if err.downcast_ref::<BuildError>().is_some() || err.downcast_ref::<SimError>().is_some() {
        return 2;
    }
    let lower = format!("{err:#}").to_ascii_lowercase();
    if lower.contains("invalid configuration") || lower.contains("csv") || lower.contains("config") {
        return 2;
    }
    1
}

pub fn reason_name(err: &eyre::Report) -> &'static str {
    if let Some(ae) = err.downcast_ref::<AssessError>() {
        return match ae {
            AssessError::Cancelled => "Cancelled",
            AssessError::Config(_) => "Config",
            AssessError::State(_) => "State",
            AssessError::Source(_) => "Source",
        };
    }
    if err.downcast_ref::<BuildError>().is_some() {
        return "Build";
    }
    if exit_code_for_error(err) == 2 {
        return "Config";
    }
    "Error"
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;
    json!({
        "reason": reason_name(err),
        "exit_code": exit_code_for_error(err),
        "message": humanize(err),
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_maps_to_130() {
        let err = eyre::Report::new(AssessError::Cancelled);
        assert_eq!(exit_code_for_error(&err), 130);
        assert_eq!(reason_name(&err), "Cancelled");
    }

    #[test]
    fn config_errors_map_to_2() {
        let err = eyre::eyre!("tap.tick_ms must be >= 1").wrap_err("invalid configuration");
        assert_eq!(exit_code_for_error(&err), 2);
        assert!(humanize(&err).contains("tap.tick_ms must be >= 1"));
    }

    #[test]
    fn json_has_reason_and_message() {
        let err = eyre::Report::new(BuildError::MissingScorer);
        let v: serde_json::Value = serde_json::from_str(&format_error_json(&err)).unwrap();
        assert_eq!(v["reason"], "Build");
        assert!(v["message"].as_str().unwrap().contains("scorer"));
    }
}
