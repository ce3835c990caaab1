use std::fmt;

use tremor_core::{HoldMetrics, Rating, TapMetrics, TraceMetrics};

/// Shown wherever a metric is unavailable.
pub const PLACEHOLDER: &str = "—";

/// Colour hint for a value; terminals map it to green/yellow/red.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Warn,
    Bad,
    Neutral,
}

impl From<Rating> for Tone {
    fn from(r: Rating) -> Self {
        match r {
            Rating::Good => Self::Good,
            Rating::Moderate => Self::Warn,
            Rating::NeedsAttention => Self::Bad,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricCard {
    pub label: &'static str,
    pub value: String,
    pub unit: &'static str,
    pub tone: Tone,
}

impl MetricCard {
    fn new(label: &'static str, value: String, unit: &'static str, tone: Tone) -> Self {
        Self {
            label,
            value,
            unit,
            tone,
        }
    }
}

impl fmt::Display for MetricCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<14} {}{}", self.label, self.value, self.unit)
    }
}

/// `+12%`, `-5%`, `0%`; the placeholder when there is no value.
pub fn signed_percent(v: Option<i64>) -> String {
    match v {
        Some(p) if p > 0 => format!("+{p}%"),
        Some(p) => format!("{p}%"),
        None => PLACEHOLDER.to_string(),
    }
}

pub fn rating_badge(r: Rating) -> String {
    format!("[{r}]")
}

pub fn countdown(remaining: u32) -> String {
    format!("{remaining}s")
}

/// Fixed-width bar for a progress fraction; out-of-range input is clamped.
pub fn progress_bar(progress: f64, width: usize) -> String {
    let p = if progress.is_finite() {
        progress.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = ((p * width as f64) + 0.5).floor() as usize;
    let filled = filled.min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

pub fn hold_cards(m: Option<&HoldMetrics>) -> Vec<MetricCard> {
    let (value, tone) = m.map_or_else(
        || (PLACEHOLDER.to_string(), Tone::Neutral),
        |m| (m.stability_score.to_string(), m.rating.into()),
    );
    let unit = if m.is_some() { "/100" } else { "" };
    vec![MetricCard::new("Stability", value, unit, tone)]
}

pub fn trace_cards(m: Option<&TraceMetrics>) -> Vec<MetricCard> {
    let Some(m) = m else {
        return vec![
            MetricCard::new("Avg Deviation", PLACEHOLDER.into(), "", Tone::Neutral),
            MetricCard::new("Smoothness", PLACEHOLDER.into(), "", Tone::Neutral),
        ];
    };
    let smooth_tone = match m.smoothness {
        70.. => Tone::Good,
        45..70 => Tone::Warn,
        _ => Tone::Bad,
    };
    vec![
        MetricCard::new(
            "Avg Deviation",
            m.average_deviation.to_string(),
            "px",
            m.rating.into(),
        ),
        MetricCard::new("Smoothness", m.smoothness.to_string(), "", smooth_tone),
    ]
}

pub fn tap_cards(m: Option<&TapMetrics>) -> Vec<MetricCard> {
    let tps = m.map_or_else(|| PLACEHOLDER.to_string(), |m| format!("{:.1}", m.taps_per_second));
    let rhythm = m.and_then(|m| m.rhythm_score);
    let fatigue = m.and_then(|m| m.fatigue_index_percent);
    let rhythm_tone = match rhythm {
        Some(r) if r >= 70 => Tone::Good,
        Some(_) => Tone::Warn,
        None => Tone::Neutral,
    };
    let fatigue_tone = match fatigue {
        Some(f) if f <= 15 => Tone::Good,
        Some(_) => Tone::Bad,
        None => Tone::Neutral,
    };
    vec![
        MetricCard::new("Taps/sec", tps, "", Tone::Neutral),
        MetricCard::new(
            "Rhythm Score",
            rhythm.map_or_else(|| PLACEHOLDER.to_string(), |r| r.to_string()),
            "",
            rhythm_tone,
        ),
        MetricCard::new("Fatigue Index", signed_percent(fatigue), "", fatigue_tone),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatigue_sign_matches_display() {
        assert_eq!(signed_percent(Some(12)), "+12%");
        assert_eq!(signed_percent(Some(-5)), "-5%");
        assert_eq!(signed_percent(Some(0)), "0%");
        assert_eq!(signed_percent(None), "—");
    }

    #[test]
    fn progress_bar_clamps() {
        assert_eq!(progress_bar(0.5, 4), "[##--]");
        assert_eq!(progress_bar(2.0, 3), "[###]");
        assert_eq!(progress_bar(f64::NAN, 2), "[--]");
    }
}
