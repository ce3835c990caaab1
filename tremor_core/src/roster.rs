//! Patient roster: search, severity tiers and headline counts.

use core::fmt;

use tremor_config::{Alert, Patient};

use crate::util::{mean, round_tenths};

/// Tremor index at or above which a score is shown as high.
pub const HIGH_SCORE: f64 = 7.0;
/// Tremor index at or above which a score is shown as moderate.
pub const MODERATE_SCORE: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Normal,
    Moderate,
    High,
}

impl Severity {
    /// Tier of a last-reading label. Unrecognised labels read as normal.
    pub fn from_reading(reading: &str) -> Self {
        match reading {
            "High Tremor" => Self::High,
            "Moderate" => Self::Moderate,
            _ => Self::Normal,
        }
    }

    /// Tier of an alert level; anything but "high" is moderate.
    pub fn from_alert_level(level: &str) -> Self {
        if level == "high" { Self::High } else { Self::Moderate }
    }

    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_SCORE {
            Self::High
        } else if score >= MODERATE_SCORE {
            Self::Moderate
        } else {
            Self::Normal
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::High => "High Tremor",
            Self::Moderate => "Moderate",
            Self::Normal => "Normal",
        })
    }
}

/// Patients whose name contains `query` ignoring case, or whose id contains
/// it exactly. An empty query keeps everyone, in roster order.
pub fn filter_patients<'a>(patients: &'a [Patient], query: &str) -> Vec<&'a Patient> {
    let needle = query.to_lowercase();
    patients
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle) || p.id.contains(query))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RosterStats {
    pub total: usize,
    /// Patients whose last reading is "High Tremor".
    pub high_severity: usize,
    pub active_alerts: usize,
    /// Mean tremor index, one decimal; `None` for an empty roster.
    pub mean_score: Option<f64>,
}

pub fn roster_stats(patients: &[Patient], alerts: &[Alert]) -> RosterStats {
    let high_severity = patients
        .iter()
        .filter(|p| Severity::from_reading(&p.reading) == Severity::High)
        .count();
    let mean_score = mean(patients.iter().map(|p| p.score)).map(round_tenths);
    RosterStats {
        total: patients.len(),
        high_severity,
        active_alerts: alerts.len(),
        mean_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_tiers_split_at_four_and_seven() {
        assert_eq!(Severity::from_score(3.9), Severity::Normal);
        assert_eq!(Severity::from_score(4.0), Severity::Moderate);
        assert_eq!(Severity::from_score(6.9), Severity::Moderate);
        assert_eq!(Severity::from_score(7.0), Severity::High);
    }

    #[test]
    fn labels_round_trip_through_display() {
        for s in [Severity::High, Severity::Moderate, Severity::Normal] {
            assert_eq!(Severity::from_reading(&s.to_string()), s);
        }
        assert_eq!(Severity::from_reading("high tremor"), Severity::Normal);
    }
}
