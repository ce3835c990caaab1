//! Clinician roster and single-patient monitor views.

use std::error::Error;
use std::fmt::{self, Write};

use tremor_config::{Alert, DashboardFixtures, Patient};
use tremor_core::{RosterStats, Severity};
use tremor_traits::{ChartKind, ChartOptions, ChartPoint, ChartSink, Stroke};

use crate::cards::{MetricCard, PLACEHOLDER, Tone};
use crate::dashboard::series_points;

/// Tremor index axis for intensity and weekly charts.
pub const INTENSITY_DOMAIN: (f64, f64) = (0.0, 10.0);
/// Accelerometer preview axis.
pub const RAW_SIGNAL_DOMAIN: (f64, f64) = (-4.0, 4.0);

impl From<Severity> for Tone {
    fn from(s: Severity) -> Self {
        match s {
            Severity::Normal => Self::Good,
            Severity::Moderate => Self::Warn,
            Severity::High => Self::Bad,
        }
    }
}

pub fn severity_badge(s: Severity) -> String {
    format!("[{s}]")
}

pub fn roster_cards(stats: &RosterStats) -> Vec<MetricCard> {
    let high_tone = if stats.high_severity > 0 {
        Tone::Bad
    } else {
        Tone::Good
    };
    let alert_tone = if stats.active_alerts > 0 {
        Tone::Warn
    } else {
        Tone::Good
    };
    let (mean, mean_tone) = stats.mean_score.map_or_else(
        || (PLACEHOLDER.to_string(), Tone::Neutral),
        |m| (format!("{m:.1}"), Severity::from_score(m).into()),
    );
    vec![
        MetricCard {
            label: "Patients",
            value: stats.total.to_string(),
            unit: "",
            tone: Tone::Neutral,
        },
        MetricCard {
            label: "High Severity",
            value: stats.high_severity.to_string(),
            unit: "",
            tone: high_tone,
        },
        MetricCard {
            label: "Active Alerts",
            value: stats.active_alerts.to_string(),
            unit: "",
            tone: alert_tone,
        },
        MetricCard {
            label: "Avg Index",
            value: mean,
            unit: "/10",
            tone: mean_tone,
        },
    ]
}

/// One row per patient; empty rosters say so instead of printing a bare header.
pub fn render_roster(out: &mut String, patients: &[&Patient]) -> fmt::Result {
    writeln!(out, "Patient Registry")?;
    if patients.is_empty() {
        return writeln!(out, "  (no matching patients)");
    }
    writeln!(
        out,
        "  {:<16} {:<8} {:<14} {:<15} {}",
        "Name", "ID", "Connected", "Last Reading", "Index"
    )?;
    for p in patients {
        writeln!(
            out,
            "  {:<16} {:<8} {:<14} {:<15} {:.1}/10",
            p.name,
            p.id,
            p.connected,
            severity_badge(Severity::from_reading(&p.reading)),
            p.score
        )?;
    }
    Ok(())
}

pub fn render_alerts(out: &mut String, alerts: &[Alert]) -> fmt::Result {
    writeln!(out, "Alerts ({} new)", alerts.len())?;
    for a in alerts {
        let level = Severity::from_alert_level(&a.level);
        writeln!(out, "  {} {}: {} ({})", severity_badge(level), a.patient, a.msg, a.time)?;
    }
    Ok(())
}

/// Intensity, weekly comparison and raw-signal charts for one patient.
pub fn render_monitor<S: ChartSink + ?Sized>(
    fx: &DashboardFixtures,
    raw_signal: &[f64],
    sink: &mut S,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    sink.render(
        "Real-Time Tremor Intensity",
        &series_points(&fx.realtime_intensity),
        &ChartOptions::area(INTENSITY_DOMAIN),
    )?;

    let this_week: Vec<ChartPoint> = fx
        .weekly_comparison
        .iter()
        .map(|w| ChartPoint::new(w.day.clone(), w.this_week))
        .collect();
    let last_week: Vec<ChartPoint> = fx
        .weekly_comparison
        .iter()
        .map(|w| ChartPoint::new(w.day.clone(), w.last_week))
        .collect();
    let line = ChartOptions {
        kind: ChartKind::Line,
        domain: Some(INTENSITY_DOMAIN),
        stroke: Stroke {
            width: 2.5,
            dashed: false,
        },
    };
    sink.render("Weekly Tremor Trend: this week", &this_week, &line)?;
    sink.render(
        "Weekly Tremor Trend: last week",
        &last_week,
        &ChartOptions {
            stroke: Stroke {
                width: 2.0,
                dashed: true,
            },
            ..line
        },
    )?;

    let raw: Vec<ChartPoint> = raw_signal
        .iter()
        .enumerate()
        .map(|(i, v)| ChartPoint::new(i.to_string(), *v))
        .collect();
    sink.render(
        "Raw Sensor Signal Preview",
        &raw,
        &ChartOptions {
            kind: ChartKind::Line,
            domain: Some(RAW_SIGNAL_DOMAIN),
            stroke: Stroke {
                width: 1.5,
                dashed: false,
            },
        },
    )?;
    Ok(())
}
