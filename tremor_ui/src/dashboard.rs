//! Performance summary rendered from injected fixtures.

use std::error::Error;
use std::fmt::Write;

use tremor_config::{DashboardFixtures, SeriesPoint};
use tremor_traits::{ChartKind, ChartOptions, ChartPoint, ChartSink};

/// Stability trend axis, matching the score scale the cards use.
pub const STABILITY_DOMAIN: (f64, f64) = (50.0, 100.0);

pub fn series_points(series: &[SeriesPoint]) -> Vec<ChartPoint> {
    series
        .iter()
        .map(|p| ChartPoint::new(p.label.clone(), p.value))
        .collect()
}

/// Summary cards as text, then both trends through `sink`.
pub fn render_summary<S: ChartSink + ?Sized>(
    fx: &DashboardFixtures,
    out: &mut String,
    sink: &mut S,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    writeln!(out, "Performance Summary")?;
    for s in &fx.summary {
        writeln!(out, "  {:<22} {}{}", s.label, s.value, s.unit)?;
    }
    sink.render(
        "Motor Stability Trend",
        &series_points(&fx.stability_trend),
        &ChartOptions::area(STABILITY_DOMAIN),
    )?;
    sink.render(
        "Reaction Consistency Graph",
        &series_points(&fx.reaction_trend),
        &ChartOptions {
            kind: ChartKind::Line,
            ..ChartOptions::default()
        },
    )?;
    Ok(())
}
