#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema, dashboard fixtures, and CSV inputs for the assessment tools.
//!
//! - `Config` and its sections are deserialized from TOML and validated.
//!   Every section has defaults, so an empty file is a valid config.
//! - Dashboard fixtures (trend series, summary cards, patient roster, alerts,
//!   intensity and weekly series) default to the stock demo values and can be
//!   replaced from TOML; the stability trend also from a `label,value` CSV.
//! - Trace point files are `x,y` CSVs in client coordinates.
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HoldCfg {
    /// Test length in ticks (seconds at the default tick period).
    pub duration_s: u32,
    /// Tick period in milliseconds.
    pub tick_ms: u64,
    /// Fluctuation samples captured per tick.
    pub samples_per_tick: usize,
}

impl Default for HoldCfg {
    fn default() -> Self {
        Self {
            duration_s: 10,
            tick_ms: 1000,
            samples_per_tick: 4,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TapCfg {
    pub duration_s: u32,
    pub tick_ms: u64,
    /// Target inter-tap interval; deviation from it costs rhythm points.
    pub ideal_gap_ms: f64,
    pub rhythm_min_taps: usize,
    pub fatigue_min_taps: usize,
    /// Gaps averaged at each end of the run for the fatigue comparison.
    pub fatigue_window: usize,
    /// Most recent gaps shown in the gap chart.
    pub chart_bars: usize,
}

impl Default for TapCfg {
    fn default() -> Self {
        Self {
            duration_s: 15,
            tick_ms: 1000,
            ideal_gap_ms: 500.0,
            rhythm_min_taps: 3,
            fatigue_min_taps: 6,
            fatigue_window: 3,
            chart_bars: 20,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TraceCfg {
    /// y coordinate of the reference line, in surface pixels.
    pub target_y: f64,
    pub min_points: usize,
    pub surface_width: f64,
    pub surface_height: f64,
}

impl Default for TraceCfg {
    fn default() -> Self {
        Self {
            target_y: 90.0,
            min_points: 5,
            surface_width: 460.0,
            surface_height: 180.0,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct SimulationCfg {
    /// Seed for every simulator; absent means seeded from entropy.
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

impl SeriesPoint {
    fn new(label: &str, value: f64) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SummaryStat {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub unit: String,
}

impl SummaryStat {
    fn new(label: &str, value: &str, unit: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
            unit: unit.to_string(),
        }
    }
}

/// One monitored patient as listed in the roster.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Patient {
    pub id: String,
    pub name: String,
    /// Date the sensor was paired, free text.
    pub connected: String,
    /// Last reading label: "High Tremor", "Moderate" or "Normal".
    pub reading: String,
    /// Tremor index on a 0..=10 scale.
    pub score: f64,
}

impl Patient {
    fn new(id: &str, name: &str, connected: &str, reading: &str, score: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            connected: connected.to_string(),
            reading: reading.to_string(),
            score,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Alert {
    pub patient: String,
    pub msg: String,
    pub time: String,
    /// "high" or "moderate".
    pub level: String,
}

impl Alert {
    fn new(patient: &str, msg: &str, time: &str, level: &str) -> Self {
        Self {
            patient: patient.to_string(),
            msg: msg.to_string(),
            time: time.to_string(),
            level: level.to_string(),
        }
    }
}

/// Average tremor index for one weekday, this week against last.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct WeeklyPoint {
    pub day: String,
    pub this_week: f64,
    pub last_week: f64,
}

/// Demo data shown next to the live tests.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DashboardFixtures {
    pub stability_trend: Vec<SeriesPoint>,
    pub reaction_trend: Vec<SeriesPoint>,
    pub summary: Vec<SummaryStat>,
    pub patients: Vec<Patient>,
    pub alerts: Vec<Alert>,
    /// Tremor intensity over the morning, 0..=10.
    pub realtime_intensity: Vec<SeriesPoint>,
    pub weekly_comparison: Vec<WeeklyPoint>,
}

impl Default for DashboardFixtures {
    fn default() -> Self {
        let stability = [
            ("Mon", 72.0),
            ("Tue", 68.0),
            ("Wed", 65.0),
            ("Thu", 70.0),
            ("Fri", 74.0),
            ("Sat", 71.0),
            ("Sun", 76.0),
        ];
        let reaction = [
            ("1s", 3.0),
            ("3s", 7.0),
            ("5s", 11.0),
            ("7s", 14.0),
            ("9s", 17.0),
            ("11s", 19.0),
            ("13s", 21.0),
            ("15s", 23.0),
        ];
        let intensity = [
            ("09:00", 2.1),
            ("09:05", 3.4),
            ("09:10", 5.2),
            ("09:15", 4.8),
            ("09:20", 6.1),
            ("09:25", 7.3),
            ("09:30", 5.9),
            ("09:35", 4.2),
            ("09:40", 5.8),
            ("09:45", 6.7),
            ("09:50", 4.5),
            ("09:55", 3.8),
        ];
        let weekly = [
            ("Mon", 4.2, 3.8),
            ("Tue", 5.1, 4.2),
            ("Wed", 6.3, 4.8),
            ("Thu", 5.8, 5.1),
            ("Fri", 7.1, 5.3),
            ("Sat", 4.9, 4.6),
            ("Sun", 5.4, 4.2),
        ];
        Self {
            stability_trend: stability
                .iter()
                .map(|(l, v)| SeriesPoint::new(l, *v))
                .collect(),
            reaction_trend: reaction
                .iter()
                .map(|(l, v)| SeriesPoint::new(l, *v))
                .collect(),
            summary: vec![
                SummaryStat::new("Motor Control Score", "6.8", "/10"),
                SummaryStat::new("vs Last Week", "+0.4", ""),
                SummaryStat::new("Stability Index", "71%", ""),
                SummaryStat::new("Reaction Consistency", "82%", ""),
            ],
            patients: vec![
                Patient::new("PT-101", "Riya Patel", "Jan 12, 2025", "Moderate", 5.2),
                Patient::new("PT-102", "Amit Kumar", "Feb 01, 2025", "High Tremor", 8.1),
                Patient::new("PT-103", "Akash Singh", "Nov 28, 2024", "Normal", 2.1),
                Patient::new("PT-104", "Priya Desai", "Mar 05, 2025", "High Tremor", 7.9),
                Patient::new("PT-105", "Suresh Nair", "Dec 15, 2024", "Normal", 1.8),
                Patient::new("PT-106", "Meera Joshi", "Feb 20, 2025", "Moderate", 4.6),
            ],
            alerts: vec![
                Alert::new(
                    "Amit Kumar",
                    "High tremor spike detected, index 8.1",
                    "3 min ago",
                    "high",
                ),
                Alert::new(
                    "Priya Desai",
                    "Medication wearing-off pattern identified",
                    "21 min ago",
                    "high",
                ),
                Alert::new(
                    "Riya Patel",
                    "Tremor frequency elevated, 6.2 Hz sustained",
                    "1 hr ago",
                    "moderate",
                ),
            ],
            realtime_intensity: intensity
                .iter()
                .map(|(l, v)| SeriesPoint::new(l, *v))
                .collect(),
            weekly_comparison: weekly
                .iter()
                .map(|(d, this, last)| WeeklyPoint {
                    day: (*d).to_string(),
                    this_week: *this,
                    last_week: *last,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub hold: HoldCfg,
    pub tap: TapCfg,
    pub trace: TraceCfg,
    pub simulation: SimulationCfg,
    pub logging: Logging,
    pub dashboard: DashboardFixtures,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// Raw pointer sample from a trace CSV, in client coordinates.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct RawPoint {
    pub x: f64,
    pub y: f64,
}

fn open_csv_with_headers(
    path: &std::path::Path,
    expected: &[&str],
) -> eyre::Result<csv::Reader<std::fs::File>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| eyre::eyre!("open CSV {:?}: {}", path, e))?;

    let headers = rdr
        .headers()
        .map_err(|e| eyre::eyre!("read CSV headers {:?}: {}", path, e))?
        .clone();
    let actual: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
    if actual != expected {
        eyre::bail!(
            "CSV must have headers '{}', got: {}",
            expected.join(","),
            actual.join(",")
        );
    }
    Ok(rdr)
}

/// Load a `label,value` series, e.g. a replacement stability trend.
pub fn load_series_csv(path: &std::path::Path) -> eyre::Result<Vec<SeriesPoint>> {
    let mut rdr = open_csv_with_headers(path, &["label", "value"])?;
    let mut out = Vec::new();
    for (idx, rec) in rdr.deserialize::<SeriesPoint>().enumerate() {
        match rec {
            Ok(p) if p.value.is_finite() => out.push(p),
            Ok(_) => eyre::bail!("CSV row {}: value must be finite", idx + 2),
            Err(e) => eyre::bail!("invalid CSV row {}: {}", idx + 2, e),
        }
    }
    Ok(out)
}

/// Load an `x,y` pointer path recorded in client coordinates.
pub fn load_points_csv(path: &std::path::Path) -> eyre::Result<Vec<RawPoint>> {
    let mut rdr = open_csv_with_headers(path, &["x", "y"])?;
    let mut out = Vec::new();
    for (idx, rec) in rdr.deserialize::<RawPoint>().enumerate() {
        match rec {
            Ok(p) if p.x.is_finite() && p.y.is_finite() => out.push(p),
            Ok(_) => eyre::bail!("CSV row {}: coordinates must be finite", idx + 2),
            Err(e) => eyre::bail!("invalid CSV row {}: {}", idx + 2, e),
        }
    }
    Ok(out)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Hold
        if self.hold.duration_s == 0 {
            eyre::bail!("hold.duration_s must be >= 1");
        }
        if self.hold.tick_ms == 0 {
            eyre::bail!("hold.tick_ms must be >= 1");
        }
        if self.hold.samples_per_tick == 0 {
            eyre::bail!("hold.samples_per_tick must be >= 1");
        }
        if self.hold.duration_s > 60 * 60 {
            eyre::bail!("hold.duration_s is unreasonably large (>1h)");
        }

        // Tap
        if self.tap.duration_s == 0 {
            eyre::bail!("tap.duration_s must be >= 1");
        }
        if self.tap.tick_ms == 0 {
            eyre::bail!("tap.tick_ms must be >= 1");
        }
        if !(self.tap.ideal_gap_ms.is_finite() && self.tap.ideal_gap_ms > 0.0) {
            eyre::bail!("tap.ideal_gap_ms must be > 0");
        }
        if self.tap.rhythm_min_taps < 2 {
            eyre::bail!("tap.rhythm_min_taps must be >= 2");
        }
        if self.tap.fatigue_window == 0 {
            eyre::bail!("tap.fatigue_window must be >= 1");
        }
        // The first tap has no gap, so the leading window starts at tap 2.
        if self.tap.fatigue_min_taps < self.tap.fatigue_window * 2 {
            eyre::bail!("tap.fatigue_min_taps must be >= 2 * tap.fatigue_window");
        }

        // Trace
        if !self.trace.target_y.is_finite() || self.trace.target_y < 0.0 {
            eyre::bail!("trace.target_y must be >= 0");
        }
        if self.trace.surface_width <= 0.0 || self.trace.surface_height <= 0.0 {
            eyre::bail!("trace.surface_width and trace.surface_height must be > 0");
        }
        if self.trace.target_y > self.trace.surface_height {
            eyre::bail!("trace.target_y must lie within the surface height");
        }
        if self.trace.min_points == 0 {
            eyre::bail!("trace.min_points must be >= 1");
        }

        // Dashboard
        for p in &self.dashboard.patients {
            if !(p.score.is_finite() && (0.0..=10.0).contains(&p.score)) {
                eyre::bail!("dashboard.patients score for {} must be within 0..=10", p.id);
            }
        }
        for a in &self.dashboard.alerts {
            if !matches!(a.level.as_str(), "high" | "moderate") {
                eyre::bail!("dashboard.alerts level must be one of high|moderate");
            }
        }

        // Logging
        if let Some(rot) = self.logging.rotation.as_deref()
            && !matches!(rot, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly");
        }

        Ok(())
    }
}
