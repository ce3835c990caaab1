//! Data handed to the chart collaborator.
//!
//! The kernel never draws. It produces labelled points and display hints and
//! passes them to whatever implements [`ChartSink`].

use std::error::Error;

/// One labelled sample of a series.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

impl ChartPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Line,
    Area,
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub dashed: bool,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            width: 2.0,
            dashed: false,
        }
    }
}

/// Display hints; a sink is free to ignore any of them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChartOptions {
    pub kind: ChartKind,
    /// Fixed y-axis bounds. `None` lets the sink fit the data.
    pub domain: Option<(f64, f64)>,
    pub stroke: Stroke,
}

impl ChartOptions {
    pub fn bar() -> Self {
        Self {
            kind: ChartKind::Bar,
            ..Self::default()
        }
    }

    pub fn area(domain: (f64, f64)) -> Self {
        Self {
            kind: ChartKind::Area,
            domain: Some(domain),
            stroke: Stroke {
                width: 1.5,
                dashed: false,
            },
        }
    }
}

pub trait ChartSink {
    fn render(
        &mut self,
        title: &str,
        points: &[ChartPoint],
        opts: &ChartOptions,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;
}
