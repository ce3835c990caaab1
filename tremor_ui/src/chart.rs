//! A [`ChartSink`] that draws horizontal bars into any `fmt::Write`.

use std::error::Error;
use std::fmt::Write;

use tremor_traits::{ChartKind, ChartOptions, ChartPoint, ChartSink};

pub struct TextChart<W: Write> {
    out: W,
    width: usize,
}

impl TextChart<String> {
    pub fn to_string_buffer(width: usize) -> Self {
        Self::new(String::new(), width)
    }
}

impl<W: Write> TextChart<W> {
    pub fn new(out: W, width: usize) -> Self {
        Self {
            out,
            width: width.max(1),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn bounds(points: &[ChartPoint], opts: &ChartOptions) -> (f64, f64) {
        if let Some(d) = opts.domain {
            return d;
        }
        let lo = points.iter().map(|p| p.value).fold(f64::INFINITY, f64::min);
        let hi = points.iter().map(|p| p.value).fold(f64::NEG_INFINITY, f64::max);
        // Bars grow from zero; lines and areas use the data range.
        if opts.kind == ChartKind::Bar {
            (lo.min(0.0), hi.max(0.0))
        } else {
            (lo, hi)
        }
    }

    fn glyph(opts: &ChartOptions) -> char {
        match opts.kind {
            ChartKind::Bar => '#',
            ChartKind::Area => '=',
            ChartKind::Line if opts.stroke.dashed => '-',
            ChartKind::Line => '*',
        }
    }
}

impl<W: Write> ChartSink for TextChart<W> {
    fn render(
        &mut self,
        title: &str,
        points: &[ChartPoint],
        opts: &ChartOptions,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        writeln!(self.out, "{title}")?;
        if points.is_empty() {
            writeln!(self.out, "  (no data)")?;
            return Ok(());
        }
        let (lo, hi) = Self::bounds(points, opts);
        let span = hi - lo;
        let label_w = points.iter().map(|p| p.label.chars().count()).max().unwrap_or(0);
        let glyph = Self::glyph(opts);
        for p in points {
            let frac = if span > 0.0 {
                ((p.value - lo) / span).clamp(0.0, 1.0)
            } else {
                1.0
            };
            let n = (frac * self.width as f64 + 0.5).floor() as usize;
            let bar: String = std::iter::repeat_n(glyph, n.min(self.width)).collect();
            writeln!(
                self.out,
                "  {:>label_w$} | {:<width$} {}",
                p.label,
                bar,
                p.value,
                width = self.width
            )?;
        }
        Ok(())
    }
}
