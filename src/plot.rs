//! Rendering of ranked summaries.
//!
//! [`SvgBarChart`] draws the summary as a horizontal bar chart, one bar per
//! parameter, the most influential parameter at the top. Other output formats
//! plug in through [`SummaryRenderer`].

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::summary::RankedSummary;

/// Writes a ranked summary to a file.
pub trait SummaryRenderer {
    /// File extension of the rendered output, without the dot.
    fn extension(&self) -> &str;

    /// Render `summary` to `path`, replacing any existing file.
    fn render(&self, summary: &RankedSummary, path: &Path) -> Result<()>;
}

/// Horizontal bar chart written as a standalone SVG document.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgBarChart {
    /// Image width in pixels. Default: 800
    pub width: u32,

    /// Height of one bar row in pixels. Default: 32
    pub row_height: u32,

    /// Number of grid lines along the value axis. Default: 5
    pub grid_lines: usize,

    /// Bar fill colour. Default: "#1f77b4"
    pub bar_color: String,
}

impl Default for SvgBarChart {
    fn default() -> Self {
        Self {
            width: 800,
            row_height: 32,
            grid_lines: 5,
            bar_color: "#1f77b4".to_string(),
        }
    }
}

const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 60.0;
const MARGIN_RIGHT: f64 = 30.0;
const CHAR_WIDTH: f64 = 7.0;
const FONT: &str = "font-family=\"sans-serif\" font-size=\"12\"";

impl SvgBarChart {
    /// Build the SVG document for `summary`.
    pub fn to_svg(&self, summary: &RankedSummary) -> Result<String> {
        let mut svg = String::new();
        self.write_svg(summary, &mut svg)?;
        Ok(svg)
    }

    /// Write the SVG document for `summary` to `out`.
    pub fn write_svg<W: fmt::Write>(&self, summary: &RankedSummary, out: &mut W) -> fmt::Result {
        let rows = summary.len().max(1);
        let label_width = summary
            .labels
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0) as f64
            * CHAR_WIDTH;

        let left = 40.0 + label_width + 10.0;
        let width = f64::from(self.width).max(left + MARGIN_RIGHT + 100.0);
        let plot_width = width - left - MARGIN_RIGHT;
        let plot_height = rows as f64 * f64::from(self.row_height);
        let height = MARGIN_TOP + plot_height + MARGIN_BOTTOM;

        let (lo, hi) = value_range(&summary.values);
        let to_x = |v: f64| left + (v - lo) / (hi - lo) * plot_width;
        let zero_x = to_x(0.0);

        writeln!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
            w = width,
            h = height
        )?;
        writeln!(out, "<rect width=\"100%\" height=\"100%\" fill=\"white\"/>")?;
        writeln!(
            out,
            "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"16\">{}</text>",
            left + plot_width / 2.0,
            MARGIN_TOP / 2.0 + 5.0,
            escape(&summary.title)
        )?;

        // Grid and value-axis ticks
        let ticks = self.grid_lines.max(1);
        for t in 0..=ticks {
            let v = lo + (hi - lo) * t as f64 / ticks as f64;
            let x = to_x(v);
            writeln!(
                out,
                "<line x1=\"{x:.2}\" y1=\"{}\" x2=\"{x:.2}\" y2=\"{}\" stroke=\"#dddddd\"/>",
                MARGIN_TOP,
                MARGIN_TOP + plot_height
            )?;
            writeln!(
                out,
                "<text x=\"{x:.2}\" y=\"{}\" text-anchor=\"middle\" {FONT}>{}</text>",
                MARGIN_TOP + plot_height + 16.0,
                format_tick(v)
            )?;
        }

        // Ranked ascending, so the last entry is drawn on the top row
        for (i, (label, value)) in summary.iter().enumerate() {
            let row = summary.len() - 1 - i;
            let y = MARGIN_TOP + row as f64 * f64::from(self.row_height);
            let bar_height = f64::from(self.row_height) * 0.7;
            let bar_y = y + (f64::from(self.row_height) - bar_height) / 2.0;
            let value = if value.is_finite() { value } else { 0.0 };
            let (x0, x1) = if value >= 0.0 {
                (zero_x, to_x(value))
            } else {
                (to_x(value), zero_x)
            };

            writeln!(
                out,
                "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"><title>{}: {}</title></rect>",
                x0,
                bar_y,
                x1 - x0,
                bar_height,
                escape(&self.bar_color),
                escape(label),
                value
            )?;
            writeln!(
                out,
                "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"end\" {FONT}>{}</text>",
                left - 6.0,
                y + f64::from(self.row_height) / 2.0 + 4.0,
                escape(label)
            )?;
        }

        // Axes and axis labels
        writeln!(
            out,
            "<line x1=\"{zero_x:.2}\" y1=\"{}\" x2=\"{zero_x:.2}\" y2=\"{}\" stroke=\"black\"/>",
            MARGIN_TOP,
            MARGIN_TOP + plot_height
        )?;
        writeln!(
            out,
            "<line x1=\"{left}\" y1=\"{y}\" x2=\"{}\" y2=\"{y}\" stroke=\"black\"/>",
            left + plot_width,
            y = MARGIN_TOP + plot_height
        )?;
        writeln!(
            out,
            "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"14\">{}</text>",
            left + plot_width / 2.0,
            height - 15.0,
            escape(&summary.x_label)
        )?;
        writeln!(
            out,
            "<text x=\"15\" y=\"{y}\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"14\" transform=\"rotate(-90 15 {y})\">{}</text>",
            escape(&summary.y_label),
            y = MARGIN_TOP + plot_height / 2.0
        )?;
        writeln!(out, "</svg>")
    }
}

impl SummaryRenderer for SvgBarChart {
    fn extension(&self) -> &str {
        "svg"
    }

    fn render(&self, summary: &RankedSummary, path: &Path) -> Result<()> {
        fs::write(path, self.to_svg(summary)?)?;
        Ok(())
    }
}

/// Value-axis range, always containing zero and never empty.
fn value_range(values: &[f64]) -> (f64, f64) {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let lo = finite.clone().fold(0.0_f64, f64::min);
    let hi = finite.fold(0.0_f64, f64::max);
    if hi - lo > 0.0 {
        (lo, hi)
    } else {
        (lo, lo + 1.0)
    }
}

fn format_tick(v: f64) -> String {
    let a = v.abs();
    if a == 0.0 {
        "0".to_string()
    } else if !(1e-3..1e5).contains(&a) {
        format!("{:.1e}", v)
    } else if a >= 100.0 {
        format!("{:.0}", v)
    } else {
        let s = format!("{:.3}", v);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
