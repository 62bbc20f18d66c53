//! SVG chart rendering.
//!
//! Two chart kinds share one coordinate system: a `width x height` canvas
//! with an equal margin on every side.
//!
//! ```text
//! ┌──────────────────────────────── width ───┐
//! │ Title (margin, margin/1.8)                │
//! │   │        ▇                              │
//! │   │   ▇    █    ▇          plot area      │
//! │   │   █    █    █     (width - 2·margin)  │
//! │   └───────────────────                    │
//! │     label label label                     │
//! └───────────────────────────────────────────┘
//! ```
//!
//! Renderers are pure: `(title, series, options) -> String`. Writing the
//! markup to disk is [`crate::writer`]'s job.
//!
//! # Example
//!
//! ```rust,ignore
//! use insights::chart::{render_bar, ChartOptions};
//! use insights::ChartPoint;
//!
//! let series = vec![ChartPoint::new("India", 12u32), ChartPoint::new("Brazil", 5u32)];
//! let svg = render_bar("Where titles are produced", &series, &ChartOptions::default())?;
//! assert!(svg.starts_with("<svg"));
//! ```

pub mod geometry;
pub mod svg;

use serde::{Deserialize, Serialize};

use crate::error::{ChartResult, ValidationError};
use crate::models::{ChartKind, ChartPoint};
use geometry::{bar_layout, check_values, line_points, PlotArea};
use svg::SvgCanvas;

/// Default bar fill.
pub const DEFAULT_BAR_COLOR: &str = "#5863f8";
/// Default line stroke and marker fill.
pub const DEFAULT_LINE_COLOR: &str = "#ff7f6a";

const BAR_BACKGROUND: &str = "#0b1023";
const LINE_BACKGROUND: &str = "#10172b";

/// Canvas settings. All geometry derives from these four values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
    /// Series color; `None` uses the chart kind's default.
    pub color: Option<String>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 900,
            height: 520,
            margin: 60,
            color: None,
        }
    }
}

impl ChartOptions {
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    fn color_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.color.as_deref().unwrap_or(default)
    }
}

/// Render a bar chart, one bar per point in series order.
pub fn render_bar(title: &str, series: &[ChartPoint], options: &ChartOptions) -> ChartResult<String> {
    if series.is_empty() {
        return Err(ValidationError::EmptySeries {
            title: title.to_string(),
        });
    }
    check_values(series)?;
    let area = PlotArea::from_options(options)?;
    let color = options.color_or(DEFAULT_BAR_COLOR);

    let mut canvas = SvgCanvas::new(&area, title, BAR_BACKGROUND);
    for (point, bar) in series.iter().zip(bar_layout(&area, series)) {
        canvas.bar(bar.x, bar.y, bar.width, bar.height, color);
        canvas.label(bar.center_x(), area.baseline(), &point.label);
        canvas.value(bar.center_x(), bar.y - 8.0, point.value);
    }

    Ok(canvas.finish())
}

/// Render a line chart through at least two points.
pub fn render_line(title: &str, series: &[ChartPoint], options: &ChartOptions) -> ChartResult<String> {
    if series.len() < 2 {
        return Err(ValidationError::TooFewPoints {
            required: 2,
            actual: series.len(),
        });
    }
    check_values(series)?;
    let area = PlotArea::from_options(options)?;
    let color = options.color_or(DEFAULT_LINE_COLOR);
    let points = line_points(&area, series);

    let mut canvas = SvgCanvas::new(&area, title, LINE_BACKGROUND);
    canvas.polyline(&points, color);
    for (point, &(x, y)) in series.iter().zip(&points) {
        canvas.marker(x, y, color);
        canvas.label(x, area.baseline(), &point.label);
        canvas.value(x, y - 12.0, point.value);
    }

    Ok(canvas.finish())
}

/// Render `series` with the geometry of `kind`.
pub fn render(
    kind: ChartKind,
    title: &str,
    series: &[ChartPoint],
    options: &ChartOptions,
) -> ChartResult<String> {
    match kind {
        ChartKind::Bar => render_bar(title, series, options),
        ChartKind::Line => render_line(title, series, options),
    }
}
