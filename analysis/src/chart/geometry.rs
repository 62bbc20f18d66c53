//! Chart geometry: canvas layout and value scaling.
//!
//! Everything here is a pure function of the options and the values, so
//! positions can be checked without looking at markup.

use super::ChartOptions;
use crate::error::{ChartResult, ValidationError};
use crate::models::ChartPoint;

/// Fraction of the plot height the tallest value reaches. The rest is
/// headroom for its value label.
pub const HEADROOM_FACTOR: f64 = 0.85;

/// Fraction of a bar slot the bar itself occupies.
pub const BAR_FILL: f64 = 0.8;

/// Gap between the slot edge and the bar, on each side.
pub const BAR_GUTTER: f64 = 0.1;

/// Canvas region inside the margins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    pub plot_width: f64,
    pub plot_height: f64,
}

impl PlotArea {
    /// Derive the plot area from chart options.
    pub fn from_options(options: &ChartOptions) -> ChartResult<Self> {
        let width = f64::from(options.width);
        let height = f64::from(options.height);
        let margin = f64::from(options.margin);
        let plot_width = width - 2.0 * margin;
        let plot_height = height - 2.0 * margin;

        if plot_width <= 0.0 || plot_height <= 0.0 {
            return Err(ValidationError::InvalidOptions(format!(
                "margin {} leaves no plot area on a {}x{} canvas",
                options.margin, options.width, options.height
            )));
        }

        Ok(Self {
            width,
            height,
            margin,
            plot_width,
            plot_height,
        })
    }

    /// Y coordinate of the x axis.
    pub fn baseline(&self) -> f64 {
        self.height - self.margin
    }

    /// Largest drawable value height.
    pub fn value_cap(&self) -> f64 {
        self.plot_height * HEADROOM_FACTOR
    }

    /// Height a value occupies above the baseline.
    pub fn scaled(&self, value: f64, max_value: f64) -> f64 {
        (value / max_value) * self.value_cap()
    }
}

/// Largest value of the series, or 1 when every value is zero.
pub fn scale_max(series: &[ChartPoint]) -> f64 {
    let max = series.iter().map(|p| p.value).fold(0.0_f64, f64::max);
    if max > 0.0 {
        max
    } else {
        1.0
    }
}

/// Reject values that cannot be plotted.
pub fn check_values(series: &[ChartPoint]) -> ChartResult<()> {
    match series.iter().find(|p| !p.value.is_finite() || p.value < 0.0) {
        Some(point) => Err(ValidationError::InvalidValue {
            label: point.label.clone(),
            value: point.value,
        }),
        None => Ok(()),
    }
}

/// Position of one bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BarGeometry {
    /// Horizontal center of the bar.
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

/// Lay bars out left to right, one equal slot per point.
pub fn bar_layout(area: &PlotArea, series: &[ChartPoint]) -> Vec<BarGeometry> {
    if series.is_empty() {
        return Vec::new();
    }

    let max_value = scale_max(series);
    let slot = area.plot_width / series.len() as f64;

    series
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let height = area.scaled(point.value, max_value);
            BarGeometry {
                x: area.margin + i as f64 * slot + slot * BAR_GUTTER,
                y: area.baseline() - height,
                width: slot * BAR_FILL,
                height,
            }
        })
        .collect()
}

/// Evenly spaced line vertices from the left margin to the right margin.
///
/// Needs at least two points.
pub fn line_points(area: &PlotArea, series: &[ChartPoint]) -> Vec<(f64, f64)> {
    if series.len() < 2 {
        return Vec::new();
    }

    let max_value = scale_max(series);
    let step = area.plot_width / (series.len() - 1) as f64;

    series
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let x = area.margin + i as f64 * step;
            let y = area.baseline() - area.scaled(point.value, max_value);
            (x, y)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> Vec<ChartPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| ChartPoint::new(format!("p{}", i), *v))
            .collect()
    }

    fn default_area() -> PlotArea {
        PlotArea::from_options(&ChartOptions::default()).unwrap()
    }

    #[test]
    fn test_plot_area_defaults() {
        let area = default_area();
        assert_eq!(area.plot_width, 780.0);
        assert_eq!(area.plot_height, 400.0);
        assert_eq!(area.baseline(), 460.0);
    }

    #[test]
    fn test_plot_area_rejects_oversized_margin() {
        let options = ChartOptions {
            margin: 300,
            ..ChartOptions::default()
        };
        assert!(matches!(
            PlotArea::from_options(&options),
            Err(ValidationError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_tallest_bar_hits_cap() {
        let area = default_area();
        let bars = bar_layout(&area, &series(&[3.0, 12.0, 6.0, 0.0]));

        let cap = 0.85 * 400.0;
        assert_eq!(bars[1].height, cap);
        assert_eq!(bars[0].height, cap * 0.25);
        assert_eq!(bars[2].height, cap * 0.5);
        assert_eq!(bars[3].height, 0.0);
        for bar in &bars {
            assert!(bar.height >= 0.0 && bar.height <= cap);
            assert!((bar.y + bar.height - area.baseline()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_bar_slots_and_gutters() {
        let area = default_area();
        let bars = bar_layout(&area, &series(&[1.0, 2.0, 3.0, 4.0]));

        let slot = 780.0 / 4.0;
        assert!((bars[0].width - slot * 0.8).abs() < 1e-9);
        assert!((bars[0].x - (60.0 + slot * 0.1)).abs() < 1e-9);
        assert!((bars[3].x - (60.0 + 3.0 * slot + slot * 0.1)).abs() < 1e-9);
        assert!((bars[0].center_x() - (60.0 + slot / 2.0)).abs() < 1e-9);
    }

    #[test]
    fn test_all_zero_series_scales_against_one() {
        let area = default_area();
        assert_eq!(scale_max(&series(&[0.0, 0.0])), 1.0);
        let bars = bar_layout(&area, &series(&[0.0, 0.0]));
        assert!(bars.iter().all(|b| b.height == 0.0));
    }

    #[test]
    fn test_line_endpoints_on_margins() {
        let area = default_area();
        let points = line_points(&area, &series(&[5.0, 10.0, 2.0, 7.0]));

        assert_eq!(points.len(), 4);
        assert_eq!(points[0].0, 60.0);
        assert!((points[3].0 - 840.0).abs() < 1e-9);
        assert_eq!(points[1].1, area.baseline() - area.value_cap());
    }

    #[test]
    fn test_line_needs_two_points() {
        let area = default_area();
        assert!(line_points(&area, &series(&[5.0])).is_empty());
        assert_eq!(line_points(&area, &series(&[5.0, 1.0])).len(), 2);
    }

    #[test]
    fn test_check_values() {
        assert!(check_values(&series(&[0.0, 3.5])).is_ok());
        assert!(check_values(&series(&[1.0, -2.0])).is_err());
        assert!(check_values(&series(&[f64::NAN])).is_err());
    }
}
