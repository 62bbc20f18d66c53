//! SVG markup for the chart renderers.
//!
//! Takes positions computed in [`super::geometry`] and turns them into
//! elements. Coordinates are printed with two decimals.

use super::geometry::PlotArea;

const FONT_STYLE: &str = "<style>text{font-family:'DM Sans','Segoe UI',sans-serif;}</style>";
const AXIS_COLOR: &str = "#4f5a9c";
const TITLE_COLOR: &str = "#ffffff";
const LABEL_COLOR: &str = "#d6dcff";
const VALUE_COLOR: &str = "#f4f6ff";

/// Distance between the x axis and the category labels.
pub const LABEL_OFFSET: f64 = 24.0;

/// Escape text content and attribute values.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&apos;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Values are labeled as whole numbers, truncated toward zero.
pub fn format_value(value: f64) -> String {
    format!("{}", value.trunc() as i64)
}

/// An SVG document under construction.
pub struct SvgCanvas {
    parts: Vec<String>,
}

impl SvgCanvas {
    /// Open a document with background, title and both axes.
    pub fn new(area: &PlotArea, title: &str, background: &str) -> Self {
        let (w, h, m) = (area.width, area.height, area.margin);
        let parts = vec![
            format!("<svg xmlns='http://www.w3.org/2000/svg' width='{}' height='{}'>", w, h),
            FONT_STYLE.to_string(),
            format!("<rect x='0' y='0' width='{}' height='{}' fill='{}' rx='16'/>", w, h, background),
            format!(
                "<text x='{}' y='{:.2}' fill='{}' font-size='24' font-weight='600'>{}</text>",
                m,
                m / 1.8,
                TITLE_COLOR,
                escape_text(title)
            ),
            // x axis
            format!(
                "<line x1='{}' y1='{}' x2='{}' y2='{}' stroke='{}' stroke-width='2'/>",
                m,
                h - m,
                w - m,
                h - m,
                AXIS_COLOR
            ),
            // y axis
            format!(
                "<line x1='{}' y1='{}' x2='{}' y2='{}' stroke='{}' stroke-width='2'/>",
                m,
                m,
                m,
                h - m,
                AXIS_COLOR
            ),
        ];
        Self { parts }
    }

    pub fn bar(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) {
        self.parts.push(format!(
            "<rect x='{:.2}' y='{:.2}' width='{:.2}' height='{:.2}' fill='{}' rx='8'/>",
            x,
            y,
            width,
            height,
            escape_text(color)
        ));
    }

    pub fn marker(&mut self, x: f64, y: f64, color: &str) {
        self.parts.push(format!(
            "<circle cx='{:.2}' cy='{:.2}' r='6' fill='{}' />",
            x,
            y,
            escape_text(color)
        ));
    }

    /// Straight segments through `points`, in order.
    pub fn polyline(&mut self, points: &[(f64, f64)], color: &str) {
        let path = points
            .iter()
            .map(|(x, y)| format!("{:.2} {:.2}", x, y))
            .collect::<Vec<_>>()
            .join(" L ");
        self.parts.push(format!(
            "<path d='M {}' fill='none' stroke='{}' stroke-width='4' stroke-linecap='round' stroke-linejoin='round' opacity='0.85'/>",
            path,
            escape_text(color)
        ));
    }

    /// Category label under the x axis.
    pub fn label(&mut self, x: f64, baseline: f64, text: &str) {
        self.parts.push(format!(
            "<text x='{:.2}' y='{}' fill='{}' font-size='14' text-anchor='middle'>{}</text>",
            x,
            baseline + LABEL_OFFSET,
            LABEL_COLOR,
            escape_text(text)
        ));
    }

    /// Value label above a bar or marker.
    pub fn value(&mut self, x: f64, y: f64, value: f64) {
        self.parts.push(format!(
            "<text x='{:.2}' y='{:.2}' fill='{}' font-size='16' text-anchor='middle'>{}</text>",
            x,
            y,
            VALUE_COLOR,
            format_value(value)
        ));
    }

    pub fn finish(mut self) -> String {
        self.parts.push("</svg>".to_string());
        self.parts.concat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("Kids' TV"), "Kids&apos; TV");
        assert_eq!(escape_text("Action & Adventure"), "Action &amp; Adventure");
        assert_eq!(escape_text("<b>"), "&lt;b&gt;");
    }

    #[test]
    fn test_format_value_truncates() {
        assert_eq!(format_value(12.0), "12");
        assert_eq!(format_value(7.9), "7");
    }
}
