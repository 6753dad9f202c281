//! SVG rendering surface

use crate::config::RenderConfig;
use crate::domain::{Canvas, LineSegment, Point};
use crate::infrastructure::traits::RenderSurface;

/// Strokes every segment with one constant width and colour.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgSurface {
    line_width: f64,
    stroke: String,
    background: Option<String>,
}

impl Default for SvgSurface {
    fn default() -> Self {
        Self::from(&RenderConfig::default())
    }
}

impl From<&RenderConfig> for SvgSurface {
    fn from(config: &RenderConfig) -> Self {
        Self {
            line_width: config.line_width,
            stroke: config.stroke.clone(),
            background: config.background.clone(),
        }
    }
}

impl RenderSurface for SvgSurface {
    fn render(&self, canvas: &Canvas, centre: Point, segments: &[LineSegment]) -> String {
        let mut svg = String::new();
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
            w = canvas.width(),
            h = canvas.height()
        ));
        if let Some(background) = &self.background {
            svg.push_str(&format!(
                "  <rect width=\"100%\" height=\"100%\" fill=\"{}\"/>\n",
                escape_attr(background)
            ));
        }
        svg.push_str(&format!(
            "  <g transform=\"translate({} {})\" stroke=\"{}\" stroke-width=\"{}\" stroke-linecap=\"round\" fill=\"none\">\n",
            centre.x,
            centre.y,
            escape_attr(&self.stroke),
            self.line_width
        ));
        for segment in segments {
            svg.push_str(&format!(
                "    <line x1=\"{:.3}\" y1=\"{:.3}\" x2=\"{:.3}\" y2=\"{:.3}\"/>\n",
                segment.from.x, segment.from.y, segment.to.x, segment.to.y
            ));
        }
        svg.push_str("  </g>\n</svg>\n");
        svg
    }
}

/// Escape a value for use inside a double-quoted XML attribute.
fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
