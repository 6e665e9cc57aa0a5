//! Style resolution for shapes
//!
//! Turns a record's raw style attributes (color string, opacity, stroke
//! weight, line type) into concrete fill and stroke settings.

pub mod color;
pub mod line;
pub mod palette;

pub use color::{shade_color, ColorError, HexColor};
pub use line::{
    resolve_line_style, IconSequence, LineStyle, LineSymbol, StrokeStyle, SymbolPath,
};
pub use palette::Palette;

use crate::geometry::GeometryType;

/// Fill and stroke settings for one shape
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    pub color: HexColor,
    pub hover_color: Option<HexColor>,
    pub opacity: f64,
    pub stroke: StrokeStyle,
}

/// Raw style attributes as read from a record
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleInput<'a> {
    pub color: &'a str,
    pub opacity: Option<f64>,
    pub stroke_weight: Option<f64>,
    pub line_style: LineStyle,
}

/// Resolves raw style attributes against a palette and defaults
#[derive(Debug, Clone)]
pub struct StyleResolver {
    palette: Palette,
    default_color: HexColor,
    default_opacity: f64,
    default_stroke_weight: f64,
    stroke_opacity_factor: f64,
    hover_percentage: f64,
}

impl Default for StyleResolver {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            default_color: HexColor::RED,
            default_opacity: 0.5,
            default_stroke_weight: 2.0,
            stroke_opacity_factor: 3.0,
            hover_percentage: 0.0,
        }
    }
}

impl StyleResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_default_color(mut self, color: HexColor) -> Self {
        self.default_color = color;
        self
    }

    pub fn with_default_opacity(mut self, opacity: f64) -> Self {
        self.default_opacity = opacity;
        self
    }

    pub fn with_default_stroke_weight(mut self, weight: f64) -> Self {
        self.default_stroke_weight = weight;
        self
    }

    /// Stroke opacity is this factor times the fill opacity, capped at 1
    pub fn with_stroke_opacity_factor(mut self, factor: f64) -> Self {
        self.stroke_opacity_factor = factor;
        self
    }

    /// Signed shading applied to the fill color on hover; 0 disables it
    pub fn with_hover_percentage(mut self, percentage: f64) -> Self {
        self.hover_percentage = percentage;
        self
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Resolve a color string, falling back to the default color
    pub fn resolve_color(&self, value: &str) -> HexColor {
        if value.trim().is_empty() {
            return self.default_color;
        }
        match self.palette.resolve(value) {
            Ok(color) => color,
            Err(e) => {
                tracing::warn!(error = %e, fallback = %self.default_color, "unresolvable shape color");
                self.default_color
            }
        }
    }

    /// Resolve all style attributes for a shape of the given geometry
    ///
    /// Line styles only affect polylines; polygon outlines stay solid.
    pub fn resolve(&self, geometry: GeometryType, input: StyleInput<'_>) -> ResolvedStyle {
        let color = self.resolve_color(input.color);
        let opacity = sanitize(input.opacity, self.default_opacity).min(1.0);
        let weight = sanitize(input.stroke_weight, self.default_stroke_weight);
        let stroke_opacity = (self.stroke_opacity_factor * opacity).clamp(0.0, 1.0);

        let line_style = match geometry {
            GeometryType::Polyline => input.line_style,
            GeometryType::Polygon => LineStyle::Solid,
        };

        let hover_color = if self.hover_percentage != 0.0 {
            Some(color.shade(self.hover_percentage))
        } else {
            None
        };

        ResolvedStyle {
            color,
            hover_color,
            opacity,
            stroke: resolve_line_style(line_style, weight, stroke_opacity),
        }
    }
}

/// Non-negative finite value, or the default
fn sanitize(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() => v.max(0.0),
        _ => default.max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(color: &str) -> StyleInput<'_> {
        StyleInput {
            color,
            opacity: Some(0.2),
            stroke_weight: Some(3.0),
            line_style: LineStyle::Dashed,
        }
    }

    #[test]
    fn test_polyline_gets_icons() {
        let style = StyleResolver::new().resolve(GeometryType::Polyline, input("#00ff00"));
        assert_eq!(style.color, HexColor::rgb(0, 255, 0));
        assert_eq!(style.stroke.opacity, 0.0);
        assert_eq!(style.stroke.icons.len(), 1);
    }

    #[test]
    fn test_polygon_outline_stays_solid() {
        let style = StyleResolver::new().resolve(GeometryType::Polygon, input("#00ff00"));
        assert!(style.stroke.icons.is_empty());
        // 3 * 0.2
        assert!((style.stroke.opacity - 0.6).abs() < 1e-9);
        assert_eq!(style.stroke.weight, 3.0);
    }

    #[test]
    fn test_stroke_opacity_capped() {
        let mut i = input("#00ff00");
        i.opacity = Some(0.9);
        let style = StyleResolver::new().resolve(GeometryType::Polygon, i);
        assert_eq!(style.stroke.opacity, 1.0);
    }

    #[test]
    fn test_opacity_and_weight_sanitized() {
        let i = StyleInput {
            color: "red",
            opacity: Some(4.0),
            stroke_weight: Some(-2.0),
            line_style: LineStyle::Solid,
        };
        let style = StyleResolver::new().resolve(GeometryType::Polygon, i);
        assert_eq!(style.opacity, 1.0);
        assert_eq!(style.stroke.weight, 0.0);
    }

    #[test]
    fn test_missing_values_use_defaults() {
        let i = StyleInput {
            color: "",
            opacity: None,
            stroke_weight: Some(f64::NAN),
            line_style: LineStyle::Solid,
        };
        let resolver = StyleResolver::new()
            .with_default_color(HexColor::rgb(1, 2, 3))
            .with_default_opacity(0.25)
            .with_default_stroke_weight(5.0);
        let style = resolver.resolve(GeometryType::Polygon, i);
        assert_eq!(style.color, HexColor::rgb(1, 2, 3));
        assert_eq!(style.opacity, 0.25);
        assert_eq!(style.stroke.weight, 5.0);
    }

    #[test]
    fn test_unknown_color_falls_back() {
        let resolver = StyleResolver::new();
        assert_eq!(resolver.resolve_color("not-a-color"), HexColor::RED);
    }

    #[test]
    fn test_hover_color() {
        let plain = StyleResolver::new().resolve(GeometryType::Polygon, input("#000000"));
        assert_eq!(plain.hover_color, None);

        let hovered = StyleResolver::new()
            .with_hover_percentage(1.0)
            .resolve(GeometryType::Polygon, input("#000000"));
        assert_eq!(hovered.hover_color, Some(HexColor::WHITE));
    }
}
