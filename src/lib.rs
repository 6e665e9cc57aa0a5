//! Map Overlay - polygon and polyline overlays from coordinate strings
//!
//! This library parses coordinate strings attached to data records, builds
//! styled polygon/polyline shapes from them, picks a viewport that shows
//! them, and renders a static SVG preview.
//!
//! # Example
//!
//! ```rust
//! use map_overlay::render;
//!
//! let svg = render(r#"[{"ObjectType": "Polygon", "Coordinates": "(0,0),(0,1),(1,1)"}]"#).unwrap();
//! assert!(svg.contains("<svg"));
//! ```

pub mod config;
pub mod edit;
pub mod error;
pub mod geometry;
pub mod orchestrator;
pub mod parser;
pub mod records;
pub mod renderer;
pub mod style;

pub use config::{ConfigError, MapConfig, MapSettings, DEFAULT_CONFIG};
pub use edit::{DrawnShape, EditSession, OverlayKind};
pub use error::ParseError;
pub use geometry::{
    AxisOrder, CoordinateList, GeometryType, LatLng, LatLngBounds, ShapeBuilder, ShapeDescriptor,
    ShapeRecord, Viewport, ViewportDecision, ViewportFitter,
};
pub use orchestrator::{skip_report, MapFrame, Orchestrator, ProviderReadiness, RefreshError};
pub use parser::{CoordinateMode, CoordinateParser};
pub use records::{RecordError, RecordSchema};
pub use renderer::{render_svg, SvgConfig};
pub use style::{shade_color, HexColor, LineStyle, Palette, StyleResolver};

use thiserror::Error;

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("record error: {0}")]
    Records(#[from] RecordError),

    #[error("refresh failed: {0}")]
    Refresh(#[from] RefreshError),
}

/// Build a map frame from records JSON
///
/// Records that cannot be drawn are listed in [`MapFrame::skipped`] rather
/// than failing the whole batch.
pub fn build_frame(json: &str, config: &MapConfig) -> Result<MapFrame, RenderError> {
    let records = config.attributes.parse_records(json)?;
    let orchestrator = Orchestrator::from_config(config)?;
    Ok(orchestrator.refresh(&records, ProviderReadiness::Ready)?)
}

/// Render records JSON to SVG with default configuration
pub fn render(json: &str) -> Result<String, RenderError> {
    render_with_config(json, &MapConfig::default())
}

/// Render records JSON to SVG with custom configuration
///
/// # Example
///
/// ```rust
/// use map_overlay::{render_with_config, MapConfig, SvgConfig};
///
/// let config = MapConfig::new().with_svg(SvgConfig::default().with_size(400.0, 300.0));
/// let json = r#"[{"ObjectType": "Polyline", "Coordinates": "[52.1,5.1],[52.2,5.3]", "LineType": "Dashed"}]"#;
///
/// let svg = render_with_config(json, &config).unwrap();
/// assert!(svg.contains(r#"width="400""#));
/// assert!(svg.contains("stroke-dasharray"));
/// ```
pub fn render_with_config(json: &str, config: &MapConfig) -> Result<String, RenderError> {
    let frame = build_frame(json, config)?;
    Ok(render_svg(&frame, &config.svg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_simple_polygon() {
        let svg = render(r#"[{"ObjectType": "Polygon", "Coordinates": "(0,0),(0,1),(1,1)"}]"#)
            .unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains(r#"class="mo-shape mo-polygon""#));
    }

    #[test]
    fn test_render_empty_array() {
        let svg = render("[]").unwrap();
        assert!(svg.contains("<svg"));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn test_render_invalid_json() {
        let result = render("{not json");
        assert!(matches!(result, Err(RenderError::Records(_))));
    }

    #[test]
    fn test_build_frame_skips_bad_records() {
        let json = r#"[
            {"ObjectType": "Polygon", "Coordinates": "(0,0),(0,1),(1,1)"},
            {"ObjectType": "Circle", "Coordinates": "(0,0)"},
            {"ObjectType": "Polyline", "Coordinates": ""}
        ]"#;
        let frame = build_frame(json, &MapConfig::default()).unwrap();
        assert_eq!(frame.shapes.len(), 1);
        assert_eq!(frame.skipped.len(), 2);
    }

    #[test]
    fn test_render_with_custom_schema() {
        let mut config = MapConfig::new();
        config.attributes.coordinates = "Path".to_string();
        let json = r#"[{"ObjectType": "Polyline", "Path": "(0,0),(1,1)"}]"#;
        let frame = build_frame(json, &config).unwrap();
        assert_eq!(frame.shapes.len(), 1);
    }
}
