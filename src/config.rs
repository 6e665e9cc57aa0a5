//! Map configuration loaded from TOML
//!
//! Every section and key is optional; missing values take the defaults shown
//! in [`DEFAULT_CONFIG`].

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::geometry::{AxisOrder, LatLng, ViewportFitter, MAX_ZOOM};
use crate::parser::{CoordinateMode, CoordinateParser};
use crate::records::RecordSchema;
use crate::renderer::SvgConfig;
use crate::style::{ColorError, HexColor, Palette, StyleResolver};

/// Errors that can occur when loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid default color: {0}")]
    Color(#[from] ColorError),
}

/// Annotated default configuration, printed by `--print-config`
pub const DEFAULT_CONFIG: &str = r##"# map-overlay configuration

[map]
# Center shown when no shape is visible
default_lat = 0.0
default_lng = 0.0
# Zoom used with no shapes, and forced for a single shape when
# overrule_fit_bounds is set
lowest_zoom = 11
max_zoom = 21
overrule_fit_bounds = false
# Signed fraction (-1..1) to darken/lighten the fill on hover; 0 disables
hover_color_percentage = 0.0
# "strict" rejects malformed coordinate strings, "lenient" keeps NaN values
coordinate_mode = "strict"
# Treat coordinate pairs as lng,lat unless a record says otherwise
reverse_coordinates = false
default_color = "#ff0000"
default_opacity = 0.5
default_stroke_weight = 2.0
# Stroke opacity is this factor times the fill opacity, capped at 1
stroke_opacity_factor = 3.0
# Allow drawing a shape on a record without coordinates
enable_draw = false

# Record attribute names; "Assoc/Entity/attr" reads through an association
[attributes]
id = "guid"
coordinates = "Coordinates"
holes = "Holes"
color = "Color"
opacity = "Opacity"
stroke_weight = "LineStrokeWeight"
line_type = "LineType"
geometry_type = "ObjectType"
reverse_coordinates = "ReverseCoordinates"
info_window = "InfoWindow"

# Extra named colors, e.g. brand = "#0055aa"
[palette]

[svg]
width = 800.0
height = 600.0
class_prefix = "mo-"
standalone = true
pretty_print = true
info_window_label = "Name"
"##;

/// Complete configuration for a map
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub map: MapSettings,
    pub attributes: RecordSchema,
    /// Named colors added on top of the built-in palette
    pub palette: HashMap<String, String>,
    pub svg: SvgConfig,
}

/// Map-level behaviour
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    pub default_lat: f64,
    pub default_lng: f64,
    pub lowest_zoom: u8,
    pub max_zoom: u8,
    pub overrule_fit_bounds: bool,
    pub hover_color_percentage: f64,
    pub coordinate_mode: CoordinateMode,
    pub reverse_coordinates: bool,
    pub default_color: String,
    pub default_opacity: f64,
    pub default_stroke_weight: f64,
    pub stroke_opacity_factor: f64,
    pub enable_draw: bool,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            default_lat: 0.0,
            default_lng: 0.0,
            lowest_zoom: 11,
            max_zoom: MAX_ZOOM,
            overrule_fit_bounds: false,
            hover_color_percentage: 0.0,
            coordinate_mode: CoordinateMode::Strict,
            reverse_coordinates: false,
            default_color: "#ff0000".to_string(),
            default_opacity: 0.5,
            default_stroke_weight: 2.0,
            stroke_opacity_factor: 3.0,
            enable_draw: false,
        }
    }
}

impl MapConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: MapConfig = toml::from_str(content)?;
        // Surface a bad default color at load time rather than per shape
        config.map.default_color.parse::<HexColor>()?;
        Ok(config)
    }

    /// Set the map settings
    pub fn with_map(mut self, map: MapSettings) -> Self {
        self.map = map;
        self
    }

    /// Set the record schema
    pub fn with_attributes(mut self, attributes: RecordSchema) -> Self {
        self.attributes = attributes;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, svg: SvgConfig) -> Self {
        self.svg = svg;
        self
    }

    pub fn default_center(&self) -> LatLng {
        LatLng::new(self.map.default_lat, self.map.default_lng)
    }

    pub fn default_axis_order(&self) -> AxisOrder {
        AxisOrder::from_reversed(self.map.reverse_coordinates)
    }

    pub fn parser(&self) -> CoordinateParser {
        CoordinateParser::new(self.map.coordinate_mode)
    }

    /// Built-in palette extended by the `[palette]` section
    pub fn palette(&self) -> Palette {
        Palette::default().merged(Palette::from_map(self.palette.clone()))
    }

    pub fn style_resolver(&self) -> Result<StyleResolver, ConfigError> {
        let default_color: HexColor = self.map.default_color.parse()?;
        Ok(StyleResolver::new()
            .with_palette(self.palette())
            .with_default_color(default_color)
            .with_default_opacity(self.map.default_opacity)
            .with_default_stroke_weight(self.map.default_stroke_weight)
            .with_stroke_opacity_factor(self.map.stroke_opacity_factor)
            .with_hover_percentage(self.map.hover_color_percentage))
    }

    pub fn viewport_fitter(&self) -> ViewportFitter {
        ViewportFitter::new(self.default_center(), self.map.lowest_zoom)
            .with_overrule_fit_bounds(self.map.overrule_fit_bounds)
            .with_max_zoom(self.map.max_zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_text_matches_defaults() {
        let parsed = MapConfig::from_toml(DEFAULT_CONFIG).expect("Should parse");
        let defaults = MapConfig::default();
        assert_eq!(parsed.map, defaults.map);
        assert_eq!(parsed.attributes, defaults.attributes);
        assert_eq!(parsed.svg, defaults.svg);
        assert!(parsed.palette.is_empty());
    }

    #[test]
    fn test_partial_config() {
        let config = MapConfig::from_toml(
            r##"
[map]
lowest_zoom = 5
overrule_fit_bounds = true
coordinate_mode = "lenient"

[palette]
brand = "#0055aa"
"##,
        )
        .expect("Should parse");
        assert_eq!(config.map.lowest_zoom, 5);
        assert!(config.map.overrule_fit_bounds);
        assert_eq!(config.map.coordinate_mode, CoordinateMode::Lenient);
        assert_eq!(config.map.default_opacity, 0.5);
        assert_eq!(config.palette().resolve("brand"), Ok(HexColor::rgb(0, 0x55, 0xaa)));
        assert_eq!(config.palette().resolve("red"), Ok(HexColor::RED));
    }

    #[test]
    fn test_viewport_fitter_from_config() {
        let mut config = MapConfig::new();
        config.map.default_lat = 52.0;
        config.map.lowest_zoom = 8;
        config.map.overrule_fit_bounds = true;
        let fitter = config.viewport_fitter();
        assert_eq!(fitter.default_center, LatLng::new(52.0, 0.0));
        assert_eq!(fitter.lowest_zoom, 8);
        assert!(fitter.overrule_fit_bounds);
    }

    #[test]
    fn test_bad_default_color_rejected() {
        let result = MapConfig::from_toml("[map]\ndefault_color = \"blue\"\n");
        assert!(matches!(result, Err(ConfigError::Color(_))));
    }

    #[test]
    fn test_invalid_toml_error() {
        assert!(MapConfig::from_toml("this is not valid toml {{{{").is_err());
    }
}
