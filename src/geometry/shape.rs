//! Shape records and render-ready shape descriptors

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use super::types::{CoordinateList, LatLngBounds};
use crate::error::ParseError;
use crate::style::{HexColor, IconSequence, LineStyle};

/// Kind of overlay a record renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GeometryType {
    Polygon,
    Polyline,
}

impl FromStr for GeometryType {
    type Err = SkipReason;

    /// Geometry type attribute values are matched exactly
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Polygon" => Ok(GeometryType::Polygon),
            "Polyline" => Ok(GeometryType::Polyline),
            other => Err(SkipReason::UnknownGeometryType(other.to_string())),
        }
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryType::Polygon => write!(f, "Polygon"),
            GeometryType::Polyline => write!(f, "Polyline"),
        }
    }
}

/// One source record as read from the host data layer
///
/// All attributes are kept in their raw form; the shape builder interprets
/// them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeRecord {
    pub id: Option<String>,
    pub coordinates: String,
    /// Interior rings, `;`-separated
    pub holes: String,
    pub color: String,
    pub opacity: Option<f64>,
    pub stroke_weight: Option<f64>,
    pub line_type: String,
    pub geometry_type: String,
    /// Overrides the configured axis order when set
    pub reverse_coordinates: Option<bool>,
    pub info_window: Option<String>,
}

impl ShapeRecord {
    pub fn new(geometry_type: impl Into<String>, coordinates: impl Into<String>) -> Self {
        Self {
            geometry_type: geometry_type.into(),
            coordinates: coordinates.into(),
            ..Self::default()
        }
    }

    pub fn polygon(coordinates: impl Into<String>) -> Self {
        Self::new("Polygon", coordinates)
    }

    pub fn polyline(coordinates: impl Into<String>) -> Self {
        Self::new("Polyline", coordinates)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_holes(mut self, holes: impl Into<String>) -> Self {
        self.holes = holes.into();
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn with_stroke_weight(mut self, weight: f64) -> Self {
        self.stroke_weight = Some(weight);
        self
    }

    pub fn with_line_type(mut self, line_type: impl Into<String>) -> Self {
        self.line_type = line_type.into();
        self
    }

    pub fn with_reverse_coordinates(mut self, reversed: bool) -> Self {
        self.reverse_coordinates = Some(reversed);
        self
    }

    pub fn with_info_window(mut self, text: impl Into<String>) -> Self {
        self.info_window = Some(text.into());
        self
    }
}

/// A polygon or polyline ready to hand to a renderer
///
/// Built once per record per refresh and never mutated afterwards; edits go
/// through a new coordinate string and a new descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeDescriptor {
    pub id: String,
    pub geometry_type: GeometryType,
    pub path: CoordinateList,
    /// Interior rings, polygons only
    pub holes: Vec<CoordinateList>,
    pub color: HexColor,
    pub hover_color: Option<HexColor>,
    pub opacity: f64,
    pub stroke_weight: f64,
    pub stroke_opacity: f64,
    pub line_style: LineStyle,
    pub icons: Vec<IconSequence>,
    /// Bounds of the outer path; holes do not contribute
    pub bounds: LatLngBounds,
    pub info_window: Option<String>,
}

/// Why a record produced no shape
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkipReason {
    #[error("record has no coordinates")]
    MissingCoordinates,

    #[error("unknown geometry type '{0}', expected 'Polygon' or 'Polyline'")]
    UnknownGeometryType(String),

    #[error("malformed {field}: {error}")]
    MalformedCoordinates {
        field: &'static str,
        error: ParseError,
    },
}

/// A record that was left out of a refresh
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    pub index: usize,
    pub id: Option<String>,
    pub reason: SkipReason,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_type_exact_match() {
        assert_eq!("Polygon".parse::<GeometryType>(), Ok(GeometryType::Polygon));
        assert_eq!("Polyline".parse::<GeometryType>(), Ok(GeometryType::Polyline));
        assert_eq!(
            "polygon".parse::<GeometryType>(),
            Err(SkipReason::UnknownGeometryType("polygon".to_string()))
        );
    }

    #[test]
    fn test_record_builders() {
        let record = ShapeRecord::polyline("(1,2),(3,4)")
            .with_id("a")
            .with_line_type("Dotted")
            .with_reverse_coordinates(true);
        assert_eq!(record.geometry_type, "Polyline");
        assert_eq!(record.id.as_deref(), Some("a"));
        assert_eq!(record.reverse_coordinates, Some(true));
    }

    #[test]
    fn test_skip_reason_display() {
        let reason = SkipReason::UnknownGeometryType("Circle".to_string());
        assert!(reason.to_string().contains("Circle"));
    }
}
