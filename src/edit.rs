//! Drawing and vertex editing
//!
//! An [`EditSession`] tracks the record being edited. Drawn overlays and
//! vertex edits are turned back into coordinate strings, which is the only
//! form in which changes leave the session.

use serde::Serialize;

use crate::geometry::{
    AxisOrder, BracketStyle, CoordinateList, GeometryType, LatLng, LatLngBounds, ShapeDescriptor,
    ShapeRecord,
};
use crate::parser::CoordinateParser;

/// Color given to freshly drawn shapes
pub const DRAWN_COLOR: &str = "red";

/// What the user finished drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    Polygon,
    Polyline,
    Marker,
}

impl OverlayKind {
    fn geometry_type(self) -> Option<GeometryType> {
        match self {
            OverlayKind::Polygon => Some(GeometryType::Polygon),
            OverlayKind::Polyline => Some(GeometryType::Polyline),
            OverlayKind::Marker => None,
        }
    }
}

/// A newly drawn shape, ready to be stored as a record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawnShape {
    pub coordinates: String,
    pub geometry_type: GeometryType,
    pub color: String,
    pub opacity: Option<f64>,
    pub stroke_weight: Option<f64>,
}

impl DrawnShape {
    /// The record this shape would be stored as
    pub fn to_record(&self) -> ShapeRecord {
        let mut record = ShapeRecord::new(self.geometry_type.to_string(), &self.coordinates)
            .with_color(&self.color);
        record.opacity = self.opacity;
        record.stroke_weight = self.stroke_weight;
        record
    }
}

/// Editing state for one context record
#[derive(Debug, Clone)]
pub struct EditSession {
    coordinates: String,
    path: CoordinateList,
    order: AxisOrder,
    opacity: Option<f64>,
    stroke_weight: Option<f64>,
    single_edit: bool,
    draw_enabled: bool,
    bounds: LatLngBounds,
}

impl EditSession {
    /// Start a session on `context`
    ///
    /// A context without coordinates is in single-edit mode: it may receive
    /// exactly one drawn shape, and only when drawing is enabled. Otherwise
    /// its coordinates become the path whose vertices can be edited.
    pub fn new(context: &ShapeRecord, enable_draw: bool) -> Self {
        let single_edit = context.coordinates.trim().is_empty();
        let order = AxisOrder::from_reversed(context.reverse_coordinates.unwrap_or(false));
        let path = if single_edit {
            CoordinateList::default()
        } else {
            CoordinateParser::default()
                .parse(&context.coordinates, order)
                .unwrap_or_else(|error| {
                    tracing::warn!(%error, "context coordinates are not editable");
                    CoordinateList::default()
                })
        };
        let bounds = path.bounds();
        Self {
            coordinates: context.coordinates.clone(),
            path,
            order,
            opacity: context.opacity,
            stroke_weight: context.stroke_weight,
            single_edit,
            draw_enabled: enable_draw && single_edit,
            bounds,
        }
    }

    /// Start editing the vertices of an already built shape
    pub fn with_shape(mut self, shape: &ShapeDescriptor) -> Self {
        self.path = shape.path.clone();
        self.bounds = self.bounds.union(&shape.bounds);
        self
    }

    /// Widen the session bounds, usually with the bounds of the last refresh
    pub fn with_bounds(mut self, bounds: LatLngBounds) -> Self {
        self.bounds = self.bounds.union(&bounds);
        self
    }

    pub fn coordinates(&self) -> &str {
        &self.coordinates
    }

    pub fn path(&self) -> &CoordinateList {
        &self.path
    }

    pub fn bounds(&self) -> &LatLngBounds {
        &self.bounds
    }

    pub fn is_single_edit(&self) -> bool {
        self.single_edit
    }

    pub fn is_draw_enabled(&self) -> bool {
        self.draw_enabled
    }

    /// Handle a finished drawing
    ///
    /// Markers are ignored. In single-edit mode the drawn path becomes the
    /// context's coordinates and drawing is switched off.
    pub fn complete_overlay(&mut self, kind: OverlayKind, path: CoordinateList) -> Option<DrawnShape> {
        if !self.draw_enabled {
            tracing::debug!(?kind, "drawing is disabled, overlay ignored");
            return None;
        }
        let geometry_type = kind.geometry_type()?;
        let points = path.len();

        let coordinates = self.serialize(&path);
        let drawn = DrawnShape {
            coordinates: coordinates.clone(),
            geometry_type,
            color: DRAWN_COLOR.to_string(),
            opacity: self.opacity,
            stroke_weight: self.stroke_weight,
        };

        if self.single_edit {
            self.draw_enabled = false;
            self.coordinates = coordinates;
            self.path = path;
        }
        tracing::debug!(%geometry_type, points, "overlay completed");
        Some(drawn)
    }

    /// Move the vertex at `index`
    ///
    /// Returns the new coordinate string when the path changed.
    pub fn set_vertex(&mut self, index: usize, point: LatLng) -> Option<String> {
        let len = self.path.len();
        match self.path.points_mut().get_mut(index) {
            Some(vertex) => *vertex = point,
            None => {
                tracing::warn!(index, len, "vertex index out of range");
                return None;
            }
        }
        self.commit()
    }

    /// Insert a vertex before `index`; `index == len` appends
    ///
    /// Returns the new coordinate string when the path changed.
    pub fn insert_vertex(&mut self, index: usize, point: LatLng) -> Option<String> {
        let points = self.path.points_mut();
        if index > points.len() {
            tracing::warn!(index, len = points.len(), "vertex index out of range");
            return None;
        }
        points.insert(index, point);
        self.commit()
    }

    fn commit(&mut self) -> Option<String> {
        let updated = self.serialize(&self.path);
        if updated == self.coordinates {
            return None;
        }
        for point in &self.path {
            self.bounds.extend(*point);
        }
        self.coordinates = updated.clone();
        Some(updated)
    }

    fn serialize(&self, path: &CoordinateList) -> String {
        path.to_coordinate_string(BracketStyle::Round, self.order)
    }
}
