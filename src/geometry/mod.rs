//! Geometry: coordinates, bounds, shapes, and viewport fitting

pub mod builder;
pub mod projection;
pub mod shape;
pub mod types;
pub mod viewport;

pub use builder::ShapeBuilder;
pub use projection::{fit_zoom, project, MAX_ZOOM, TILE_SIZE};
pub use shape::{GeometryType, ShapeDescriptor, ShapeRecord, SkipReason, SkippedRecord};
pub use types::{AxisOrder, BracketStyle, CoordinateList, LatLng, LatLngBounds};
pub use viewport::{Viewport, ViewportDecision, ViewportFitter};
