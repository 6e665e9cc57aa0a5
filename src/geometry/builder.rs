//! Building shape descriptors from records

use super::shape::{GeometryType, ShapeDescriptor, ShapeRecord, SkipReason};
use super::types::{AxisOrder, LatLngBounds};
use crate::parser::{CoordinateMode, CoordinateParser};
use crate::style::{LineStyle, StyleInput, StyleResolver};

/// Builds one [`ShapeDescriptor`] per record
///
/// Every coordinate of a shape's outer path extends both the shape's own
/// bounds and the accumulator for the whole visible set. Hole coordinates
/// extend neither.
#[derive(Debug, Clone, Copy)]
pub struct ShapeBuilder<'a> {
    parser: &'a CoordinateParser,
    styles: &'a StyleResolver,
    default_order: AxisOrder,
}

impl<'a> ShapeBuilder<'a> {
    pub fn new(parser: &'a CoordinateParser, styles: &'a StyleResolver) -> Self {
        Self {
            parser,
            styles,
            default_order: AxisOrder::LatLng,
        }
    }

    /// Axis order for records that do not carry their own flag
    pub fn with_default_order(mut self, order: AxisOrder) -> Self {
        self.default_order = order;
        self
    }

    /// Build the descriptor for `record`, extending `visible` on success
    ///
    /// `index` names the shape when the record has no id.
    pub fn build(
        &self,
        record: &ShapeRecord,
        index: usize,
        visible: &mut LatLngBounds,
    ) -> Result<ShapeDescriptor, SkipReason> {
        if record.coordinates.trim().is_empty() {
            return Err(SkipReason::MissingCoordinates);
        }
        let geometry_type: GeometryType = record.geometry_type.parse()?;

        let order = record
            .reverse_coordinates
            .map(AxisOrder::from_reversed)
            .unwrap_or(self.default_order);

        let path = self
            .parser
            .parse(&record.coordinates, order)
            .map_err(|error| SkipReason::MalformedCoordinates {
                field: "coordinates",
                error,
            })?;

        let holes = match geometry_type {
            GeometryType::Polygon => self
                .parser
                .parse_rings(&record.holes, order)
                .map_err(|error| SkipReason::MalformedCoordinates {
                    field: "holes",
                    error,
                })?,
            GeometryType::Polyline => {
                if !record.holes.trim().is_empty() {
                    tracing::debug!(index, "ignoring holes on a polyline");
                }
                Vec::new()
            }
        };

        if self.parser.mode() == CoordinateMode::Lenient && !path.is_finite() {
            tracing::debug!(index, "coordinates contain non-numeric values");
        }

        let mut bounds = LatLngBounds::new();
        for point in &path {
            bounds.extend(*point);
            visible.extend(*point);
        }

        let line_style = LineStyle::from_attr(&record.line_type);
        let style = self.styles.resolve(
            geometry_type,
            StyleInput {
                color: &record.color,
                opacity: record.opacity,
                stroke_weight: record.stroke_weight,
                line_style,
            },
        );

        Ok(ShapeDescriptor {
            id: record
                .id
                .clone()
                .unwrap_or_else(|| format!("shape-{}", index)),
            geometry_type,
            path,
            holes,
            color: style.color,
            hover_color: style.hover_color,
            opacity: style.opacity,
            stroke_weight: style.stroke.weight,
            stroke_opacity: style.stroke.opacity,
            line_style,
            icons: style.stroke.icons,
            bounds,
            info_window: record.info_window.clone(),
        })
    }
}
