//! Refresh orchestration
//!
//! One refresh cycle turns the current records into a [`MapFrame`]: every
//! record is built into a shape (or skipped with a reason), the visible
//! bounds are accumulated, and the viewport policy picks the camera. The
//! orchestrator composes the parser, style resolver, and viewport fitter; it
//! holds no state between refreshes.

use serde::Serialize;
use thiserror::Error;

use crate::config::{ConfigError, MapConfig};
use crate::geometry::{
    AxisOrder, LatLngBounds, ShapeBuilder, ShapeDescriptor, ShapeRecord, SkipReason,
    SkippedRecord, Viewport, ViewportDecision, ViewportFitter,
};
use crate::parser::CoordinateParser;
use crate::style::StyleResolver;

/// Whether the mapping provider can take a refresh
///
/// Passed in by the caller on every refresh instead of being read from
/// shared state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderReadiness {
    Ready,
    /// Still bootstrapping; the caller should refresh again once ready
    Loading,
    Unavailable,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RefreshError {
    #[error("map provider is still loading")]
    NotReady,
    #[error("map provider is unavailable")]
    Unavailable,
}

/// Everything one refresh produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapFrame {
    pub shapes: Vec<ShapeDescriptor>,
    /// Union of all shapes' outer paths
    pub bounds: LatLngBounds,
    pub decision: ViewportDecision,
    /// Camera for the configured canvas size
    pub viewport: Viewport,
    #[serde(skip)]
    pub skipped: Vec<SkippedRecord>,
}

/// Composes parsing, style resolution, and viewport fitting
#[derive(Debug, Clone)]
pub struct Orchestrator {
    parser: CoordinateParser,
    styles: StyleResolver,
    fitter: ViewportFitter,
    default_order: AxisOrder,
    canvas: (f64, f64),
}

impl Orchestrator {
    pub fn new(parser: CoordinateParser, styles: StyleResolver, fitter: ViewportFitter) -> Self {
        Self {
            parser,
            styles,
            fitter,
            default_order: AxisOrder::LatLng,
            canvas: (800.0, 600.0),
        }
    }

    /// Build from a loaded configuration
    pub fn from_config(config: &MapConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            config.parser(),
            config.style_resolver()?,
            config.viewport_fitter(),
        )
        .with_default_order(config.default_axis_order())
        .with_canvas_size(config.svg.width, config.svg.height))
    }

    pub fn with_default_order(mut self, order: AxisOrder) -> Self {
        self.default_order = order;
        self
    }

    /// Canvas size used to resolve the viewport
    pub fn with_canvas_size(mut self, width: f64, height: f64) -> Self {
        self.canvas = (width, height);
        self
    }

    pub fn parser(&self) -> &CoordinateParser {
        &self.parser
    }

    pub fn styles(&self) -> &StyleResolver {
        &self.styles
    }

    pub fn fitter(&self) -> &ViewportFitter {
        &self.fitter
    }

    /// Build shapes and decide the viewport, skipping bad records
    pub fn build_frame(&self, records: &[ShapeRecord]) -> MapFrame {
        let builder =
            ShapeBuilder::new(&self.parser, &self.styles).with_default_order(self.default_order);
        let mut bounds = LatLngBounds::new();
        let mut shapes = Vec::new();
        let mut skipped = Vec::new();

        for (index, record) in records.iter().enumerate() {
            match builder.build(record, index, &mut bounds) {
                Ok(shape) => shapes.push(shape),
                Err(reason) => {
                    log_skip(index, record, &reason);
                    skipped.push(SkippedRecord {
                        index,
                        id: record.id.clone(),
                        reason,
                    });
                }
            }
        }

        let decision = self.fitter.decide(shapes.len(), &bounds);
        let viewport = self.fitter.resolve(&decision, self.canvas.0, self.canvas.1);
        tracing::debug!(
            shapes = shapes.len(),
            skipped = skipped.len(),
            zoom = viewport.zoom,
            "refreshed map frame"
        );

        MapFrame {
            shapes,
            bounds,
            decision,
            viewport,
            skipped,
        }
    }

    /// Run one refresh if the provider is ready
    pub fn refresh(
        &self,
        records: &[ShapeRecord],
        readiness: ProviderReadiness,
    ) -> Result<MapFrame, RefreshError> {
        match readiness {
            ProviderReadiness::Ready => Ok(self.build_frame(records)),
            ProviderReadiness::Loading => {
                tracing::debug!("map provider still loading, refresh deferred");
                Err(RefreshError::NotReady)
            }
            ProviderReadiness::Unavailable => {
                tracing::warn!("map provider is not loaded, nothing rendered");
                Err(RefreshError::Unavailable)
            }
        }
    }

    /// Run one refresh and report the outcome to `on_complete`
    ///
    /// `on_complete` is called exactly once, whether or not the refresh ran.
    pub fn refresh_with<F>(&self, records: &[ShapeRecord], readiness: ProviderReadiness, on_complete: F)
    where
        F: FnOnce(Result<MapFrame, RefreshError>),
    {
        on_complete(self.refresh(records, readiness));
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(
            CoordinateParser::default(),
            StyleResolver::default(),
            ViewportFitter::default(),
        )
    }
}

/// Describe why a record was skipped
///
/// Coordinate syntax errors are rendered as a source report against the
/// offending attribute of `records[skipped.index]`.
pub fn skip_report(skipped: &SkippedRecord, records: &[ShapeRecord]) -> String {
    let label = match &skipped.id {
        Some(id) => format!("record {} ({})", skipped.index, id),
        None => format!("record {}", skipped.index),
    };
    match (&skipped.reason, records.get(skipped.index)) {
        (SkipReason::MalformedCoordinates { field, error }, Some(record)) => {
            let source = if *field == "holes" {
                &record.holes
            } else {
                &record.coordinates
            };
            error.format(source, &format!("{}/{}", label, field))
        }
        (reason, _) => format!("{}: {}", label, reason),
    }
}

fn log_skip(index: usize, record: &ShapeRecord, reason: &SkipReason) {
    let id = record.id.as_deref().unwrap_or("");
    match reason {
        SkipReason::MissingCoordinates => {
            tracing::debug!(index, id, "record has no coordinates, skipped");
        }
        SkipReason::UnknownGeometryType(kind) => {
            tracing::error!(
                index,
                id,
                geometry_type = %kind,
                "a shape needs a geometry type of Polygon or Polyline, skipped"
            );
        }
        SkipReason::MalformedCoordinates { field, error } => {
            tracing::warn!(index, id, field = *field, error = %error, "malformed coordinates, skipped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{GeometryType, LatLng};
    use crate::parser::CoordinateMode;

    fn orchestrator() -> Orchestrator {
        Orchestrator::new(
            CoordinateParser::default(),
            StyleResolver::default(),
            ViewportFitter::new(LatLng::new(52.0, 5.0), 6),
        )
    }

    #[test]
    fn test_skips_are_local() {
        let records = vec![
            ShapeRecord::polygon("(0,0),(0,1),(1,1)"),
            ShapeRecord::new("Marker", "(0,0)"),
            ShapeRecord::polygon(""),
            ShapeRecord::polyline("(2,2),(x,3)"),
            ShapeRecord::polyline("(2,2),(3,3)"),
        ];
        let frame = orchestrator().build_frame(&records);
        assert_eq!(frame.shapes.len(), 2);
        assert_eq!(frame.shapes[1].geometry_type, GeometryType::Polyline);
        let skipped: Vec<usize> = frame.skipped.iter().map(|s| s.index).collect();
        assert_eq!(skipped, vec![1, 2, 3]);
        assert_eq!(frame.bounds.north, 3.0);
    }

    #[test]
    fn test_zero_shapes() {
        let frame = orchestrator().build_frame(&[ShapeRecord::new("Marker", "(0,0)")]);
        assert_eq!(
            frame.decision,
            ViewportDecision::DefaultCenter {
                center: LatLng::new(52.0, 5.0),
                zoom: 6
            }
        );
        assert_eq!(frame.viewport.zoom, 6);
    }

    #[test]
    fn test_lenient_mode_keeps_nan_shape() {
        let orchestrator = Orchestrator::new(
            CoordinateParser::new(CoordinateMode::Lenient),
            StyleResolver::default(),
            ViewportFitter::default(),
        );
        let frame = orchestrator.build_frame(&[ShapeRecord::polyline("(2,2),(x,3)")]);
        assert_eq!(frame.shapes.len(), 1);
        assert!(frame.shapes[0].path.points()[1].lat.is_nan());
        assert_eq!(frame.bounds.north, 2.0);
    }

    #[test]
    fn test_skip_report() {
        let records = vec![
            ShapeRecord::new("Circle", "(0,0)").with_id("c1"),
            ShapeRecord::polyline("(2,2),(x,3)"),
        ];
        let frame = orchestrator().build_frame(&records);
        assert_eq!(
            skip_report(&frame.skipped[0], &records),
            "record 0 (c1): unknown geometry type 'Circle', expected 'Polygon' or 'Polyline'"
        );
        let report = skip_report(&frame.skipped[1], &records);
        assert!(report.contains("record 1/coordinates"));
        assert!(report.contains("Unexpected 'x'"));
    }

    #[test]
    fn test_refresh_readiness() {
        let records = [ShapeRecord::polygon("(0,0)")];
        let o = orchestrator();
        assert!(o.refresh(&records, ProviderReadiness::Ready).is_ok());
        assert_eq!(
            o.refresh(&records, ProviderReadiness::Loading),
            Err(RefreshError::NotReady)
        );
        assert_eq!(
            o.refresh(&records, ProviderReadiness::Unavailable),
            Err(RefreshError::Unavailable)
        );
    }

    #[test]
    fn test_callback_called_once_per_refresh() {
        let o = orchestrator();
        for readiness in [
            ProviderReadiness::Ready,
            ProviderReadiness::Loading,
            ProviderReadiness::Unavailable,
        ] {
            let mut calls = 0;
            o.refresh_with(&[], readiness, |_| calls += 1);
            assert_eq!(calls, 1);
        }
    }
}
