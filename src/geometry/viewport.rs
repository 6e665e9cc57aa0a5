//! Viewport fitting policy
//!
//! After a refresh the map either shows the default center at the lowest
//! zoom (no shapes), fits one shape's bounds with an optional zoom override,
//! or fits the union of all shapes' bounds.

use serde::Serialize;

use super::projection::{fit_zoom, MAX_ZOOM};
use super::types::{LatLng, LatLngBounds};

/// What the map should show after a refresh
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewportDecision {
    /// No shapes: default center at the configured lowest zoom
    DefaultCenter { center: LatLng, zoom: u8 },
    /// Fit the bounds, then force `zoom_override` when set
    FitBounds {
        bounds: LatLngBounds,
        zoom_override: Option<u8>,
    },
}

/// A concrete map camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: u8,
}

/// Applies the three-branch fitting policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportFitter {
    pub default_center: LatLng,
    pub lowest_zoom: u8,
    /// Force `lowest_zoom` when exactly one shape is shown
    pub overrule_fit_bounds: bool,
    pub max_zoom: u8,
}

impl Default for ViewportFitter {
    fn default() -> Self {
        Self {
            default_center: LatLng::new(0.0, 0.0),
            lowest_zoom: 11,
            overrule_fit_bounds: false,
            max_zoom: MAX_ZOOM,
        }
    }
}

impl ViewportFitter {
    pub fn new(default_center: LatLng, lowest_zoom: u8) -> Self {
        Self {
            default_center,
            lowest_zoom,
            ..Self::default()
        }
    }

    pub fn with_overrule_fit_bounds(mut self, overrule: bool) -> Self {
        self.overrule_fit_bounds = overrule;
        self
    }

    pub fn with_max_zoom(mut self, max_zoom: u8) -> Self {
        self.max_zoom = max_zoom;
        self
    }

    /// Decide the viewport for `shape_count` valid shapes whose union of
    /// bounds is `bounds`
    pub fn decide(&self, shape_count: usize, bounds: &LatLngBounds) -> ViewportDecision {
        match shape_count {
            0 => ViewportDecision::DefaultCenter {
                center: self.default_center,
                zoom: self.lowest_zoom,
            },
            1 => ViewportDecision::FitBounds {
                bounds: *bounds,
                zoom_override: self.overrule_fit_bounds.then_some(self.lowest_zoom),
            },
            _ => ViewportDecision::FitBounds {
                bounds: *bounds,
                zoom_override: None,
            },
        }
    }

    /// Turn a decision into a camera for a `width` x `height` pixel canvas
    ///
    /// Fitting empty bounds (every coordinate was NaN) falls back to the
    /// default center at the lowest zoom.
    pub fn resolve(&self, decision: &ViewportDecision, width: f64, height: f64) -> Viewport {
        match decision {
            ViewportDecision::DefaultCenter { center, zoom } => Viewport {
                center: *center,
                zoom: *zoom,
            },
            ViewportDecision::FitBounds {
                bounds,
                zoom_override,
            } => match bounds.center() {
                Some(center) => Viewport {
                    center,
                    zoom: zoom_override
                        .unwrap_or_else(|| fit_zoom(bounds, width, height, self.max_zoom)),
                },
                None => Viewport {
                    center: self.default_center,
                    zoom: self.lowest_zoom,
                },
            },
        }
    }
}
