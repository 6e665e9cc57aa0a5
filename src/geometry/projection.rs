//! Web Mercator projection at integer zoom levels
//!
//! At zoom `z` the world is a square of `256 * 2^z` pixels.

use std::f64::consts::PI;

use super::types::{LatLng, LatLngBounds};

/// World size in pixels at zoom 0
pub const TILE_SIZE: f64 = 256.0;

/// Highest zoom level a map supports
pub const MAX_ZOOM: u8 = 21;

/// Project to world pixel coordinates at `zoom`
pub fn project(point: LatLng, zoom: f64) -> (f64, f64) {
    let scale = TILE_SIZE * 2f64.powf(zoom);
    let x = (point.lng + 180.0) / 360.0 * scale;
    // Clamp to keep the poles finite
    let siny = point.lat.to_radians().sin().clamp(-0.9999, 0.9999);
    let y = (0.5 - ((1.0 + siny) / (1.0 - siny)).ln() / (4.0 * PI)) * scale;
    (x, y)
}

/// Largest zoom at which `bounds` fits in a `width` x `height` pixel canvas
///
/// Empty bounds, or a canvas with no area, fit at zoom 0; a single point
/// fits at `max_zoom`.
pub fn fit_zoom(bounds: &LatLngBounds, width: f64, height: f64, max_zoom: u8) -> u8 {
    if bounds.is_empty() || !(width > 0.0 && height > 0.0) {
        return 0;
    }
    let (x1, y1) = project(LatLng::new(bounds.north, bounds.west), 0.0);
    let (x2, y2) = project(LatLng::new(bounds.south, bounds.east), 0.0);
    let dx = (x2 - x1).abs();
    let dy = (y2 - y1).abs();

    let zoom_for = |span: f64, extent: f64| {
        if span > 0.0 {
            (extent / span).log2()
        } else {
            f64::INFINITY
        }
    };
    let zoom = zoom_for(dx, width).min(zoom_for(dy, height));
    if zoom == f64::INFINITY {
        return max_zoom;
    }
    zoom.floor().clamp(0.0, f64::from(max_zoom)) as u8
}
