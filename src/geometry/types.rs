//! Core coordinate types

use std::fmt;

use serde::Serialize;

/// A geographic position in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components are finite numbers
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

/// Which bracket convention a coordinate string uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BracketStyle {
    /// `(lat, lng),(lat, lng)`, the format written back after edits
    #[default]
    Round,
    /// `[lat,lng],[lat,lng]`, as seen in geoJSON sources
    Square,
}

/// Which component comes first in each pair of a coordinate string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisOrder {
    #[default]
    LatLng,
    /// Sources that encode `lng,lat`
    LngLat,
}

impl AxisOrder {
    /// `reversed` flag as stored on records
    pub fn from_reversed(reversed: bool) -> Self {
        if reversed {
            AxisOrder::LngLat
        } else {
            AxisOrder::LatLng
        }
    }

    pub fn is_reversed(self) -> bool {
        self == AxisOrder::LngLat
    }
}

/// An ordered path of positions
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct CoordinateList(Vec<LatLng>);

impl CoordinateList {
    pub fn new(points: Vec<LatLng>) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[LatLng] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LatLng> {
        self.0.iter()
    }

    /// Every point has finite components
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(LatLng::is_finite)
    }

    pub(crate) fn points_mut(&mut self) -> &mut Vec<LatLng> {
        &mut self.0
    }

    /// Bounds of this path alone
    pub fn bounds(&self) -> LatLngBounds {
        let mut bounds = LatLngBounds::new();
        for point in &self.0 {
            bounds.extend(*point);
        }
        bounds
    }

    /// Serialize back to a coordinate string
    ///
    /// The output parses back to the same values with the same `order`.
    pub fn to_coordinate_string(&self, style: BracketStyle, order: AxisOrder) -> String {
        self.0
            .iter()
            .map(|p| {
                let (a, b) = match order {
                    AxisOrder::LatLng => (p.lat, p.lng),
                    AxisOrder::LngLat => (p.lng, p.lat),
                };
                match style {
                    BracketStyle::Round => format!("({}, {})", a, b),
                    BracketStyle::Square => format!("[{},{}]", a, b),
                }
            })
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl From<Vec<LatLng>> for CoordinateList {
    fn from(points: Vec<LatLng>) -> Self {
        Self(points)
    }
}

impl<'a> IntoIterator for &'a CoordinateList {
    type Item = &'a LatLng;
    type IntoIter = std::slice::Iter<'a, LatLng>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Running rectangle of min/max latitude and longitude
///
/// Starts empty; NaN or infinite components never widen it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLngBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl LatLngBounds {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self {
            south: f64::INFINITY,
            west: f64::INFINITY,
            north: f64::NEG_INFINITY,
            east: f64::NEG_INFINITY,
        }
    }

    /// No finite point has been added yet
    pub fn is_empty(&self) -> bool {
        self.south > self.north || self.west > self.east
    }

    /// Widen to include a point; non-finite points are ignored
    pub fn extend(&mut self, point: LatLng) {
        if !point.is_finite() {
            return;
        }
        self.south = self.south.min(point.lat);
        self.north = self.north.max(point.lat);
        self.west = self.west.min(point.lng);
        self.east = self.east.max(point.lng);
    }

    /// Smallest bounds containing both
    pub fn union(&self, other: &LatLngBounds) -> LatLngBounds {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        LatLngBounds {
            south: self.south.min(other.south),
            west: self.west.min(other.west),
            north: self.north.max(other.north),
            east: self.east.max(other.east),
        }
    }

    /// Center point, or `None` for empty bounds
    pub fn center(&self) -> Option<LatLng> {
        if self.is_empty() {
            return None;
        }
        Some(LatLng::new(
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        ))
    }

    pub fn contains(&self, point: LatLng) -> bool {
        point.lat >= self.south
            && point.lat <= self.north
            && point.lng >= self.west
            && point.lng <= self.east
    }
}

impl Default for LatLngBounds {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bounds() {
        let bounds = LatLngBounds::new();
        assert!(bounds.is_empty());
        assert_eq!(bounds.center(), None);
    }

    #[test]
    fn test_extend_and_center() {
        let mut bounds = LatLngBounds::new();
        bounds.extend(LatLng::new(10.0, 20.0));
        bounds.extend(LatLng::new(20.0, 40.0));
        assert!(!bounds.is_empty());
        assert_eq!(bounds.center(), Some(LatLng::new(15.0, 30.0)));
        assert!(bounds.contains(LatLng::new(12.0, 25.0)));
        assert!(!bounds.contains(LatLng::new(25.0, 25.0)));
    }

    #[test]
    fn test_single_point_is_not_empty() {
        let mut bounds = LatLngBounds::new();
        bounds.extend(LatLng::new(1.0, 1.0));
        assert!(!bounds.is_empty());
    }

    #[test]
    fn test_nan_does_not_widen() {
        let mut bounds = LatLngBounds::new();
        bounds.extend(LatLng::new(f64::NAN, 5.0));
        assert!(bounds.is_empty());
        bounds.extend(LatLng::new(1.0, 2.0));
        bounds.extend(LatLng::new(3.0, f64::NAN));
        assert_eq!(bounds.north, 1.0);
    }

    #[test]
    fn test_infinity_does_not_widen() {
        let mut bounds = LatLngBounds::new();
        bounds.extend(LatLng::new(1.0, 2.0));
        bounds.extend(LatLng::new(f64::INFINITY, 2.0));
        bounds.extend(LatLng::new(1.0, f64::NEG_INFINITY));
        assert_eq!((bounds.north, bounds.west), (1.0, 2.0));
    }

    #[test]
    fn test_union_with_empty() {
        let mut a = LatLngBounds::new();
        a.extend(LatLng::new(1.0, 2.0));
        assert_eq!(a.union(&LatLngBounds::new()), a);
        assert_eq!(LatLngBounds::new().union(&a), a);
    }

    #[test]
    fn test_union() {
        let a = CoordinateList::new(vec![LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0)]).bounds();
        let b = CoordinateList::new(vec![LatLng::new(-1.0, 5.0)]).bounds();
        let u = a.union(&b);
        assert_eq!((u.south, u.west, u.north, u.east), (-1.0, 0.0, 1.0, 5.0));
    }

    #[test]
    fn test_to_coordinate_string() {
        let path = CoordinateList::new(vec![LatLng::new(52.5, 4.25), LatLng::new(-1.0, 3.0)]);
        assert_eq!(
            path.to_coordinate_string(BracketStyle::Round, AxisOrder::LatLng),
            "(52.5, 4.25),(-1, 3)"
        );
        assert_eq!(
            path.to_coordinate_string(BracketStyle::Square, AxisOrder::LngLat),
            "[4.25,52.5],[3,-1]"
        );
    }
}
