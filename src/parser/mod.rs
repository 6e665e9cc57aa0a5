//! Coordinate string parsing
//!
//! Two modes are available. [`CoordinateMode::Strict`] runs the logos/chumsky
//! grammar and rejects a list as a unit when any token is malformed.
//! [`CoordinateMode::Lenient`] reproduces the split-based reading used by the
//! map widget, where malformed values silently become NaN.

mod grammar;
pub mod lenient;
pub mod lexer;

pub use grammar::{parse_pairs, RawPair};

use serde::Deserialize;

use crate::error::ParseError;
use crate::geometry::{AxisOrder, CoordinateList, LatLng};

/// How malformed coordinate tokens are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateMode {
    #[default]
    Strict,
    Lenient,
}

/// Separator between rings in a holes attribute
pub const RING_SEPARATOR: char = ';';

/// Turns coordinate strings into [`CoordinateList`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinateParser {
    mode: CoordinateMode,
}

impl CoordinateParser {
    pub fn new(mode: CoordinateMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> CoordinateMode {
        self.mode
    }

    /// Parse one coordinate list
    ///
    /// In lenient mode this never fails except on empty input.
    pub fn parse(&self, input: &str, order: AxisOrder) -> Result<CoordinateList, ParseError> {
        let pairs = match self.mode {
            CoordinateMode::Strict => parse_pairs(input).map_err(first_error)?,
            CoordinateMode::Lenient => {
                let pairs = lenient::parse_pairs(input);
                if pairs.is_empty() {
                    return Err(ParseError::Empty);
                }
                pairs
            }
        };

        Ok(pairs
            .into_iter()
            .map(|p| match order {
                AxisOrder::LatLng => LatLng::new(p.first, p.second),
                AxisOrder::LngLat => LatLng::new(p.second, p.first),
            })
            .collect::<Vec<_>>()
            .into())
    }

    /// Parse zero or more `;`-separated rings, as used for polygon holes
    ///
    /// Blank rings are ignored. Error spans are relative to `input`.
    pub fn parse_rings(
        &self,
        input: &str,
        order: AxisOrder,
    ) -> Result<Vec<CoordinateList>, ParseError> {
        let mut rings = Vec::new();
        let mut offset = 0;
        for piece in input.split(RING_SEPARATOR) {
            let start = offset;
            offset += piece.len() + RING_SEPARATOR.len_utf8();
            if piece.trim().is_empty() {
                continue;
            }
            let ring = self.parse(piece, order).map_err(|e| e.shifted(start))?;
            rings.push(ring);
        }
        Ok(rings)
    }
}

fn first_error(mut errors: Vec<ParseError>) -> ParseError {
    if errors.is_empty() {
        ParseError::Empty
    } else {
        errors.swap_remove(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_order() {
        let parser = CoordinateParser::default();
        let normal = parser.parse("(10,20)", AxisOrder::LatLng).unwrap();
        let reversed = parser.parse("(10,20)", AxisOrder::LngLat).unwrap();
        assert_eq!(normal.points(), &[LatLng::new(10.0, 20.0)]);
        assert_eq!(reversed.points(), &[LatLng::new(20.0, 10.0)]);
    }

    #[test]
    fn test_lenient_axis_order() {
        let parser = CoordinateParser::new(CoordinateMode::Lenient);
        let reversed = parser.parse("[10,20]", AxisOrder::LngLat).unwrap();
        assert_eq!(reversed.points(), &[LatLng::new(20.0, 10.0)]);
    }

    #[test]
    fn test_out_of_range_accepted() {
        let parser = CoordinateParser::default();
        let path = parser.parse("(95,200)", AxisOrder::LatLng).unwrap();
        assert_eq!(path.points(), &[LatLng::new(95.0, 200.0)]);
    }

    #[test]
    fn test_strict_rejects_whole_list() {
        let parser = CoordinateParser::new(CoordinateMode::Strict);
        assert!(parser.parse("(1,2),(3,x)", AxisOrder::LatLng).is_err());
    }

    #[test]
    fn test_lenient_keeps_nan() {
        let parser = CoordinateParser::new(CoordinateMode::Lenient);
        let path = parser.parse("(1,2),(3,x)", AxisOrder::LatLng).unwrap();
        assert_eq!(path.len(), 2);
        assert!(!path.is_finite());
    }

    #[test]
    fn test_empty_is_error_in_both_modes() {
        for mode in [CoordinateMode::Strict, CoordinateMode::Lenient] {
            let parser = CoordinateParser::new(mode);
            assert_eq!(parser.parse("", AxisOrder::LatLng), Err(ParseError::Empty));
        }
    }

    #[test]
    fn test_rings() {
        let parser = CoordinateParser::default();
        let rings = parser
            .parse_rings("(0,0),(0,1),(1,1); ;[2,2],[2,3],[3,3]", AxisOrder::LatLng)
            .unwrap();
        assert_eq!(rings.len(), 2);
        assert_eq!(rings[1].points()[0], LatLng::new(2.0, 2.0));
    }

    #[test]
    fn test_ring_error_span_is_absolute() {
        let parser = CoordinateParser::default();
        let err = parser
            .parse_rings("(0,0),(0,1);(1,y)", AxisOrder::LatLng)
            .unwrap_err();
        assert_eq!(err.span(), Some(&(15..16)));
    }

    #[test]
    fn test_no_rings() {
        let parser = CoordinateParser::default();
        assert!(parser.parse_rings("", AxisOrder::LatLng).unwrap().is_empty());
    }
}
