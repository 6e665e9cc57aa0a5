//! SVG renderer for map frames
//!
//! This module takes a MapFrame and produces a static SVG preview of the
//! shapes at the frame's viewport.

pub mod config;
pub mod svg;

pub use config::SvgConfig;
pub use svg::{render_svg, CanvasProjection};
