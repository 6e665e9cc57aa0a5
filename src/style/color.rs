//! RGB hex colors and hover shading

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    #[error("expected a '#rrggbb' color, got '{0}'")]
    InvalidHex(String),
    #[error("unknown color '{0}'")]
    Unknown(String),
}

/// Opaque RGB color with 8-bit components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpack a 24-bit value (0xRRGGBB format).
    pub const fn from_packed(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
        }
    }

    /// Lighten toward white (`percent > 0`) or darken toward black
    /// (`percent < 0`)
    ///
    /// Each channel moves `|percent|` of the way to the target; `percent` is
    /// clamped to `[-1, 1]` and halves round up, like `Math.round`.
    pub fn shade(self, percent: f64) -> HexColor {
        if percent.is_nan() {
            return self;
        }
        let p = percent.clamp(-1.0, 1.0);
        let target = if p < 0.0 { 0.0 } else { 255.0 };
        let amount = p.abs();
        let channel = |c: u8| {
            let c = f64::from(c);
            let shaded = ((target - c) * amount + 0.5).floor() + c;
            shaded.clamp(0.0, 255.0) as u8
        };
        HexColor::rgb(channel(self.r), channel(self.g), channel(self.b))
    }

    pub const WHITE: HexColor = HexColor::rgb(255, 255, 255);
    pub const BLACK: HexColor = HexColor::rgb(0, 0, 0);
    pub const RED: HexColor = HexColor::rgb(255, 0, 0);
}

impl FromStr for HexColor {
    type Err = ColorError;

    /// Parse `#rrggbb`, or the `#rgb` shorthand
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ColorError::InvalidHex(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        match hex.len() {
            6 => {
                let packed = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
                Ok(HexColor::from_packed(packed))
            }
            3 => {
                let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
                let packed = u32::from_str_radix(&expanded, 16).map_err(|_| invalid())?;
                Ok(HexColor::from_packed(packed))
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Shade a `#rrggbb` string, see [`HexColor::shade`]
pub fn shade_color(color: &str, percent: f64) -> Result<String, ColorError> {
    Ok(color.parse::<HexColor>()?.shade(percent).to_string())
}
