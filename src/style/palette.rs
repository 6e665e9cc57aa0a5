//! Named color palette
//!
//! Records may carry a color name such as `red` instead of a hex value (new
//! drawings are colored `red`). Names are resolved through a palette that can
//! be replaced or extended from TOML.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::color::{ColorError, HexColor};
use crate::config::ConfigError;

/// Mapping of color names to hex values
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    /// Color mappings: lowercase name -> hex color
    pub colors: HashMap<String, String>,
}

/// TOML structure for deserializing a standalone palette file
#[derive(Deserialize)]
struct TomlPalette {
    colors: HashMap<String, String>,
}

/// CSS basic color keywords
const DEFAULT_PALETTE: &str = r##"
[colors]
black = "#000000"
silver = "#c0c0c0"
gray = "#808080"
grey = "#808080"
white = "#ffffff"
maroon = "#800000"
red = "#ff0000"
purple = "#800080"
fuchsia = "#ff00ff"
magenta = "#ff00ff"
green = "#008000"
lime = "#00ff00"
olive = "#808000"
yellow = "#ffff00"
navy = "#000080"
blue = "#0000ff"
teal = "#008080"
aqua = "#00ffff"
cyan = "#00ffff"
orange = "#ffa500"
"##;

impl Palette {
    /// Load palette from a TOML file with a `[colors]` table
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load palette from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlPalette = toml::from_str(content)?;
        Ok(Self::from_map(parsed.colors))
    }

    pub(crate) fn from_map(colors: HashMap<String, String>) -> Self {
        Palette {
            colors: colors
                .into_iter()
                .map(|(k, v)| (k.to_ascii_lowercase(), v))
                .collect(),
        }
    }

    /// Add or override entries from `other`
    pub fn merged(mut self, other: Palette) -> Self {
        self.colors.extend(other.colors);
        self
    }

    /// Resolve a color name or hex literal
    pub fn resolve(&self, value: &str) -> Result<HexColor, ColorError> {
        let value = value.trim();
        if value.starts_with('#') {
            return value.parse();
        }
        match self.colors.get(&value.to_ascii_lowercase()) {
            Some(hex) => hex.parse(),
            None => Err(ColorError::Unknown(value.to_string())),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        let parsed: TomlPalette =
            toml::from_str(DEFAULT_PALETTE).expect("Default palette should be valid TOML");
        Self::from_map(parsed.colors)
    }
}
