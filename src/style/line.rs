//! Line styles and the repeating symbol patterns that draw them

use serde::Serialize;

/// Dash pattern of a shape's outline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LineStyle {
    /// Read a record's line type; anything unrecognized is solid
    pub fn from_attr(value: &str) -> Self {
        match value.trim() {
            "Dashed" | "dashed" => LineStyle::Dashed,
            "Dotted" | "dotted" => LineStyle::Dotted,
            _ => LineStyle::Solid,
        }
    }
}

/// Shape stamped along a line
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolPath {
    Circle,
    /// SVG path data in symbol space
    Path(String),
}

/// Short perpendicular stroke used for dashed lines
pub const DASH_SYMBOL_PATH: &str = "M 0,-1 0,1";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSymbol {
    pub path: SymbolPath,
    pub scale: f64,
    pub stroke_weight: f64,
    pub fill_opacity: Option<f64>,
    pub stroke_opacity: Option<f64>,
}

/// A symbol repeated along a line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IconSequence {
    pub icon: LineSymbol,
    pub offset: String,
    pub repeat: String,
}

impl IconSequence {
    /// Repeat distance in pixels, when given as `"<n>px"`
    pub fn repeat_px(&self) -> Option<f64> {
        self.repeat.strip_suffix("px")?.parse().ok()
    }
}

/// Stroke settings after a line style is applied
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrokeStyle {
    pub weight: f64,
    pub opacity: f64,
    pub icons: Vec<IconSequence>,
}

/// Apply a line style to a base stroke
///
/// Dotted and dashed styles replace the continuous stroke (opacity 0) with a
/// repeating symbol. Solid keeps weight and opacity as given.
pub fn resolve_line_style(style: LineStyle, weight: f64, opacity: f64) -> StrokeStyle {
    let symbol = match style {
        LineStyle::Solid => {
            return StrokeStyle {
                weight,
                opacity,
                icons: vec![],
            }
        }
        LineStyle::Dotted => LineSymbol {
            path: SymbolPath::Circle,
            scale: 3.0,
            stroke_weight: weight,
            fill_opacity: Some(1.0),
            stroke_opacity: None,
        },
        LineStyle::Dashed => LineSymbol {
            path: SymbolPath::Path(DASH_SYMBOL_PATH.to_string()),
            scale: 4.0,
            stroke_weight: weight,
            fill_opacity: None,
            stroke_opacity: Some(1.0),
        },
    };

    StrokeStyle {
        weight,
        opacity: 0.0,
        icons: vec![IconSequence {
            icon: symbol,
            offset: "0".to_string(),
            repeat: "20px".to_string(),
        }],
    }
}
