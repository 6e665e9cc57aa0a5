//! Reading shape records from JSON objects
//!
//! A [`RecordSchema`] names the attribute that holds each record field. A
//! name of the form `Assoc/Entity/attr` reads `attr` from the first object
//! reachable through the association `Assoc`; when the association is empty
//! the field reads as blank. An empty name leaves the field unmapped.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::geometry::ShapeRecord;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("invalid records JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON array of records or a single record object")]
    NotAnArray,
    #[error("record {index} is not a JSON object")]
    NotAnObject { index: usize },
}

/// Attribute names for each record field
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RecordSchema {
    pub id: String,
    pub coordinates: String,
    pub holes: String,
    pub color: String,
    pub opacity: String,
    pub stroke_weight: String,
    pub line_type: String,
    pub geometry_type: String,
    pub reverse_coordinates: String,
    pub info_window: String,
}

impl Default for RecordSchema {
    fn default() -> Self {
        Self {
            id: "guid".to_string(),
            coordinates: "Coordinates".to_string(),
            holes: "Holes".to_string(),
            color: "Color".to_string(),
            opacity: "Opacity".to_string(),
            stroke_weight: "LineStrokeWeight".to_string(),
            line_type: "LineType".to_string(),
            geometry_type: "ObjectType".to_string(),
            reverse_coordinates: "ReverseCoordinates".to_string(),
            info_window: "InfoWindow".to_string(),
        }
    }
}

/// Where an attribute lives relative to a record
#[derive(Debug, Clone, PartialEq, Eq)]
enum AttributePath<'a> {
    Direct(&'a str),
    Association { association: &'a str, attribute: &'a str },
}

impl<'a> AttributePath<'a> {
    fn parse(name: &'a str) -> Option<Self> {
        if name.is_empty() {
            return None;
        }
        let parts: Vec<&str> = name.split('/').collect();
        match parts.as_slice() {
            [single] => Some(AttributePath::Direct(*single)),
            [association, .., attribute] => Some(AttributePath::Association {
                association: *association,
                attribute: *attribute,
            }),
            [] => None,
        }
    }

    fn lookup<'v>(&self, record: &'v Value) -> Option<&'v Value> {
        match self {
            AttributePath::Direct(attr) => record.get(*attr),
            AttributePath::Association {
                association,
                attribute,
            } => {
                let linked = record.get(*association)?;
                let child = match linked {
                    Value::Array(children) => children.first()?,
                    other => other,
                };
                child.get(*attribute)
            }
        }
    }
}

impl RecordSchema {
    fn value<'v>(&self, record: &'v Value, name: &str) -> Option<&'v Value> {
        AttributePath::parse(name)?.lookup(record)
    }

    fn text(&self, record: &Value, name: &str) -> Option<String> {
        match self.value(record, name)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn number(&self, record: &Value, name: &str) -> Option<f64> {
        match self.value(record, name)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) if !s.trim().is_empty() => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn flag(&self, record: &Value, name: &str) -> Option<bool> {
        match self.value(record, name)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.trim() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            Value::Number(n) => n.as_f64().map(|v| v != 0.0),
            _ => None,
        }
    }

    /// Extract a record from one JSON object
    pub fn extract(&self, record: &Value) -> ShapeRecord {
        ShapeRecord {
            id: self.text(record, &self.id),
            coordinates: self.text(record, &self.coordinates).unwrap_or_default(),
            holes: self.text(record, &self.holes).unwrap_or_default(),
            color: self.text(record, &self.color).unwrap_or_default(),
            opacity: self.number(record, &self.opacity),
            stroke_weight: self.number(record, &self.stroke_weight),
            line_type: self.text(record, &self.line_type).unwrap_or_default(),
            geometry_type: self.text(record, &self.geometry_type).unwrap_or_default(),
            reverse_coordinates: self.flag(record, &self.reverse_coordinates),
            info_window: self.text(record, &self.info_window),
        }
    }

    /// Parse a JSON array of record objects (or a single object)
    pub fn parse_records(&self, json: &str) -> Result<Vec<ShapeRecord>, RecordError> {
        let value: Value = serde_json::from_str(json)?;
        let items = match &value {
            Value::Array(items) => items.as_slice(),
            Value::Object(_) => std::slice::from_ref(&value),
            _ => return Err(RecordError::NotAnArray),
        };
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                if item.is_object() {
                    Ok(self.extract(item))
                } else {
                    Err(RecordError::NotAnObject { index })
                }
            })
            .collect()
    }
}
