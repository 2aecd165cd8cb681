use foundation::RowId;
use serde_json::Value;

use crate::columns::{LATITUDE, LONGITUDE, TITLE};
use crate::feature::Feature;

#[derive(Debug, Clone, PartialEq)]
pub enum MappingError {
    /// The host could not resolve the row's columns (a role is unassigned).
    Unmapped,
    MissingField(&'static str),
    InvalidField { field: &'static str, found: String },
    OutOfRange { field: &'static str, value: f64 },
}

impl std::fmt::Display for MappingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MappingError::Unmapped => write!(f, "row columns are not mapped"),
            MappingError::MissingField(field) => write!(f, "mapped field {field} is missing"),
            MappingError::InvalidField { field, found } => {
                write!(f, "mapped field {field} has unusable value {found}")
            }
            MappingError::OutOfRange { field, value } => {
                write!(f, "mapped field {field} is out of range: {value}")
            }
        }
    }
}

impl std::error::Error for MappingError {}

/// Turns the host's resolved columns for one row into a feature.
///
/// `mapped` is the object returned by column name resolution, or `None` when
/// resolution failed.
pub fn map_record(id: RowId, mapped: Option<&Value>) -> Result<Feature, MappingError> {
    let mapped = match mapped {
        Some(v) if v.is_object() => v,
        _ => return Err(MappingError::Unmapped),
    };

    let title = title_text(mapped.get(TITLE))?;
    let latitude = coordinate(mapped.get(LATITUDE), LATITUDE, 90.0)?;
    let longitude = coordinate(mapped.get(LONGITUDE), LONGITUDE, 180.0)?;

    Ok(Feature {
        id,
        title,
        longitude,
        latitude,
    })
}

/// Any cell value makes a title; only an absent column is an error.
fn title_text(value: Option<&Value>) -> Result<String, MappingError> {
    let value = value.ok_or(MappingError::MissingField(TITLE))?;
    Ok(cell_text(value))
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        // List cells are encoded as ["L", item, ...].
        Value::Array(items) if items.first().and_then(Value::as_str) == Some("L") => items[1..]
            .iter()
            .map(cell_text)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

fn coordinate(value: Option<&Value>, field: &'static str, limit: f64) -> Result<f64, MappingError> {
    let value = value.ok_or(MappingError::MissingField(field))?;
    let n = value
        .as_f64()
        .filter(|n| n.is_finite())
        .ok_or_else(|| MappingError::InvalidField {
            field,
            found: value.to_string(),
        })?;
    if !(-limit..=limit).contains(&n) {
        return Err(MappingError::OutOfRange { field, value: n });
    }
    Ok(n)
}
