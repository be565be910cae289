// Value coercion between form input strings and typed values
// Author: Gabriel Demetrios Lafis

use chrono::{DateTime, NaiveDateTime};
use log::warn;
use serde_json::Value as JsonValue;

use super::{FieldCategory, Value};

/// Kind of editor widget a field should be rendered with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKind {
    Checkbox,
    Number,
    Date,
    DateTime,
    TextArea,
    Text,
}

/// Get the editor widget kind for a field category
pub fn editor_kind(category: FieldCategory) -> EditorKind {
    match category {
        FieldCategory::Boolean => EditorKind::Checkbox,
        FieldCategory::Integer | FieldCategory::Float => EditorKind::Number,
        FieldCategory::Date => EditorKind::Date,
        FieldCategory::DateTime => EditorKind::DateTime,
        FieldCategory::Text => EditorKind::TextArea,
        FieldCategory::Identifier => EditorKind::Text,
    }
}

/// Coerce a raw input string into the typed value its field category
/// implies.
///
/// Numeric coercion is lenient: when the input does not parse, the raw
/// string is passed through unchanged rather than failing the operation,
/// and the backend is left to reject the type-mismatched comparison. The
/// passthrough is logged so the degradation stays observable.
pub fn coerce(raw: &str, category: FieldCategory) -> Value {
    match category {
        FieldCategory::Integer => match raw.trim().parse::<i64>() {
            Ok(i) => Value::Integer(i),
            Err(_) => {
                warn!("value '{}' is not an integer, passing through as text", raw);
                Value::String(raw.to_string())
            }
        },
        FieldCategory::Float => match raw.trim().parse::<f64>() {
            Ok(f) => Value::Float(f),
            Err(_) => {
                warn!("value '{}' is not a number, passing through as text", raw);
                Value::String(raw.to_string())
            }
        },
        FieldCategory::Boolean => Value::Boolean(coerce_bool(raw)),
        // Dates, identifiers and text travel as strings
        _ => Value::String(raw.to_string()),
    }
}

/// Coerce a raw input string into a boolean. Only `true` and `1` are
/// truthy, everything else is false.
pub fn coerce_bool(raw: &str) -> bool {
    raw == "true" || raw == "1"
}

/// Format a stored value for display in an editable form input.
///
/// DateTime values are normalized to the fixed-width `YYYY-MM-DDThh:mm`
/// shape a datetime editor expects; unparseable sources produce an empty
/// string. Date values keep the text before the `T` separator. Everything
/// else renders as its plain display string.
pub fn format_for_input(value: &JsonValue, category: FieldCategory) -> String {
    match category {
        FieldCategory::DateTime => match value {
            JsonValue::String(s) => parse_datetime(s)
                .map(|dt| dt.format("%Y-%m-%dT%H:%M").to_string())
                .unwrap_or_default(),
            _ => String::new(),
        },
        FieldCategory::Date => match value {
            JsonValue::String(s) => s.split('T').next().unwrap_or("").to_string(),
            JsonValue::Null => String::new(),
            other => other.to_string(),
        },
        _ => match value {
            JsonValue::Null => String::new(),
            JsonValue::String(s) => s.clone(),
            other => other.to_string(),
        },
    }
}

/// Parse the datetime shapes the backend is known to emit
fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];

    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}
