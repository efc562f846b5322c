//! Decoding of Bitable field values.
//!
//! ## Observed shapes per column type
//!
//! - **Text**: a plain string, or an array of segment objects
//!   `[{"text": "...", ...}]` when the cell holds rich text.
//! - **Single-select / lookup**: a plain string, or a one-element array
//!   holding either the option text or an `{"text": ...}` object.
//! - **Number**: a JSON number; checkbox columns are JSON booleans.
//! - **URL**: an object `{"link": "...", "text": "..."}`.
//!
//! All helpers are total: a missing field or unexpected shape decodes to
//! `None`/`false`, never an error. Records with unusable required fields are
//! skipped at the client layer with a warning.

use serde_json::{Map, Value};

/// Text content of a field: plain string, segment array, or option object.
#[must_use]
pub fn text_field(fields: &Map<String, Value>, name: &str) -> Option<String> {
    fields.get(name).and_then(text_value)
}

/// Single-select or lookup field, decoded to its option label.
#[must_use]
pub fn select_field(fields: &Map<String, Value>, name: &str) -> Option<String> {
    fields.get(name).and_then(text_value)
}

fn text_value(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .filter_map(text_value)
            .collect::<Vec<_>>()
            .join(""),
        Value::Object(obj) => obj.get("text").and_then(Value::as_str)?.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Checkbox field; absent decodes to `false`.
#[must_use]
pub fn bool_field(fields: &Map<String, Value>, name: &str) -> bool {
    fields
        .get(name)
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Number field as `u64`; accepts numbers (including floats written by the
/// number column) and numeric strings.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn u64_field(fields: &Map<String, Value>, name: &str) -> Option<u64> {
    match fields.get(name)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[must_use]
pub fn f64_field(fields: &Map<String, Value>, name: &str) -> Option<f64> {
    match fields.get(name)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn i64_field(fields: &Map<String, Value>, name: &str) -> Option<i64> {
    match fields.get(name)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// URL field: the `link` member of its object form, or a plain string.
#[must_use]
pub fn link_field(fields: &Map<String, Value>, name: &str) -> Option<String> {
    let value = fields.get(name)?;
    let link = match value {
        Value::Object(obj) => obj.get("link").and_then(Value::as_str)?.to_string(),
        Value::String(s) => s.clone(),
        _ => return None,
    };
    if link.is_empty() {
        None
    } else {
        Some(link)
    }
}
