//! Value formatting applied before a changed value is stored.

use std::sync::Arc;

use crate::schema::FieldSchema;
use crate::value::FieldValue;

/// A pure function normalizing a candidate value.
pub type Formatter = Arc<dyn Fn(&FieldValue) -> FieldValue + Send + Sync>;

/// Returns the value to store for a candidate.
///
/// File fields are stored as-is. Other fields go through their formatter, if
/// they declare one.
pub fn format_value(field: &FieldSchema, candidate: FieldValue) -> FieldValue {
    if field.field_type.bypasses_formatting() {
        return candidate;
    }
    match &field.formatter {
        Some(formatter) => formatter(&candidate),
        None => candidate,
    }
}

fn map_text(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Formatter {
    Arc::new(move |value: &FieldValue| match value {
        FieldValue::Text(text) => FieldValue::Text(f(text)),
        other => other.clone(),
    })
}

/// Upper-cases text values.
pub fn uppercase() -> Formatter {
    map_text(str::to_uppercase)
}

/// Lower-cases text values.
pub fn lowercase() -> Formatter {
    map_text(str::to_lowercase)
}

/// Trims surrounding whitespace from text values.
pub fn trim() -> Formatter {
    map_text(|s| s.trim().to_string())
}

/// Prepends `prefix` to text values that do not already start with it.
pub fn prefix(prefix: impl Into<String>) -> Formatter {
    let prefix = prefix.into();
    map_text(move |s| {
        if s.starts_with(&prefix) {
            s.to_string()
        } else {
            format!("{prefix}{s}")
        }
    })
}
