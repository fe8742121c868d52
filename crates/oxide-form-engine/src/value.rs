//! Field values.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Snapshot of every field's stored value, keyed by field name.
pub type FormValues = HashMap<String, FieldValue>;

static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?")
        .expect("numeric prefix pattern is valid")
});

/// An opaque handle to a file picked by the user.
///
/// The engine never reads file contents; it only stores and forwards handles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    /// File name as reported by the host.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl FileHandle {
    /// Creates a new file handle.
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: None,
        }
    }

    /// Sets the MIME type.
    #[must_use]
    pub fn mime_type(mut self, mime: impl Into<String>) -> Self {
        self.mime_type = Some(mime.into());
        self
    }
}

/// A value held by a form field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// No value.
    #[default]
    Null,
    /// A boolean (checkboxes).
    Bool(bool),
    /// A number.
    Number(f64),
    /// Free text.
    Text(String),
    /// Several selected choices.
    List(Vec<String>),
    /// A set of picked files.
    Files(Vec<FileHandle>),
}

impl FieldValue {
    /// Returns the textual projection of this value.
    ///
    /// Rules that test text (regex, email, pattern) see this projection.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Null => Cow::Borrowed(""),
            Self::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            Self::Number(n) => Cow::Owned(n.to_string()),
            Self::Text(s) => Cow::Borrowed(s),
            Self::List(items) => Cow::Owned(items.join(",")),
            Self::Files(files) => Cow::Owned(
                files
                    .iter()
                    .map(|f| f.name.as_str())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
        }
    }

    /// Returns the length of values that have one.
    ///
    /// Text is measured in characters. Numbers, booleans and `Null` have no
    /// length, so length rules never fire for them.
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Text(s) => Some(s.chars().count()),
            Self::List(items) => Some(items.len()),
            Self::Files(files) => Some(files.len()),
            Self::Null | Self::Bool(_) | Self::Number(_) => None,
        }
    }

    /// Returns whether the value counts as missing for `required`.
    ///
    /// Empty text, `false`, zero, NaN and `Null` are blank. Empty lists and
    /// empty file sets are not.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(b) => !b,
            Self::Number(n) => *n == 0.0 || n.is_nan(),
            Self::Text(s) => s.is_empty(),
            Self::List(_) | Self::Files(_) => false,
        }
    }

    /// Coerces the value to a number.
    ///
    /// Text is parsed from its leading numeric prefix, so `"15 years"` is 15.
    /// Values with no numeric prefix become NaN.
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Bool(b) => f64::from(u8::from(*b)),
            other => {
                let text = other.as_text();
                NUMERIC_PREFIX
                    .find(&text)
                    .and_then(|m| m.as_str().trim().parse::<f64>().ok())
                    .unwrap_or(f64::NAN)
            }
        }
    }

    /// Returns the text if this is a `Text` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean if this is a `Bool` value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<FileHandle>> for FieldValue {
    fn from(value: Vec<FileHandle>) -> Self {
        Self::Files(value)
    }
}
