//! Error types for the form engine.

use thiserror::Error;

/// Configuration faults raised by schema construction and form events.
///
/// Field validation failures are not errors in this sense: they are stored as
/// messages in the form state. Submission failures are stored separately as
/// the form's submission error.
#[derive(Debug, Error)]
pub enum FormError {
    /// An event or attachment named a field the schema does not declare.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// Two fields share the same name.
    #[error("duplicate field: {0}")]
    DuplicateField(String),

    /// A select or radio field declares no options.
    #[error("field {0} requires a non-empty options list")]
    MissingOptions(String),

    /// A field was declared with an empty name.
    #[error("field name must not be empty")]
    EmptyFieldName,

    /// A regex or pattern rule failed to compile.
    #[error("invalid pattern for field {field}: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    /// A JSON form definition or options document could not be parsed.
    #[error("failed to parse form definition: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;
