//! Text-like field constructors.

use crate::schema::{FieldSchema, FieldType};
use crate::validation::ValidationRules;

fn rules_for(required: bool) -> ValidationRules {
    if required {
        ValidationRules::new().required()
    } else {
        ValidationRules::new()
    }
}

/// Creates a single-line text field with a maximum length.
pub fn text_field(name: &str, label: &str, max_length: usize, required: bool) -> FieldSchema {
    FieldSchema::new(name)
        .field_type(FieldType::Text)
        .initial("")
        .label(label)
        .rules(rules_for(required).max_length(max_length))
}

/// Creates a multi-line text field.
pub fn textarea_field(name: &str, label: &str, required: bool) -> FieldSchema {
    let field = FieldSchema::new(name)
        .field_type(FieldType::Textarea)
        .initial("")
        .label(label);

    if required {
        field.rules(rules_for(true))
    } else {
        field
    }
}

/// Creates an email field.
pub fn email_field(name: &str, label: &str, required: bool) -> FieldSchema {
    FieldSchema::new(name)
        .field_type(FieldType::Email)
        .initial("")
        .label(label)
        .rules(rules_for(required).email())
}

/// Creates a required password field.
pub fn password_field(name: &str, label: &str, min_length: Option<usize>) -> FieldSchema {
    let mut rules = rules_for(true);
    if let Some(min) = min_length {
        rules = rules.min_length(min);
    }

    FieldSchema::new(name)
        .field_type(FieldType::Password)
        .initial("")
        .label(label)
        .rules(rules)
}

/// Creates a number field with optional bounds.
pub fn number_field(name: &str, label: &str, min: Option<f64>, max: Option<f64>) -> FieldSchema {
    let mut rules = ValidationRules::new();
    rules.min = min;
    rules.max = max;

    FieldSchema::new(name)
        .field_type(FieldType::Number)
        .initial("")
        .label(label)
        .rules(rules)
}

/// Creates a date field.
pub fn date_field(name: &str, label: &str, required: bool) -> FieldSchema {
    let field = FieldSchema::new(name)
        .field_type(FieldType::Date)
        .initial("")
        .label(label);

    if required {
        field.rules(rules_for(true))
    } else {
        field
    }
}
