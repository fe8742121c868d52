//! Choice field constructors.

use crate::schema::{FieldSchema, FieldType};
use crate::validation::ValidationRules;

fn choice(
    field_type: FieldType,
    name: &str,
    label: &str,
    choices: &[&str],
    required: bool,
) -> FieldSchema {
    let field = FieldSchema::new(name)
        .field_type(field_type)
        .initial(choices.first().copied().unwrap_or_default())
        .label(label)
        .options(choices.iter().copied());

    if required {
        field.rules(ValidationRules::new().required())
    } else {
        field
    }
}

/// Creates a drop-down select field. The first choice is the initial value.
pub fn select_field(name: &str, label: &str, choices: &[&str], required: bool) -> FieldSchema {
    choice(FieldType::Select, name, label, choices, required)
}

/// Creates a radio group field. The first choice is the initial value.
pub fn radio_field(name: &str, label: &str, choices: &[&str], required: bool) -> FieldSchema {
    choice(FieldType::Radio, name, label, choices, required)
}
