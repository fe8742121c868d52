//! Checkbox field constructor.

use crate::schema::{FieldSchema, FieldType};
use crate::validation::ValidationRules;

/// Creates a checkbox field, initially unchecked.
///
/// A required checkbox must be checked to be valid.
pub fn checkbox_field(name: &str, label: &str, required: bool) -> FieldSchema {
    let field = FieldSchema::new(name)
        .field_type(FieldType::Checkbox)
        .initial(false)
        .label(label);

    if required {
        field.rules(ValidationRules::new().required())
    } else {
        field
    }
}
