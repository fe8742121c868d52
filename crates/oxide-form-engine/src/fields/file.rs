//! File field constructor.

use crate::schema::{FieldSchema, FieldType};
use crate::value::FieldValue;

/// Creates a file field holding an empty file set.
///
/// File values are stored as picked; formatters never run on them.
pub fn file_field(name: &str, label: &str) -> FieldSchema {
    FieldSchema::new(name)
        .field_type(FieldType::File)
        .initial(FieldValue::Files(Vec::new()))
        .label(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_field() {
        let field = file_field("attachments", "Attachments");
        assert_eq!(field.field_type, FieldType::File);
        assert_eq!(field.initial_value, FieldValue::Files(Vec::new()));
        assert!(field.rules.is_none());
    }
}
