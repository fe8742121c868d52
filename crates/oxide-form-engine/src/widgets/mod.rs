//! Widgets rendering field descriptors as HTML inputs.
//!
//! Each field type has one [`Widget`] implementation; [`widget_for`] picks it
//! from the type tag.

mod inputs;

pub use inputs::{CheckboxInput, FileInput, RadioGroup, SelectInput, TextInput, TextareaInput};

use crate::schema::FieldType;
use crate::view::FieldDescriptor;

/// Trait for widgets that render a field as HTML.
pub trait Widget: Send + Sync {
    /// Renders the input control for `field`, without label or error text.
    fn render(&self, field: &FieldDescriptor) -> String;

    /// Returns the HTML input type.
    fn input_type(&self) -> &str {
        "text"
    }
}

/// Returns the widget used for a field type.
pub fn widget_for(field_type: FieldType) -> Box<dyn Widget> {
    match field_type {
        FieldType::Text | FieldType::Default => Box::new(TextInput::new("text")),
        FieldType::Email => Box::new(TextInput::new("email")),
        FieldType::Password => Box::new(TextInput::new("password")),
        FieldType::Number => Box::new(TextInput::new("number")),
        FieldType::Date => Box::new(TextInput::new("date")),
        FieldType::Time => Box::new(TextInput::new("time")),
        FieldType::Textarea => Box::new(TextareaInput::default()),
        FieldType::Checkbox => Box::new(CheckboxInput),
        FieldType::Radio => Box::new(RadioGroup),
        FieldType::Select => Box::new(SelectInput),
        FieldType::File => Box::new(FileInput::default()),
    }
}

/// Returns the id of the inline error element for a field.
pub fn error_id(name: &str) -> String {
    format!("{name}-error")
}

/// Renders the attributes every control carries: name, class and ARIA state.
pub(crate) fn common_attrs(field: &FieldDescriptor) -> String {
    let mut attrs = format!(r#" name="{}""#, html_escape(&field.name));
    if let Some(class) = &field.hints.class_name {
        attrs.push_str(&format!(r#" class="{}""#, html_escape(class)));
    }
    let invalid = !field.error.is_empty();
    attrs.push_str(&format!(r#" aria-invalid="{invalid}""#));
    if invalid {
        attrs.push_str(&format!(
            r#" aria-describedby="{}""#,
            html_escape(&error_id(&field.name))
        ));
    }
    attrs.push_str(&format!(r#" aria-required="{}""#, field.required));
    attrs
}

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
