//! Input widgets, one per field type.

use super::{common_attrs, html_escape, Widget};
use crate::view::FieldDescriptor;

/// Single-line input (text, email, password, number, date, time).
#[derive(Debug, Clone)]
pub struct TextInput {
    /// The HTML input type.
    pub input_type: String,
}

impl TextInput {
    /// Creates an input of the given HTML type.
    pub fn new(input_type: impl Into<String>) -> Self {
        Self {
            input_type: input_type.into(),
        }
    }
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new("text")
    }
}

impl Widget for TextInput {
    fn render(&self, field: &FieldDescriptor) -> String {
        format!(
            r#"<input type="{}" id="{}" value="{}" placeholder="{}"{}>"#,
            self.input_type,
            html_escape(&field.name),
            html_escape(&field.value.as_text()),
            html_escape(&field.placeholder),
            common_attrs(field),
        )
    }

    fn input_type(&self) -> &str {
        &self.input_type
    }
}

/// Multi-line text input.
#[derive(Debug, Clone)]
pub struct TextareaInput {
    /// Number of rows.
    pub rows: usize,
}

impl Default for TextareaInput {
    fn default() -> Self {
        Self { rows: 4 }
    }
}

impl Widget for TextareaInput {
    fn render(&self, field: &FieldDescriptor) -> String {
        format!(
            r#"<textarea id="{}" rows="{}" placeholder="{}"{}>{}</textarea>"#,
            html_escape(&field.name),
            self.rows,
            html_escape(&field.placeholder),
            common_attrs(field),
            html_escape(&field.value.as_text()),
        )
    }

    fn input_type(&self) -> &str {
        "textarea"
    }
}

/// Checkbox bound to a boolean value.
#[derive(Debug, Clone, Default)]
pub struct CheckboxInput;

impl Widget for CheckboxInput {
    fn render(&self, field: &FieldDescriptor) -> String {
        let checked = if field.value.is_blank() { "" } else { " checked" };
        format!(
            r#"<input type="checkbox" id="{}"{}{checked}>"#,
            html_escape(&field.name),
            common_attrs(field),
        )
    }

    fn input_type(&self) -> &str {
        "checkbox"
    }
}

/// A group of radio buttons, one per option.
#[derive(Debug, Clone, Default)]
pub struct RadioGroup;

impl Widget for RadioGroup {
    fn render(&self, field: &FieldDescriptor) -> String {
        let current = field.value.as_text();
        let attrs = common_attrs(field);
        field
            .options
            .iter()
            .map(|option| {
                let checked = if *option == current { " checked" } else { "" };
                let escaped = html_escape(option);
                format!(
                    r#"<label><input type="radio" value="{escaped}"{attrs}{checked}>{escaped}</label>"#
                )
            })
            .collect()
    }

    fn input_type(&self) -> &str {
        "radio"
    }
}

/// Drop-down select.
#[derive(Debug, Clone, Default)]
pub struct SelectInput;

impl Widget for SelectInput {
    fn render(&self, field: &FieldDescriptor) -> String {
        let current = field.value.as_text();
        let options: String = field
            .options
            .iter()
            .map(|option| {
                let selected = if *option == current { " selected" } else { "" };
                let escaped = html_escape(option);
                format!(r#"<option value="{escaped}"{selected}>{escaped}</option>"#)
            })
            .collect();
        format!(
            r#"<select id="{}"{}>{options}</select>"#,
            html_escape(&field.name),
            common_attrs(field),
        )
    }

    fn input_type(&self) -> &str {
        "select"
    }
}

/// File picker. Browsers never accept a value attribute for files.
#[derive(Debug, Clone, Default)]
pub struct FileInput {
    /// Whether several files may be picked.
    pub multiple: bool,
}

impl Widget for FileInput {
    fn render(&self, field: &FieldDescriptor) -> String {
        let multiple = if self.multiple { " multiple" } else { "" };
        format!(
            r#"<input type="file" id="{}"{}{multiple}>"#,
            html_escape(&field.name),
            common_attrs(field),
        )
    }

    fn input_type(&self) -> &str {
        "file"
    }
}
