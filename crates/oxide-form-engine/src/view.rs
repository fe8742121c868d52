//! Render description handed to the rendering layer.

use serde::Serialize;

use crate::options::FormOptions;
use crate::schema::{FieldType, FormSchema, PresentationHints};
use crate::store::FormState;
use crate::value::FieldValue;
use crate::visibility::visible_fields;

/// Everything a widget needs to draw one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    /// Field name, also used as the control id.
    pub name: String,
    /// Selects the widget.
    pub field_type: FieldType,
    /// Stored value.
    pub value: FieldValue,
    /// Error to display inline; empty when none or when display is deferred.
    pub error: String,
    /// Label text.
    pub label: String,
    /// Placeholder text.
    pub placeholder: String,
    /// Choices for select and radio fields.
    pub options: Vec<String>,
    /// Whether the field has a `required` rule.
    pub required: bool,
    /// Whether the field has been touched.
    pub touched: bool,
    /// Presentation hints from the schema.
    pub hints: PresentationHints,
}

/// The submit control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitButton {
    /// Button text; "Loading..." while submitting.
    pub label: String,
    /// Set while a submission is in flight.
    pub disabled: bool,
}

/// Render description of a whole form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    /// Visible fields in declaration order.
    pub fields: Vec<FieldDescriptor>,
    /// Submission error followed by the errors of visible fields.
    pub error_summary: Vec<String>,
    /// Whether the summary block is enabled.
    pub show_error_summary: bool,
    /// `None` when the submit button is hidden.
    pub submit_button: Option<SubmitButton>,
    /// Whether a submission is in flight.
    pub is_submitting: bool,
}

impl FormView {
    /// Builds the render description from the current state.
    pub fn build(schema: &FormSchema, state: &FormState, options: &FormOptions) -> Self {
        let mut error_summary: Vec<String> = state
            .submission_error()
            .map(str::to_string)
            .into_iter()
            .collect();

        let fields: Vec<FieldDescriptor> = visible_fields(schema, state.values())
            .map(|field| {
                let touched = state.is_touched(&field.name);
                let error = state.error(&field.name).unwrap_or_default();
                if !error.is_empty() {
                    error_summary.push(error.to_string());
                }
                FieldDescriptor {
                    name: field.name.clone(),
                    field_type: field.field_type,
                    value: state.value(&field.name).cloned().unwrap_or_default(),
                    error: if options.show_field_errors || touched {
                        error.to_string()
                    } else {
                        String::new()
                    },
                    label: field.label_text().to_string(),
                    placeholder: field.placeholder_text(),
                    options: field.options.clone(),
                    required: field.is_required(),
                    touched,
                    hints: field.hints.clone(),
                }
            })
            .collect();

        let is_submitting = state.is_submitting();
        let submit_button = (!options.hide_submit_button).then(|| SubmitButton {
            label: if is_submitting {
                "Loading...".to_string()
            } else {
                options.submit_label().to_string()
            },
            disabled: is_submitting,
        });

        Self {
            fields,
            error_summary,
            show_error_summary: options.show_error_summary,
            submit_button,
            is_submitting,
        }
    }

    /// Returns whether the aggregate error block should be drawn.
    pub fn has_error_summary(&self) -> bool {
        self.show_error_summary && !self.error_summary.is_empty()
    }

    /// Returns the descriptor of a visible field.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldSchema;
    use crate::store::Action;
    use crate::visibility::field_equals;

    fn schema() -> FormSchema {
        FormSchema::builder()
            .field(FieldSchema::new("first_name").initial("").label("First name"))
            .field(
                FieldSchema::new("last_name")
                    .initial("")
                    .visible_when(field_equals("first_name", "John")),
            )
            .field(
                FieldSchema::new("state")
                    .field_type(FieldType::Select)
                    .options(["Texas", "Ohio"])
                    .initial("Texas"),
            )
            .build()
            .unwrap()
    }

    fn set_error(state: &mut FormState, name: &str, message: &str) {
        state.apply(Action::SetError {
            name: name.to_string(),
            message: message.to_string(),
        });
    }

    #[test]
    fn test_hidden_field_excluded() {
        let schema = schema();
        let mut state = FormState::new(&schema);
        set_error(&mut state, "last_name", "Field is required.");
        let view = FormView::build(&schema, &state, &FormOptions::default());

        assert_eq!(view.fields.len(), 2);
        assert!(view.field("last_name").is_none());
        assert!(view.error_summary.is_empty());
        assert!(!view.has_error_summary());
    }

    #[test]
    fn test_descriptor_contents() {
        let schema = schema();
        let state = FormState::new(&schema);
        let view = FormView::build(&schema, &state, &FormOptions::default());

        let first = view.field("first_name").unwrap();
        assert_eq!(first.label, "First name");
        assert_eq!(first.placeholder, "FIRST_NAME");
        let select = view.field("state").unwrap();
        assert_eq!(select.options, vec!["Texas", "Ohio"]);
        assert_eq!(select.value, FieldValue::from("Texas"));
    }

    #[test]
    fn test_deferred_errors_hidden_until_touched() {
        let schema = schema();
        let mut state = FormState::new(&schema);
        set_error(&mut state, "first_name", "Field is required.");
        let options = FormOptions::new().show_field_errors(false);

        let view = FormView::build(&schema, &state, &options);
        assert_eq!(view.field("first_name").unwrap().error, "");

        state.apply(Action::Touch {
            name: "first_name".to_string(),
        });
        let view = FormView::build(&schema, &state, &options);
        assert_eq!(view.field("first_name").unwrap().error, "Field is required.");
    }

    #[test]
    fn test_summary_starts_with_submission_error() {
        let schema = schema();
        let mut state = FormState::new(&schema);
        set_error(&mut state, "first_name", "Field is required.");
        state.apply(Action::SetSubmissionError(Some("Network down".to_string())));
        let view = FormView::build(&schema, &state, &FormOptions::default());
        assert_eq!(
            view.error_summary,
            vec!["Network down".to_string(), "Field is required.".to_string()]
        );
        assert!(view.has_error_summary());
    }

    #[test]
    fn test_submit_button() {
        let schema = schema();
        let mut state = FormState::new(&schema);
        let options = FormOptions::new().submit_button_text("Send");
        let view = FormView::build(&schema, &state, &options);
        assert_eq!(
            view.submit_button,
            Some(SubmitButton {
                label: "Send".to_string(),
                disabled: false
            })
        );

        state.apply(Action::SetSubmitting(true));
        let view = FormView::build(&schema, &state, &options);
        let button = view.submit_button.unwrap();
        assert_eq!(button.label, "Loading...");
        assert!(button.disabled);

        let view = FormView::build(&schema, &state, &FormOptions::new().hide_submit_button());
        assert!(view.submit_button.is_none());
    }
}
