//! HTML rendering of a [`FormView`].

use ironhtml::html;
use ironhtml::typed::Element;
use ironhtml_elements::{Div, Li, Ul};

use crate::schema::FieldType;
use crate::view::{FieldDescriptor, FormView, SubmitButton};
use crate::widgets::{error_id, widget_for};

/// Renders one field: label, input control, inline error and help text.
///
/// Radio groups have no single control to point at, so their label carries
/// no `for` attribute.
pub fn render_field(field: &FieldDescriptor) -> String {
    let id = field.name.clone();
    let required_marker = if field.required { " *" } else { "" };
    let label_text = format!("{}{}", field.label, required_marker);
    let label_class = field.hints.label_class_name.clone().unwrap_or_default();
    let container_class = field.hints.container_class_name.clone().unwrap_or_default();

    let widget_html = widget_for(field.field_type).render(field);

    let label_el = html! {
        label.class(#label_class) { #label_text }
    }
    .when(field.field_type != FieldType::Radio, |l| l.attr("for", id.as_str()));

    let error = field.error.clone();
    let error_el_id = error_id(&field.name);
    let help_text = field.hints.help_text.clone();

    html! { div.class(#container_class) }
        .raw(label_el.render())
        .raw(&widget_html)
        .when(!error.is_empty(), |d| {
            d.child::<Div, _>(|e| {
                e.class("field-error")
                    .attr("id", error_el_id.as_str())
                    .attr("role", "alert")
                    .text(&error)
            })
        })
        .when(help_text.is_some(), |d| {
            d.child::<Div, _>(|h| {
                h.class("form-text")
                    .text(help_text.as_deref().unwrap_or(""))
            })
        })
        .render()
}

fn render_submit_button(button: &SubmitButton) -> String {
    let label = button.label.clone();
    html! {
        button.type_("submit") { #label }
    }
    .when(button.disabled, |b| b.attr("disabled", "disabled"))
    .render()
}

/// Renders a complete form: fields, error summary and submit button.
pub fn render_form(view: &FormView) -> String {
    let mut form = html! {
        form.class("form-engine")
    };

    for field in &view.fields {
        let field_html = render_field(field);
        form = form.child::<Div, _>(|d| d.raw(&field_html));
    }

    if view.has_error_summary() {
        form = form.child::<Div, _>(|d| {
            d.class("error-summary")
                .attr("role", "alert")
                .child::<Ul, _>(|ul| {
                    ul.children(view.error_summary.iter(), |e, li: Element<Li>| li.text(e))
                })
        });
    }

    if let Some(button) = &view.submit_button {
        let button_html = render_submit_button(button);
        form = form.child::<Div, _>(|d| d.raw(&button_html));
    }

    form.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::FormOptions;
    use crate::schema::{FieldSchema, FieldType, FormSchema};
    use crate::store::{Action, FormState};
    use crate::validation::ValidationRules;

    fn schema() -> FormSchema {
        FormSchema::builder()
            .field(
                FieldSchema::new("email")
                    .field_type(FieldType::Email)
                    .initial("")
                    .label("Email")
                    .rules(ValidationRules::new().required().email())
                    .help_text("We will never share your email"),
            )
            .field(
                FieldSchema::new("gender")
                    .field_type(FieldType::Radio)
                    .options(["male", "female", "other"])
                    .initial("male"),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_render_field_no_errors() {
        let schema = schema();
        let state = FormState::new(&schema);
        let view = FormView::build(&schema, &state, &FormOptions::default());
        let html = render_field(view.field("email").unwrap());
        assert!(html.contains("Email *"));
        assert!(html.contains("We will never share your email"));
        assert!(!html.contains("field-error"));
    }

    #[test]
    fn test_render_field_with_error() {
        let schema = schema();
        let mut state = FormState::new(&schema);
        state.apply(Action::SetError {
            name: "email".to_string(),
            message: "Field is required.".to_string(),
        });
        let view = FormView::build(&schema, &state, &FormOptions::default());
        let html = render_field(view.field("email").unwrap());
        assert!(html.contains("field-error"));
        assert!(html.contains("Field is required."));
        assert!(html.contains("email-error"));
    }

    #[test]
    fn test_render_form() {
        let schema = schema();
        let mut state = FormState::new(&schema);
        state.apply(Action::SetError {
            name: "email".to_string(),
            message: "Field is required.".to_string(),
        });
        let options = FormOptions::new().submit_button_text("Send");
        let html = render_form(&FormView::build(&schema, &state, &options));
        assert!(html.contains("error-summary"));
        assert!(html.contains(r#"type="radio""#));
        assert!(html.contains(">Send</button>"));
    }

    #[test]
    fn test_label_targets_control() {
        let schema = schema();
        let state = FormState::new(&schema);
        let view = FormView::build(&schema, &state, &FormOptions::default());
        assert!(render_field(view.field("email").unwrap()).contains(r#"for="email""#));
        assert!(!render_field(view.field("gender").unwrap()).contains("for="));
    }

    #[test]
    fn test_submit_button_disabled_while_submitting() {
        let schema = schema();
        let mut state = FormState::new(&schema);
        let options = FormOptions::default();

        let html = render_form(&FormView::build(&schema, &state, &options));
        assert!(html.contains(r#"type="submit""#));
        assert!(html.contains(">Submit</button>"));
        assert!(!html.contains("disabled"));

        state.apply(Action::SetSubmitting(true));
        let html = render_form(&FormView::build(&schema, &state, &options));
        assert!(html.contains(r#"disabled="disabled""#));
        assert!(html.contains(">Loading...</button>"));
    }

    #[test]
    fn test_render_form_without_button_or_summary() {
        let schema = schema();
        let mut state = FormState::new(&schema);
        state.apply(Action::SetError {
            name: "email".to_string(),
            message: "Field is required.".to_string(),
        });
        let options = FormOptions::new()
            .hide_submit_button()
            .show_error_summary(false);
        let html = render_form(&FormView::build(&schema, &state, &options));
        assert!(!html.contains("<button"));
        assert!(!html.contains("error-summary"));
    }
}
