//! Form-wide options.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Options controlling validation, error display and the submit control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormOptions {
    /// Suppress rendering of the submit button.
    pub hide_submit_button: bool,
    /// Skip validation entirely; every field is considered valid.
    pub disable_validation: bool,
    /// Label of the submit button.
    pub custom_submit_button_text: String,
    /// Render the aggregate error block.
    pub show_error_summary: bool,
    /// Show field errors as soon as they are computed. When false, a field's
    /// error is only shown once the field has been touched.
    pub show_field_errors: bool,
    /// Whether `reset` also returns every field to pristine.
    pub clear_touched_on_reset: bool,
    /// Whether `reset` also clears the submission error.
    pub clear_submission_error_on_reset: bool,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            hide_submit_button: false,
            disable_validation: false,
            custom_submit_button_text: "Submit".to_string(),
            show_error_summary: true,
            show_field_errors: true,
            clear_touched_on_reset: false,
            clear_submission_error_on_reset: false,
        }
    }
}

impl FormOptions {
    /// Creates options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads options from a JSON object. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Hides the submit button.
    #[must_use]
    pub fn hide_submit_button(mut self) -> Self {
        self.hide_submit_button = true;
        self
    }

    /// Disables validation.
    #[must_use]
    pub fn disable_validation(mut self) -> Self {
        self.disable_validation = true;
        self
    }

    /// Sets the submit button label.
    #[must_use]
    pub fn submit_button_text(mut self, text: impl Into<String>) -> Self {
        self.custom_submit_button_text = text.into();
        self
    }

    /// Enables or disables the aggregate error block.
    #[must_use]
    pub fn show_error_summary(mut self, show: bool) -> Self {
        self.show_error_summary = show;
        self
    }

    /// Enables or disables immediate inline errors.
    #[must_use]
    pub fn show_field_errors(mut self, show: bool) -> Self {
        self.show_field_errors = show;
        self
    }

    /// Makes `reset` clear touched flags as well.
    #[must_use]
    pub fn clear_touched_on_reset(mut self) -> Self {
        self.clear_touched_on_reset = true;
        self
    }

    /// Makes `reset` clear the submission error as well.
    #[must_use]
    pub fn clear_submission_error_on_reset(mut self) -> Self {
        self.clear_submission_error_on_reset = true;
        self
    }

    /// Returns the label for the submit button, falling back to "Submit".
    pub fn submit_label(&self) -> &str {
        if self.custom_submit_button_text.is_empty() {
            "Submit"
        } else {
            &self.custom_submit_button_text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = FormOptions::default();
        assert!(!options.hide_submit_button);
        assert!(!options.disable_validation);
        assert!(options.show_error_summary);
        assert!(options.show_field_errors);
        assert_eq!(options.submit_label(), "Submit");
    }

    #[test]
    fn test_from_json_partial() {
        let options =
            FormOptions::from_json(r#"{"hideSubmitButton": true, "showFieldErrors": false}"#)
                .unwrap();
        assert!(options.hide_submit_button);
        assert!(!options.show_field_errors);
        assert!(options.show_error_summary);
        assert_eq!(options.custom_submit_button_text, "Submit");
    }

    #[test]
    fn test_empty_label_falls_back() {
        let options = FormOptions::new().submit_button_text("");
        assert_eq!(options.submit_label(), "Submit");
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(FormOptions::from_json("not json").is_err());
    }
}
