//! Form runtime state and its transitions.
//!
//! [`FormState`] is only mutated through [`FormState::apply`], which consumes
//! a closed set of [`Action`]s.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::schema::FormSchema;
use crate::value::{FieldValue, FormValues};

/// Current error message of every field; empty means no error.
pub type FormErrors = HashMap<String, String>;

/// Whether a field has been touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Touch {
    /// Not yet blurred, and the form not yet submitted.
    #[default]
    Pristine,
    /// Blurred, or the form was submitted.
    Touched,
}

/// Derived per-field status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldStatus {
    /// Untouched, no error.
    Pristine,
    /// Touched, no error.
    Touched,
    /// Untouched, with an error.
    Errored,
    /// Touched, with an error.
    TouchedErrored,
}

/// A state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Overwrite a field's stored value.
    SetValue { name: String, value: FieldValue },
    /// Overwrite a field's error message.
    SetError { name: String, message: String },
    /// Set the in-flight submission flag.
    SetSubmitting(bool),
    /// Clear every field error.
    ResetErrors,
    /// Set or clear the submission error.
    SetSubmissionError(Option<String>),
    /// Mark a field touched.
    Touch { name: String },
    /// Return every field to pristine.
    ResetTouched,
}

/// The mutable runtime model of one form instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormState {
    values: FormValues,
    errors: FormErrors,
    touched: HashMap<String, Touch>,
    is_submitting: bool,
    submission_error: Option<String>,
    #[serde(skip)]
    initial_values: FormValues,
}

impl FormState {
    /// Creates the construction-time state for a schema.
    pub fn new(schema: &FormSchema) -> Self {
        let initial_values = schema.initial_values();
        let errors = schema
            .iter()
            .map(|f| (f.name.clone(), String::new()))
            .collect();
        let touched = schema
            .iter()
            .map(|f| (f.name.clone(), Touch::Pristine))
            .collect();
        Self {
            values: initial_values.clone(),
            errors,
            touched,
            is_submitting: false,
            submission_error: None,
            initial_values,
        }
    }

    /// Applies a transition.
    ///
    /// Transitions naming a field outside the schema leave the state
    /// unchanged.
    pub fn apply(&mut self, action: Action) {
        debug!(?action, "applying form transition");
        match action {
            Action::SetValue { name, value } => match self.values.get_mut(&name) {
                Some(slot) => *slot = value,
                None => warn!(field = %name, "ignoring value for unknown field"),
            },
            Action::SetError { name, message } => match self.errors.get_mut(&name) {
                Some(slot) => *slot = message,
                None => warn!(field = %name, "ignoring error for unknown field"),
            },
            Action::SetSubmitting(submitting) => self.is_submitting = submitting,
            Action::ResetErrors => self.errors.values_mut().for_each(String::clear),
            Action::SetSubmissionError(message) => self.submission_error = message,
            Action::Touch { name } => match self.touched.get_mut(&name) {
                Some(slot) => *slot = Touch::Touched,
                None => warn!(field = %name, "ignoring touch for unknown field"),
            },
            Action::ResetTouched => self
                .touched
                .values_mut()
                .for_each(|t| *t = Touch::Pristine),
        }
    }

    /// Returns all stored values.
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Returns all error messages.
    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// Returns the values the form was constructed with.
    pub fn initial_values(&self) -> &FormValues {
        &self.initial_values
    }

    /// Returns a field's stored value.
    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Returns a field's error message.
    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    /// Returns a field's touched state.
    pub fn touch(&self, name: &str) -> Option<Touch> {
        self.touched.get(name).copied()
    }

    /// Returns whether a field has been touched.
    pub fn is_touched(&self, name: &str) -> bool {
        self.touch(name) == Some(Touch::Touched)
    }

    /// Returns whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Returns the last submission failure.
    pub fn submission_error(&self) -> Option<&str> {
        self.submission_error.as_deref()
    }

    /// Returns whether any field has an error.
    pub fn has_errors(&self) -> bool {
        self.errors.values().any(|e| !e.is_empty())
    }

    /// Returns a field's derived status.
    pub fn status(&self, name: &str) -> Option<FieldStatus> {
        let touched = self.touch(name)? == Touch::Touched;
        let errored = !self.error(name)?.is_empty();
        Some(match (touched, errored) {
            (false, false) => FieldStatus::Pristine,
            (true, false) => FieldStatus::Touched,
            (false, true) => FieldStatus::Errored,
            (true, true) => FieldStatus::TouchedErrored,
        })
    }

    /// Returns whether a field's value differs from its initial value.
    pub fn is_dirty(&self, name: &str) -> bool {
        self.values.get(name) != self.initial_values.get(name)
    }

    /// Returns whether any field differs from its initial value.
    pub fn is_form_dirty(&self) -> bool {
        self.values.keys().any(|name| self.is_dirty(name))
    }
}
