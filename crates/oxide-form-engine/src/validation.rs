//! Field validation: declarative rules and custom validators.
//!
//! Declarative rules are checked synchronously in a fixed order. Custom
//! validators share a single asynchronous contract; synchronous ones are
//! wrapped in an already-resolved future, so the pipeline has one code path.

use std::future::Future;
use std::pin::Pin;

use futures::future;
use regex::Regex;

use crate::schema::FieldSchema;
use crate::value::FieldValue;

/// A boxed future for async validation and submission.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Future returned by a custom validator.
///
/// `Err(message)` reports a validation failure. An empty message counts as
/// success.
pub type ValidationFuture = BoxFuture<'static, Result<(), String>>;

/// Trait for custom field validators.
///
/// Any `Fn(FieldValue) -> impl Future<Output = Result<(), String>>` closure
/// implements this trait. Use [`sync_validator`] for plain functions.
pub trait CustomValidator: Send + Sync {
    /// Validates a candidate value.
    fn validate(&self, value: &FieldValue) -> ValidationFuture;
}

impl<F, Fut> CustomValidator for F
where
    F: Fn(FieldValue) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), String>> + Send + 'static,
{
    fn validate(&self, value: &FieldValue) -> ValidationFuture {
        Box::pin(self(value.clone()))
    }
}

/// Adapter that runs a synchronous check as a custom validator.
pub struct SyncValidator<F>(F);

impl<F> CustomValidator for SyncValidator<F>
where
    F: Fn(&FieldValue) -> Result<(), String> + Send + Sync,
{
    fn validate(&self, value: &FieldValue) -> ValidationFuture {
        Box::pin(future::ready((self.0)(value)))
    }
}

/// Wraps a synchronous check so it can be used as a custom validator.
pub fn sync_validator<F>(check: F) -> SyncValidator<F>
where
    F: Fn(&FieldValue) -> Result<(), String> + Send + Sync + 'static,
{
    SyncValidator(check)
}

/// How declarative rules and a custom validator combine on one field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationPolicy {
    /// If the field has rules, only the rules run; the custom validator runs
    /// only on fields without rules.
    #[default]
    RulesXorCustom,
    /// Rules run first. If they pass, the custom validator runs too.
    RulesThenCustom,
}

/// Declarative validation rules for a field.
///
/// All rules are checked. When several fail, the message of the last failing
/// rule in evaluation order is reported: min length, required, regex, email,
/// max length, min, max, pattern.
#[derive(Debug, Clone, Default)]
pub struct ValidationRules {
    /// Value must not be blank.
    pub required: bool,
    /// Minimum length in characters (or items).
    pub min_length: Option<usize>,
    /// Maximum length in characters (or items).
    pub max_length: Option<usize>,
    /// Minimum numeric value.
    pub min: Option<f64>,
    /// Maximum numeric value.
    pub max: Option<f64>,
    /// Value must look like an email address.
    pub email: bool,
    /// Expression the text must match.
    pub regex: Option<Regex>,
    /// Message reported when `regex` does not match.
    pub regex_message: Option<String>,
    /// Second expression the text must match, checked last.
    pub pattern: Option<Regex>,
    /// Message reported when `pattern` does not match.
    pub pattern_message: Option<String>,
}

impl ValidationRules {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires a non-blank value.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the minimum length.
    #[must_use]
    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    /// Sets the maximum length.
    #[must_use]
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Sets the minimum numeric value.
    #[must_use]
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the maximum numeric value.
    #[must_use]
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Requires an `@` in the value.
    #[must_use]
    pub fn email(mut self) -> Self {
        self.email = true;
        self
    }

    /// Requires the value to match `regex`.
    #[must_use]
    pub fn regex(mut self, regex: Regex) -> Self {
        self.regex = Some(regex);
        self
    }

    /// Sets the message for a failed `regex` rule.
    #[must_use]
    pub fn regex_message(mut self, message: impl Into<String>) -> Self {
        self.regex_message = Some(message.into());
        self
    }

    /// Requires the value to match `pattern`.
    #[must_use]
    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Sets the message for a failed `pattern` rule.
    #[must_use]
    pub fn pattern_message(mut self, message: impl Into<String>) -> Self {
        self.pattern_message = Some(message.into());
        self
    }

    /// Checks a candidate value against every rule.
    ///
    /// Returns the message of the last failing rule, or `None`. A candidate
    /// that is not a number fails neither `min` nor `max`.
    pub fn check(&self, value: &FieldValue) -> Option<String> {
        let mut error = None;
        let text = value.as_text();
        let len = value.len();

        if let (Some(min_length), Some(len)) = (self.min_length, len) {
            if len < min_length {
                error = Some(format!(
                    "Field must be at least {min_length} characters long."
                ));
            }
        }

        if self.required && value.is_blank() {
            error = Some("Field is required.".to_string());
        }

        if let Some(regex) = &self.regex {
            if !regex.is_match(&text) {
                error = Some(
                    self.regex_message
                        .clone()
                        .unwrap_or_else(|| "Invalid value.".to_string()),
                );
            }
        }

        if self.email && !text.contains('@') {
            error = Some("Field must be a valid email address.".to_string());
        }

        if let (Some(max_length), Some(len)) = (self.max_length, len) {
            if len > max_length {
                error = Some(format!("Field must not exceed {max_length} characters."));
            }
        }

        if self.min.is_some() || self.max.is_some() {
            let number = value.to_number();

            if let Some(min) = self.min {
                if number < min {
                    error = Some(format!("Value must be greater than or equal to {min}."));
                }
            }

            if let Some(max) = self.max {
                if number > max {
                    error = Some(format!("Value must be less than or equal to {max}."));
                }
            }
        }

        if let Some(pattern) = &self.pattern {
            if !pattern.is_match(&text) {
                error = Some(
                    self.pattern_message
                        .clone()
                        .unwrap_or_else(|| "Invalid value.".to_string()),
                );
            }
        }

        error
    }
}

/// Validates a candidate value for a field.
///
/// The returned future resolves to the error message, or `None` when the
/// value is valid or validation is disabled. Declarative rules are evaluated
/// before this function returns; only a custom validator can suspend.
pub fn validate_field(
    field: &FieldSchema,
    candidate: &FieldValue,
    disabled: bool,
) -> BoxFuture<'static, Option<String>> {
    if disabled {
        return Box::pin(future::ready(None));
    }

    match (&field.rules, &field.validator) {
        (Some(rules), validator) => {
            let error = rules.check(candidate);
            match (field.policy, validator) {
                (ValidationPolicy::RulesThenCustom, Some(validator)) if error.is_none() => {
                    run_custom(validator.as_ref(), candidate)
                }
                _ => Box::pin(future::ready(error)),
            }
        }
        (None, Some(validator)) => run_custom(validator.as_ref(), candidate),
        (None, None) => Box::pin(future::ready(None)),
    }
}

fn run_custom(
    validator: &dyn CustomValidator,
    candidate: &FieldValue,
) -> BoxFuture<'static, Option<String>> {
    let pending = validator.validate(candidate);
    Box::pin(async move {
        match pending.await {
            Ok(()) => None,
            Err(message) if message.is_empty() => None,
            Err(message) => Some(message),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    fn check(rules: &ValidationRules, value: &str) -> Option<String> {
        rules.check(&FieldValue::from(value))
    }

    #[test]
    fn test_required_rule() {
        let rules = ValidationRules::new().required();
        assert_eq!(check(&rules, ""), Some("Field is required.".to_string()));
        assert_eq!(check(&rules, "hello"), None);
        assert_eq!(
            rules.check(&FieldValue::Bool(false)),
            Some("Field is required.".to_string())
        );
    }

    #[test]
    fn test_min_length_rule() {
        let rules = ValidationRules::new().min_length(3);
        assert_eq!(
            check(&rules, "ab"),
            Some("Field must be at least 3 characters long.".to_string())
        );
        assert_eq!(check(&rules, "abc"), None);
    }

    #[test]
    fn test_max_length_rule() {
        let rules = ValidationRules::new().max_length(5);
        assert_eq!(check(&rules, "hello"), None);
        assert_eq!(
            check(&rules, "hello world"),
            Some("Field must not exceed 5 characters.".to_string())
        );
    }

    #[test]
    fn test_email_rule() {
        let rules = ValidationRules::new().email();
        assert_eq!(check(&rules, "user@example.com"), None);
        assert_eq!(
            check(&rules, "invalid"),
            Some("Field must be a valid email address.".to_string())
        );
    }

    #[test]
    fn test_regex_rule_with_message() {
        let rules = ValidationRules::new()
            .regex(Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap())
            .regex_message("Enter a valid date.");
        assert_eq!(check(&rules, "2024-01-15"), None);
        assert_eq!(
            check(&rules, "not a date"),
            Some("Enter a valid date.".to_string())
        );
    }

    #[test]
    fn test_pattern_default_message() {
        let rules = ValidationRules::new().pattern(Regex::new("^[a-z]+$").unwrap());
        assert_eq!(check(&rules, "Abc"), Some("Invalid value.".to_string()));
    }

    #[test]
    fn test_range_rules() {
        let rules = ValidationRules::new().min(18.0).max(99.0);
        assert_eq!(
            check(&rules, "15"),
            Some("Value must be greater than or equal to 18.".to_string())
        );
        assert_eq!(check(&rules, "25"), None);
        assert_eq!(
            check(&rules, "120"),
            Some("Value must be less than or equal to 99.".to_string())
        );
    }

    #[test]
    fn test_non_numeric_passes_range_silently() {
        let rules = ValidationRules::new().min(18.0).max(99.0);
        assert_eq!(check(&rules, "abc"), None);
    }

    #[test]
    fn test_last_failing_rule_wins() {
        let rules = ValidationRules::new().required().min_length(3).max_length(1);
        // min length and required both fail on ""; required is evaluated later.
        assert_eq!(check(&rules, ""), Some("Field is required.".to_string()));
        // min length fails first, max length fails later and overwrites it.
        let rules = ValidationRules::new().min_length(5).max_length(1).email();
        assert_eq!(
            check(&rules, "ab"),
            Some("Field must not exceed 1 characters.".to_string())
        );
    }

    #[test]
    fn test_rules_exclude_custom_by_default() {
        let field = FieldSchema::new("name")
            .rules(ValidationRules::new().min_length(2))
            .validator(sync_validator(|_| Err("custom".to_string())));
        let error = block_on(validate_field(&field, &FieldValue::from("abc"), false));
        assert_eq!(error, None);
    }

    #[test]
    fn test_rules_then_custom() {
        let field = FieldSchema::new("name")
            .rules(ValidationRules::new().min_length(2))
            .validator(sync_validator(|_| Err("custom".to_string())))
            .policy(ValidationPolicy::RulesThenCustom);
        let error = block_on(validate_field(&field, &FieldValue::from("abc"), false));
        assert_eq!(error, Some("custom".to_string()));

        let error = block_on(validate_field(&field, &FieldValue::from("a"), false));
        assert_eq!(
            error,
            Some("Field must be at least 2 characters long.".to_string())
        );
    }

    #[test]
    fn test_async_custom_validator() {
        let field = FieldSchema::new("username").validator(|value: FieldValue| async move {
            if value.as_text() == "taken" {
                Err("Username is taken.".to_string())
            } else {
                Ok(())
            }
        });
        let error = block_on(validate_field(&field, &FieldValue::from("taken"), false));
        assert_eq!(error, Some("Username is taken.".to_string()));
        let error = block_on(validate_field(&field, &FieldValue::from("free"), false));
        assert_eq!(error, None);
    }

    #[test]
    fn test_empty_custom_message_is_success() {
        let field = FieldSchema::new("x").validator(sync_validator(|_| Err(String::new())));
        let error = block_on(validate_field(&field, &FieldValue::from("v"), false));
        assert_eq!(error, None);
    }

    #[test]
    fn test_disabled_validation() {
        let field = FieldSchema::new("x").rules(ValidationRules::new().required());
        let error = block_on(validate_field(&field, &FieldValue::from(""), true));
        assert_eq!(error, None);
    }
}
