//! Field and form schemas.
//!
//! A schema is the immutable description of a form: one [`FieldSchema`] per
//! field, in render order. Schemas are built with the builder methods or
//! loaded from JSON; functions (formatters, custom validators, visibility
//! predicates) are attached in code.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};
use crate::format::Formatter;
use crate::validation::{CustomValidator, ValidationPolicy, ValidationRules};
use crate::value::{FieldValue, FormValues};
use crate::visibility::VisibilityPredicate;

/// The kind of input a field represents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Single-line text.
    Text,
    /// Email address.
    Email,
    /// Masked text.
    Password,
    /// Numeric input.
    Number,
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Boolean checkbox; candidates are coerced to `Bool`.
    Checkbox,
    /// One choice among `options`, shown as radio buttons.
    Radio,
    /// One choice among `options`, shown as a drop-down.
    Select,
    /// Multi-line text.
    Textarea,
    /// File picker; values bypass formatting.
    File,
    /// Fallback for unrecognized types; rendered as a text input.
    #[default]
    Default,
}

impl FieldType {
    /// Parses a type tag. Unknown tags map to [`FieldType::Default`].
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "text" => Self::Text,
            "email" => Self::Email,
            "password" => Self::Password,
            "number" => Self::Number,
            "date" => Self::Date,
            "time" => Self::Time,
            "checkbox" => Self::Checkbox,
            "radio" => Self::Radio,
            "select" => Self::Select,
            "textarea" => Self::Textarea,
            "file" => Self::File,
            _ => Self::Default,
        }
    }

    /// Returns the type tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Number => "number",
            Self::Date => "date",
            Self::Time => "time",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Select => "select",
            Self::Textarea => "textarea",
            Self::File => "file",
            Self::Default => "default",
        }
    }

    /// Returns whether the type needs an options list.
    pub fn requires_options(self) -> bool {
        matches!(self, Self::Select | Self::Radio)
    }

    /// Returns whether values of this type skip the formatter.
    pub fn bypasses_formatting(self) -> bool {
        self == Self::File
    }

    /// Coerces a raw input value to the shape this type stores.
    ///
    /// Checkboxes always hold a boolean; other types keep the raw value.
    pub fn coerce(self, raw: FieldValue) -> FieldValue {
        match (self, raw) {
            (Self::Checkbox, FieldValue::Bool(b)) => FieldValue::Bool(b),
            (Self::Checkbox, FieldValue::Text(text)) => FieldValue::Bool(matches!(
                text.trim().to_ascii_lowercase().as_str(),
                "true" | "on" | "checked" | "1" | "yes"
            )),
            (Self::Checkbox, other) => FieldValue::Bool(!other.is_blank()),
            (_, raw) => raw,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation hints passed through to rendering untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PresentationHints {
    /// Visible label.
    pub label: Option<String>,
    /// Placeholder text.
    pub placeholder: Option<String>,
    /// Help text shown under the input.
    #[serde(alias = "help_text")]
    pub help_text: Option<String>,
    /// CSS class for the input.
    pub class_name: Option<String>,
    /// CSS class for the wrapping container.
    pub container_class_name: Option<String>,
    /// CSS class for the label.
    pub label_class_name: Option<String>,
}

/// Definition of one form field.
#[derive(Clone)]
pub struct FieldSchema {
    /// Field name, unique within a form.
    pub name: String,
    /// Input type.
    pub field_type: FieldType,
    /// Value stored at construction and restored on reset.
    pub initial_value: FieldValue,
    /// Declarative rules.
    pub rules: Option<ValidationRules>,
    /// Custom validator.
    pub validator: Option<Arc<dyn CustomValidator>>,
    /// How `rules` and `validator` combine.
    pub policy: ValidationPolicy,
    /// Formatter applied to changed values before storage.
    pub formatter: Option<Formatter>,
    /// Visibility predicate; `None` means always visible.
    pub visible_when: Option<VisibilityPredicate>,
    /// Choices for select and radio fields.
    pub options: Vec<String>,
    /// Presentation hints.
    pub hints: PresentationHints,
}

impl fmt::Debug for FieldSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSchema")
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .field("initial_value", &self.initial_value)
            .field("rules", &self.rules)
            .field("has_validator", &self.validator.is_some())
            .field("policy", &self.policy)
            .field("options", &self.options)
            .field("hints", &self.hints)
            .finish_non_exhaustive()
    }
}

impl FieldSchema {
    /// Creates a field of the default type with no rules.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::Default,
            initial_value: FieldValue::Null,
            rules: None,
            validator: None,
            policy: ValidationPolicy::default(),
            formatter: None,
            visible_when: None,
            options: Vec::new(),
            hints: PresentationHints::default(),
        }
    }

    /// Sets the input type.
    #[must_use]
    pub fn field_type(mut self, field_type: FieldType) -> Self {
        self.field_type = field_type;
        self
    }

    /// Sets the initial value.
    #[must_use]
    pub fn initial(mut self, value: impl Into<FieldValue>) -> Self {
        self.initial_value = value.into();
        self
    }

    /// Sets the declarative rules.
    #[must_use]
    pub fn rules(mut self, rules: ValidationRules) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Sets the custom validator.
    #[must_use]
    pub fn validator(mut self, validator: impl CustomValidator + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Sets how rules and the custom validator combine.
    #[must_use]
    pub fn policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the formatter.
    #[must_use]
    pub fn formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Sets the formatter from a closure.
    #[must_use]
    pub fn format_with<F>(self, f: F) -> Self
    where
        F: Fn(&FieldValue) -> FieldValue + Send + Sync + 'static,
    {
        self.formatter(Arc::new(f))
    }

    /// Sets the visibility predicate.
    #[must_use]
    pub fn visible_when(mut self, predicate: VisibilityPredicate) -> Self {
        self.visible_when = Some(predicate);
        self
    }

    /// Sets the visibility predicate from a closure.
    #[must_use]
    pub fn show_when<F>(self, f: F) -> Self
    where
        F: Fn(&FormValues) -> bool + Send + Sync + 'static,
    {
        self.visible_when(Arc::new(f))
    }

    /// Sets the choices for select and radio fields.
    #[must_use]
    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.hints.label = Some(label.into());
        self
    }

    /// Sets the placeholder.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.hints.placeholder = Some(placeholder.into());
        self
    }

    /// Sets help text.
    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.hints.help_text = Some(text.into());
        self
    }

    /// Sets the input CSS class.
    #[must_use]
    pub fn class_name(mut self, class: impl Into<String>) -> Self {
        self.hints.class_name = Some(class.into());
        self
    }

    /// Sets the container CSS class.
    #[must_use]
    pub fn container_class_name(mut self, class: impl Into<String>) -> Self {
        self.hints.container_class_name = Some(class.into());
        self
    }

    /// Sets the label CSS class.
    #[must_use]
    pub fn label_class_name(mut self, class: impl Into<String>) -> Self {
        self.hints.label_class_name = Some(class.into());
        self
    }

    /// Returns whether the field has a `required` rule.
    pub fn is_required(&self) -> bool {
        self.rules.as_ref().is_some_and(|r| r.required)
    }

    /// Returns the label, falling back to the field name.
    pub fn label_text(&self) -> &str {
        self.hints.label.as_deref().unwrap_or(&self.name)
    }

    /// Returns the placeholder, falling back to the upper-cased field name.
    pub fn placeholder_text(&self) -> String {
        self.hints
            .placeholder
            .clone()
            .unwrap_or_else(|| self.name.to_uppercase())
    }
}

/// An immutable, validated collection of fields in declaration order.
#[derive(Debug, Clone)]
pub struct FormSchema {
    fields: Vec<FieldSchema>,
}

impl FormSchema {
    /// Validates and wraps a list of fields.
    ///
    /// Fails on empty or duplicate names and on select/radio fields without
    /// options.
    pub fn new(fields: Vec<FieldSchema>) -> Result<Self> {
        let mut seen = HashSet::new();
        for field in &fields {
            if field.name.is_empty() {
                return Err(FormError::EmptyFieldName);
            }
            if !seen.insert(field.name.as_str()) {
                return Err(FormError::DuplicateField(field.name.clone()));
            }
            if field.field_type.requires_options() && field.options.is_empty() {
                return Err(FormError::MissingOptions(field.name.clone()));
            }
        }
        Ok(Self { fields })
    }

    /// Starts building a schema.
    pub fn builder() -> FormSchemaBuilder {
        FormSchemaBuilder::default()
    }

    /// Loads a schema from a JSON array of field definitions.
    ///
    /// ```json
    /// [
    ///   {"name": "email", "type": "email", "value": "",
    ///    "validation": {"required": true, "regex": "^.+@.+$", "regexError": "Bad email"}},
    ///   {"name": "state", "type": "select", "options": ["Texas", "Ohio"]}
    /// ]
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let specs: Vec<FieldSpec> = serde_json::from_str(json)?;
        let fields = specs
            .into_iter()
            .map(FieldSpec::into_field)
            .collect::<Result<Vec<_>>>()?;
        Self::new(fields)
    }

    /// Returns the field with the given name.
    pub fn get(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the field with the given name or an `UnknownField` error.
    pub fn field(&self, name: &str) -> Result<&FieldSchema> {
        self.get(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    /// Iterates fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldSchema> {
        self.fields.iter()
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns whether the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the initial value of every field.
    pub fn initial_values(&self) -> FormValues {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.initial_value.clone()))
            .collect()
    }

    /// Attaches a formatter to a field.
    pub fn with_formatter(self, name: &str, formatter: Formatter) -> Result<Self> {
        self.update(name, |field| field.formatter = Some(formatter))
    }

    /// Attaches a custom validator to a field.
    pub fn with_validator(
        self,
        name: &str,
        validator: impl CustomValidator + 'static,
    ) -> Result<Self> {
        self.update(name, |field| field.validator = Some(Arc::new(validator)))
    }

    /// Attaches a visibility predicate to a field.
    pub fn with_visibility(self, name: &str, predicate: VisibilityPredicate) -> Result<Self> {
        self.update(name, |field| field.visible_when = Some(predicate))
    }

    fn update(mut self, name: &str, f: impl FnOnce(&mut FieldSchema)) -> Result<Self> {
        let field = self
            .fields
            .iter_mut()
            .find(|field| field.name == name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        f(field);
        Ok(self)
    }
}

/// Builder for [`FormSchema`].
#[derive(Debug, Default)]
pub struct FormSchemaBuilder {
    fields: Vec<FieldSchema>,
}

impl FormSchemaBuilder {
    /// Adds a field.
    #[must_use]
    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// Validates the collected fields.
    pub fn build(self) -> Result<FormSchema> {
        FormSchema::new(self.fields)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldSpec {
    name: String,
    #[serde(rename = "type", default)]
    field_type: Option<String>,
    #[serde(default)]
    value: FieldValue,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    validation: Option<RulesSpec>,
    #[serde(flatten)]
    hints: PresentationHints,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RulesSpec {
    required: bool,
    min_length: Option<usize>,
    max_length: Option<usize>,
    min: Option<f64>,
    max: Option<f64>,
    email: bool,
    regex: Option<String>,
    #[serde(alias = "rgxError")]
    regex_error: Option<String>,
    pattern: Option<String>,
    pattern_error: Option<String>,
}

impl FieldSpec {
    fn into_field(self) -> Result<FieldSchema> {
        let rules = self
            .validation
            .map(|spec| spec.into_rules(&self.name))
            .transpose()?;
        Ok(FieldSchema {
            field_type: self
                .field_type
                .as_deref()
                .map_or(FieldType::Default, FieldType::from_tag),
            initial_value: self.value,
            rules,
            options: self.options,
            hints: self.hints,
            ..FieldSchema::new(self.name)
        })
    }
}

impl RulesSpec {
    fn into_rules(self, field: &str) -> Result<ValidationRules> {
        let compile = |source: Option<String>| -> Result<Option<Regex>> {
            source
                .map(|s| {
                    Regex::new(&s).map_err(|source| FormError::InvalidPattern {
                        field: field.to_string(),
                        source,
                    })
                })
                .transpose()
        };
        Ok(ValidationRules {
            required: self.required,
            min_length: self.min_length,
            max_length: self.max_length,
            min: self.min,
            max: self.max,
            email: self.email,
            regex: compile(self.regex)?,
            regex_message: self.regex_error,
            pattern: compile(self.pattern)?,
            pattern_message: self.pattern_error,
        })
    }
}
