//! Conditional field visibility.

use std::sync::Arc;

use crate::schema::{FieldSchema, FormSchema};
use crate::value::{FieldValue, FormValues};

/// Decides from the current form values whether a field is shown.
pub type VisibilityPredicate = Arc<dyn Fn(&FormValues) -> bool + Send + Sync>;

/// Returns whether `field` is visible given the current values.
///
/// Fields without a predicate are always visible. Hidden fields keep their
/// value and error; they are only left out of rendering.
pub fn is_visible(field: &FieldSchema, values: &FormValues) -> bool {
    field.visible_when.as_ref().map_or(true, |predicate| predicate(values))
}

/// Iterates the visible fields of a schema in declaration order.
pub fn visible_fields<'a>(
    schema: &'a FormSchema,
    values: &'a FormValues,
) -> impl Iterator<Item = &'a FieldSchema> + 'a {
    schema.iter().filter(move |field| is_visible(field, values))
}

/// Predicate that shows a field while `other` holds `expected`.
pub fn field_equals(
    other: impl Into<String>,
    expected: impl Into<FieldValue>,
) -> VisibilityPredicate {
    let other = other.into();
    let expected = expected.into();
    Arc::new(move |values: &FormValues| values.get(&other) == Some(&expected))
}

/// Predicate that shows a field while `other` is not blank.
pub fn field_filled(other: impl Into<String>) -> VisibilityPredicate {
    let other = other.into();
    Arc::new(move |values: &FormValues| values.get(&other).is_some_and(|v| !v.is_blank()))
}
