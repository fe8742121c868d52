//! # oxide-form-engine
//!
//! Schema-driven form engine.
//!
//! This crate provides:
//! - Field schemas with declarative rules, custom (async) validators,
//!   formatters and visibility predicates
//! - A form state store mutated through a closed set of transitions
//! - A lifecycle controller handling change, blur, submit and reset
//! - A render description and HTML widgets, one per field type
//!
//! Validation is soft: invalid input is still stored and still submitted.
//! Callers who want a hard gate call [`Form::validate_all`] before submitting.
//!
//! ## Quick Start
//!
//! ```rust
//! use futures::executor::block_on;
//! use oxide_form_engine::format::uppercase;
//! use oxide_form_engine::{
//!     sync_submit_handler, FieldSchema, Form, FormOptions, FormSchema, ValidationRules,
//! };
//!
//! let schema = FormSchema::builder()
//!     .field(
//!         FieldSchema::new("age")
//!             .initial("")
//!             .rules(ValidationRules::new().min(18.0).max(99.0)),
//!     )
//!     .field(FieldSchema::new("country").initial("").formatter(uppercase()))
//!     .build()?;
//!
//! let form = Form::new(schema, sync_submit_handler(|_| Ok(())), FormOptions::default());
//!
//! block_on(form.change("age", "15"))?;
//! assert_eq!(
//!     form.error("age").as_deref(),
//!     Some("Value must be greater than or equal to 18.")
//! );
//!
//! block_on(form.change("country", "peru"))?;
//! assert_eq!(form.value("country"), Some("PERU".into()));
//! # Ok::<(), oxide_form_engine::FormError>(())
//! ```
//!
//! ## Field Helpers
//!
//! ```rust
//! use oxide_form_engine::fields::{checkbox_field, email_field, password_field, select_field};
//! use oxide_form_engine::FormSchema;
//!
//! let schema = FormSchema::new(vec![
//!     email_field("email", "Email", true),
//!     password_field("password", "Password", Some(8)),
//!     select_field("state", "State", &["New York", "California", "Texas"], false),
//!     checkbox_field("terms", "Accept the terms", true),
//! ])?;
//! assert_eq!(schema.len(), 4);
//! # Ok::<(), oxide_form_engine::FormError>(())
//! ```
//!
//! ## Rendering
//!
//! [`Form::view`] returns a [`FormView`], a plain description of the visible
//! fields, the error summary and the submit button. [`render_form`] turns it
//! into HTML using the widgets in [`widgets`].

mod error;
pub mod fields;
mod form;
pub mod format;
mod options;
mod render;
mod schema;
mod store;
pub mod validation;
mod value;
mod view;
pub mod visibility;
pub mod widgets;

pub use error::{FormError, Result};
pub use form::{
    create_form, submit_handler, sync_submit_handler, Form, SubmitError, SubmitHandler,
    SubmitOutcome,
};
pub use options::FormOptions;
pub use render::{render_field, render_form};
pub use schema::{FieldSchema, FieldType, FormSchema, FormSchemaBuilder, PresentationHints};
pub use store::{Action, FieldStatus, FormErrors, FormState, Touch};
pub use validation::{sync_validator, CustomValidator, ValidationPolicy, ValidationRules};
pub use value::{FieldValue, FileHandle, FormValues};
pub use view::{FieldDescriptor, FormView, SubmitButton};
