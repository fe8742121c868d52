//! Pre-configured field constructors.

mod checkbox;
mod file;
mod select;
mod text;

pub use checkbox::checkbox_field;
pub use file::file_field;
pub use select::{radio_field, select_field};
pub use text::{date_field, email_field, number_field, password_field, text_field, textarea_field};
