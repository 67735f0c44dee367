//! # Formsmith Validator
//!
//! Checks filled-in answers against field definitions and gates step
//! transitions while a form is being filled.
//!
//! Validation never touches the schema. It reads field definitions and
//! caller-supplied answers, and reports at most one error per field. Checks
//! run in a fixed order and stop at the first failure:
//!
//! 1. required and empty
//! 2. `minLength` / `maxLength` (text, textarea)
//! 3. `pattern` (text)
//! 4. email / phone shape
//!
//! ```rust,ignore
//! use formsmith_validator::{validate_step, FillSession};
//!
//! let report = validate_step(&form, 0, &answers);
//! if !report.is_valid() {
//!     for (field_id, error) in report.errors() {
//!         println!("{field_id}: {error}");
//!     }
//! }
//!
//! let mut session = FillSession::new(form);
//! session.set_answer("name", "Alice");
//! let answers = session.submit()?;
//! ```

mod errors;
mod field;
mod fill;
mod step;

pub use errors::ValidationError;
pub use field::validate_field;
pub use fill::FillSession;
pub use step::{validate_form, validate_step, StepValidation};
