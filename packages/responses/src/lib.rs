//! # Formsmith Responses
//!
//! Append-only store of form submissions plus CSV export.
//!
//! Responses reference their form by id only. The form title is copied in at
//! submission time, so renaming or deleting a form never rewrites history.

mod collector;
mod errors;
mod export;

pub use collector::{ClientMetadata, ResponseCollector};
pub use errors::{ExportError, ExportResult};
pub use export::{export_csv, CsvExport, UNKNOWN_FORM_TITLE};
