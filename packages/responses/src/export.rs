//! CSV export of collected responses

use crate::{ExportError, ExportResult};
use formsmith_model::{Form, Response};

/// Title recorded when a response arrives for a form that cannot be found
pub const UNKNOWN_FORM_TITLE: &str = "Unknown Form";

const DATE_COLUMN: &str = "Submission Date";
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A rendered CSV file ready to be written or downloaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub file_name: String,
    pub contents: String,
}

/// Render responses as CSV.
///
/// Columns are the submission date followed by the form's fields as they are
/// now, not as they were when each response was submitted. Answers are looked
/// up by field id; missing answers are empty cells. Every cell is quoted.
///
/// Returns `None` when there is nothing to export.
pub fn export_csv<'a>(
    form: Option<&Form>,
    responses: impl IntoIterator<Item = &'a Response>,
) -> ExportResult<Option<CsvExport>> {
    let responses: Vec<&Response> = responses.into_iter().collect();
    if responses.is_empty() {
        return Ok(None);
    }

    let fields = form.map(|f| f.fields.as_slice()).unwrap_or_default();

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let mut header = Vec::with_capacity(fields.len() + 1);
    header.push(DATE_COLUMN.to_string());
    header.extend(fields.iter().map(|f| f.label.clone()));
    writer.write_record(&header)?;

    for response in &responses {
        let mut row = Vec::with_capacity(fields.len() + 1);
        row.push(response.submitted_at.format(DATE_FORMAT).to_string());
        row.extend(fields.iter().map(|field| {
            response
                .answer(&field.id)
                .map(ToString::to_string)
                .unwrap_or_default()
        }));
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;

    let file_name = match form {
        Some(form) => format!("{}_responses.csv", formsmith_model::file_stem(&form.title)),
        None => "form_responses.csv".to_string(),
    };

    Ok(Some(CsvExport {
        file_name,
        contents: String::from_utf8(bytes)?,
    }))
}
