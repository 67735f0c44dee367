use super::Workspace;
use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use colored::Colorize;
use formsmith_editor::{AnswerValue, FieldType, Form};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct SubmitArgs {
    /// Saved form to answer
    pub form_id: String,

    /// Answers as FIELD=VALUE, where FIELD is a field id or label
    #[arg(short, long = "answer", value_parser = parse_answer)]
    pub answers: Vec<(String, String)>,
}

fn parse_answer(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{}'", raw))
}

/// Resolve a FIELD key to a field id, matching ids first and then labels
fn resolve_field<'a>(form: &'a Form, key: &str) -> Option<&'a formsmith_editor::Field> {
    form.field(key).or_else(|| {
        form.fields
            .iter()
            .find(|f| f.label.eq_ignore_ascii_case(key))
    })
}

pub fn submit(args: SubmitArgs, ws: &mut Workspace) -> Result<()> {
    let mut fill = ws
        .store
        .open_for_fill(&args.form_id)
        .ok_or_else(|| anyhow!("No saved form with id {}", args.form_id))?;

    for (key, raw) in &args.answers {
        let field = resolve_field(fill.form(), key)
            .ok_or_else(|| anyhow!("Form has no field '{}'", key))?;
        let id = field.id.clone();

        let value = match field.field_type {
            FieldType::Checkbox => AnswerValue::Bool(
                raw.parse()
                    .with_context(|| format!("'{}' expects true or false", field.label))?,
            ),
            _ => AnswerValue::Text(raw.clone()),
        };
        fill.set_answer(&id, value);
    }

    match ws.store.submit_fill(&mut fill) {
        Ok(response_id) => {
            println!("{} Recorded response {}", "✓".green(), response_id.dimmed());
            Ok(())
        }
        Err(report) => {
            for (field_id, error) in report.errors() {
                let label = fill
                    .form()
                    .field(field_id)
                    .map_or(field_id.as_str(), |f| f.label.as_str());
                eprintln!("  {} {}: {}", "✗".red(), label, error);
            }
            bail!("Response has {} invalid answers", report.errors().len())
        }
    }
}

pub fn list_responses(form_id: String, ws: &mut Workspace) -> Result<()> {
    let responses = ws.store.get_form_responses(&form_id);
    if responses.is_empty() {
        println!("No responses for {}", form_id);
        return Ok(());
    }

    let fields = ws
        .store
        .saved_form(&form_id)
        .map(|f| f.fields.as_slice())
        .unwrap_or_default();

    for response in responses {
        println!(
            "{} {} {}",
            response.submitted_at.format("%Y-%m-%d %H:%M:%S").to_string().bright_blue(),
            response.form_title,
            response.id.dimmed()
        );
        for field in fields {
            if let Some(answer) = response.answer(&field.id) {
                println!("    {}: {}", field.label, answer);
            }
        }
    }
    Ok(())
}

#[derive(Debug, Args)]
pub struct ExportResponsesArgs {
    /// Form whose responses to export
    pub form_id: String,

    /// Output directory (defaults to the current directory)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn export_responses(args: ExportResponsesArgs, ws: &mut Workspace) -> Result<()> {
    let Some(export) = ws.store.export_responses(&args.form_id)? else {
        println!("{} No responses to export", "⚠️".yellow());
        return Ok(());
    };

    let dir = args.out.unwrap_or_else(|| ws.cwd.clone());
    let path = dir.join(&export.file_name);
    fs::write(&path, export.contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("{} Exported {}", "✓".green(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer() {
        assert_eq!(
            parse_answer("email=a=b@example.com"),
            Ok(("email".to_string(), "a=b@example.com".to_string()))
        );
        assert!(parse_answer("no-separator").is_err());
        assert!(parse_answer("=value").is_err());
    }
}
