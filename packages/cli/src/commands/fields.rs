use super::Workspace;
use anyhow::{anyhow, bail, Result};
use clap::Args;
use colored::Colorize;
use formsmith_editor::{FieldType, FieldValidation, StepDraft};

#[derive(Debug, Args)]
pub struct AddFieldArgs {
    /// Field type (text, textarea, dropdown, checkbox, radio, date, email, phone, number)
    #[arg(value_parser = parse_field_type)]
    pub field_type: FieldType,

    /// Label shown to respondents
    #[arg(short, long)]
    pub label: Option<String>,

    /// Placeholder text
    #[arg(short, long)]
    pub placeholder: Option<String>,

    /// Mark the field as required
    #[arg(short, long)]
    pub required: bool,

    /// Comma-separated choices for dropdown and radio fields
    #[arg(short, long, value_delimiter = ',')]
    pub options: Vec<String>,

    /// Help text shown under the input
    #[arg(long = "help-text")]
    pub help_text: Option<String>,

    /// Minimum answer length
    #[arg(long)]
    pub min_length: Option<usize>,

    /// Maximum answer length
    #[arg(long)]
    pub max_length: Option<usize>,

    /// Regular expression the answer must match
    #[arg(long)]
    pub pattern: Option<String>,

    /// Step to place the field on (1-based, multi-step forms only)
    #[arg(short, long)]
    pub step: Option<usize>,
}

#[derive(Debug, Args)]
pub struct MoveFieldArgs {
    /// Current position (0-based)
    pub from: usize,

    /// New position (0-based)
    pub to: usize,
}

#[derive(Debug, Args)]
pub struct AddStepArgs {
    /// Step title
    pub title: String,

    /// Step description
    #[arg(short, long)]
    pub description: Option<String>,
}

fn parse_field_type(name: &str) -> Result<FieldType, String> {
    FieldType::parse(name).ok_or_else(|| {
        let known: Vec<&str> = FieldType::ALL.iter().map(|t| t.as_str()).collect();
        format!("unknown field type '{}' (expected one of: {})", name, known.join(", "))
    })
}

pub fn add_field(args: AddFieldArgs, ws: &mut Workspace) -> Result<()> {
    ws.current_form()?;

    let mut draft = args.field_type.default_field();
    if let Some(label) = args.label {
        draft.label = label;
    }
    if let Some(placeholder) = args.placeholder {
        draft = draft.with_placeholder(placeholder);
    }
    if !args.options.is_empty() {
        draft = draft.with_options(args.options);
    }
    draft.help_text = args.help_text;
    draft = draft.required(args.required);

    let validation = FieldValidation {
        min_length: args.min_length,
        max_length: args.max_length,
        pattern: args.pattern,
    };
    if !validation.is_empty() {
        draft = draft.with_validation(validation);
    }

    if let Some(step) = args.step {
        let total = ws.current_form()?.total_steps();
        if step == 0 || step > total {
            bail!("Step {} does not exist (form has {} steps)", step, total);
        }
        ws.store.set_current_step(step - 1);
    }

    let id = ws
        .store
        .add_field(draft)
        .ok_or_else(|| anyhow!("Field was not added"))?;
    println!("{} Added {} field {}", "✓".green(), args.field_type, id.dimmed());
    Ok(())
}

pub fn delete_field(field_id: String, ws: &mut Workspace) -> Result<()> {
    ws.current_form()?;
    if !ws.store.delete_field(&field_id) {
        bail!("No field with id {}", field_id);
    }
    println!("{} Deleted field {}", "✓".green(), field_id.dimmed());
    Ok(())
}

pub fn move_field(args: MoveFieldArgs, ws: &mut Workspace) -> Result<()> {
    let len = ws.current_form()?.fields.len();
    if args.from >= len || args.to >= len {
        bail!("Positions must be between 0 and {}", len.saturating_sub(1));
    }

    ws.store.reorder_fields(args.from, args.to);
    println!("{} Moved field {} → {}", "✓".green(), args.from, args.to);
    Ok(())
}

pub fn add_step(args: AddStepArgs, ws: &mut Workspace) -> Result<()> {
    if !ws.current_form()?.is_multi_step {
        ws.store.set_multi_step(true);
        println!("{} Enabled multi-step mode", "✓".green());
    }

    let mut draft = StepDraft::new(args.title);
    if let Some(description) = args.description {
        draft = draft.with_description(description);
    }

    let id = ws
        .store
        .add_step(draft)
        .ok_or_else(|| anyhow!("Step was not added"))?;
    let steps = ws.current_form()?.steps.len();
    println!("{} Added step {} {}", "✓".green(), steps, id.dimmed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_type() {
        assert_eq!(parse_field_type("email"), Ok(FieldType::Email));
        let err = parse_field_type("slider").unwrap_err();
        assert!(err.contains("textarea"));
    }
}
