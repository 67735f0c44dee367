use super::Workspace;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use formsmith_editor::Form;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Title for the new form
    #[arg(short, long)]
    pub title: Option<String>,

    /// Description for the new form
    #[arg(short, long)]
    pub description: Option<String>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Print the form as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output directory (defaults to the current directory)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Form document to import
    pub path: PathBuf,
}

pub fn new_form(args: NewArgs, ws: &mut Workspace) -> Result<()> {
    let id = ws.store.create_new_form();
    if args.title.is_some() || args.description.is_some() {
        ws.store
            .update_form_details(args.title, args.description.map(Some));
    }

    let form = ws.current_form()?;
    println!("{} {} ({})", "✓".green(), form.title.bright_white(), id.dimmed());
    Ok(())
}

pub fn show(args: ShowArgs, ws: &mut Workspace) -> Result<()> {
    let form = ws.current_form()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(form)?);
        return Ok(());
    }

    print_form(form);
    if let Some(selected) = ws.store.selected_field() {
        println!("Selected: {}", selected);
    }
    Ok(())
}

fn print_form(form: &Form) {
    println!("{}", form.title.bright_white().bold());
    if let Some(description) = &form.description {
        println!("{}", description);
    }
    println!("{} {}", "id:".dimmed(), form.id);
    println!();

    if form.is_multi_step {
        for (index, step) in form.steps.iter().enumerate() {
            println!("{} {} ({})", format!("Step {}:", index + 1).bright_blue(), step.title, step.id.dimmed());
        }
        println!();
    }

    if form.fields.is_empty() {
        println!("  (no fields)");
        return;
    }

    for (index, field) in form.fields.iter().enumerate() {
        let required = if field.required { "*".red().to_string() } else { String::new() };
        let step = match (form.is_multi_step, field.step) {
            (true, Some(step)) => format!(" step {}", step + 1),
            _ => String::new(),
        };
        println!(
            "  {:>2}. {}{} [{}]{} {}",
            index,
            field.label,
            required,
            field.field_type,
            step,
            field.id.dimmed()
        );
    }
}

pub fn save(ws: &mut Workspace) -> Result<()> {
    ws.current_form()?;
    ws.store.save_form();
    println!(
        "{} Saved ({} forms)",
        "✓".green(),
        ws.store.saved_forms().len()
    );
    Ok(())
}

pub fn share(ws: &mut Workspace) -> Result<()> {
    ws.current_form()?;
    let link = ws.store.generate_shareable_link();
    println!("{}", link);
    Ok(())
}

pub fn export_form(args: ExportArgs, ws: &mut Workspace) -> Result<()> {
    ws.current_form()?;
    let Some(file) = ws.store.export_form_document()? else {
        return Ok(());
    };

    let dir = args.out.unwrap_or_else(|| ws.cwd.clone());
    let path = dir.join(&file.file_name);
    fs::write(&path, file.contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("{} Exported {}", "✓".green(), path.display());
    Ok(())
}

pub fn import_form(args: ImportArgs, ws: &mut Workspace) -> Result<()> {
    let path = args.path;
    let contents = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let id = ws.store.import_form_document(&contents)?;
    println!("{} Imported {} ({})", "✓".green(), path.display(), id.dimmed());
    Ok(())
}

pub fn undo(ws: &mut Workspace) -> Result<()> {
    if ws.store.undo() {
        println!("{} Undone", "✓".green());
    } else {
        println!("{} Nothing to undo", "⚠️".yellow());
    }
    Ok(())
}

pub fn redo(ws: &mut Workspace) -> Result<()> {
    if ws.store.redo() {
        println!("{} Redone", "✓".green());
    } else {
        println!("{} Nothing to redo", "⚠️".yellow());
    }
    Ok(())
}
