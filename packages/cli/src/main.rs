mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    AddFieldArgs, AddStepArgs, ExportArgs, ExportResponsesArgs, ImportArgs, MoveFieldArgs,
    NewArgs, SaveTemplateArgs, ShowArgs, SubmitArgs, Workspace,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Formsmith CLI - Design forms, collect responses
#[derive(Parser, Debug)]
#[command(name = "formsmith")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// State file (defaults to the stateFile setting, then formsmith-state.json)
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start a new empty form
    New(NewArgs),

    /// Print the current form
    Show(ShowArgs),

    /// Append a field to the current form
    AddField(AddFieldArgs),

    /// Remove a field by id
    DeleteField {
        /// Field id
        field_id: String,
    },

    /// Move a field to another position
    MoveField(MoveFieldArgs),

    /// Append a step (enables multi-step mode)
    AddStep(AddStepArgs),

    /// List templates
    Templates,

    /// Start a new form from a template
    UseTemplate {
        /// Template id
        template_id: String,
    },

    /// Save the current form as a template
    SaveTemplate(SaveTemplateArgs),

    /// Save the current form
    Save,

    /// Save the current form and print its shareable link
    Share,

    /// Write the current form to a JSON document
    ExportForm(ExportArgs),

    /// Replace the current form with a JSON document
    ImportForm(ImportArgs),

    /// Fill in and submit a saved form
    Submit(SubmitArgs),

    /// List responses for a form
    Responses {
        /// Form id
        form_id: String,
    },

    /// Write a form's responses to CSV
    ExportResponses(ExportResponsesArgs),

    /// Undo the last edit made in this session
    Undo,

    /// Redo the last undone edit in this session
    Redo,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let mut ws = Workspace::open(&cwd, cli.state.as_deref())?;

    match cli.command {
        Command::New(args) => commands::new_form(args, &mut ws)?,
        Command::Show(args) => commands::show(args, &mut ws)?,
        Command::AddField(args) => commands::add_field(args, &mut ws)?,
        Command::DeleteField { field_id } => commands::delete_field(field_id, &mut ws)?,
        Command::MoveField(args) => commands::move_field(args, &mut ws)?,
        Command::AddStep(args) => commands::add_step(args, &mut ws)?,
        Command::Templates => commands::list_templates(&mut ws)?,
        Command::UseTemplate { template_id } => commands::use_template(template_id, &mut ws)?,
        Command::SaveTemplate(args) => commands::save_template(args, &mut ws)?,
        Command::Save => commands::save(&mut ws)?,
        Command::Share => commands::share(&mut ws)?,
        Command::ExportForm(args) => commands::export_form(args, &mut ws)?,
        Command::ImportForm(args) => commands::import_form(args, &mut ws)?,
        Command::Submit(args) => commands::submit(args, &mut ws)?,
        Command::Responses { form_id } => commands::list_responses(form_id, &mut ws)?,
        Command::ExportResponses(args) => commands::export_responses(args, &mut ws)?,
        Command::Undo => commands::undo(&mut ws)?,
        Command::Redo => commands::redo(&mut ws)?,
    }

    ws.finish();
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
