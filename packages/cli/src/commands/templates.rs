use super::Workspace;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;

#[derive(Debug, Args)]
pub struct SaveTemplateArgs {
    /// Template name
    pub name: String,

    /// Template description
    #[arg(short, long, default_value = "")]
    pub description: String,
}

pub fn list_templates(ws: &mut Workspace) -> Result<()> {
    for template in ws.store.templates() {
        let fields = template.form_data.fields.len();
        println!(
            "{} {} ({} fields)",
            template.id.bright_white(),
            template.name,
            fields
        );
        if !template.description.is_empty() {
            println!("    {}", template.description.dimmed());
        }
    }
    Ok(())
}

pub fn use_template(template_id: String, ws: &mut Workspace) -> Result<()> {
    let id = ws
        .store
        .load_template(&template_id)
        .ok_or_else(|| anyhow!("No template with id {}", template_id))?;

    let form = ws.current_form()?;
    println!(
        "{} Created {} from {} ({})",
        "✓".green(),
        form.title.bright_white(),
        template_id,
        id.dimmed()
    );
    Ok(())
}

pub fn save_template(args: SaveTemplateArgs, ws: &mut Workspace) -> Result<()> {
    ws.current_form()?;
    let id = ws
        .store
        .save_as_template(&args.name, &args.description)
        .ok_or_else(|| anyhow!("Template was not saved"))?;

    println!("{} Saved template {} ({})", "✓".green(), args.name, id.dimmed());
    Ok(())
}
