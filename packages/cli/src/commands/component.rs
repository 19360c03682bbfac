use super::Context;
use anyhow::{Context as _, Result};
use clap::Subcommand;
use colored::Colorize;
use pagewright_content::{load_registry, ContentStore};
use pagewright_schema::ComponentSchema;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Subcommand)]
pub enum ComponentCommand {
    /// List built-in and custom components
    List,

    /// Register a custom component from a schema JSON file
    Register { file: PathBuf },
}

pub async fn component(command: ComponentCommand, ctx: &Context) -> Result<()> {
    let store = ctx.store();

    match command {
        ComponentCommand::List => {
            let registry = load_registry(&store).await?;
            for name in registry.get_all_components() {
                let Some(schema) = registry.get_component(&name) else {
                    continue;
                };
                let origin = if registry.is_custom(&name) {
                    format!("{:<9}", "custom").cyan()
                } else {
                    format!("{:<9}", "built-in").dimmed()
                };
                println!("{} {} {}", format!("{:<12}", name).bold(), origin, schema.description);
            }
        }

        ComponentCommand::Register { file } => {
            let json = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let schema = ComponentSchema::from_json(&json)?;
            store.save_schema(&schema).await?;
            println!("{} Registered {}", "✓".green(), schema.name.bold());
        }
    }

    Ok(())
}
