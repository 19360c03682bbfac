use super::Context;
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use pagewright_content::{load_registry, ContentStore};
use pagewright_schema::{validate_tree, ValidationLevel};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Page to check
    pub page: String,

    /// Only report errors
    #[arg(short, long)]
    pub quiet: bool,
}

pub async fn validate(args: ValidateArgs, ctx: &Context) -> Result<()> {
    let store = ctx.store();
    let registry = load_registry(&store).await?;
    let page = store.load_page(&args.page).await?;

    println!("🔍 {} {}", "Validating".green().bold(), page.path());
    println!();

    let warnings = validate_tree(&registry, &page.components);
    let mut total_errors = 0;
    let mut total_warnings = 0;

    for warning in &warnings {
        let location = warning
            .node_id
            .as_deref()
            .map(|id| format!(" #{}", id))
            .unwrap_or_default();

        match warning.level {
            ValidationLevel::Error => {
                total_errors += 1;
                println!("  {} {}{}", "error:".red().bold(), warning.message, location.dimmed());
            }
            ValidationLevel::Warning => {
                total_warnings += 1;
                if !args.quiet {
                    println!("  {} {}{}", "warning:".yellow(), warning.message, location.dimmed());
                }
            }
        }
    }

    if total_errors == 0 && total_warnings == 0 {
        println!("   {} No issues found!", "✓".green());
        return Ok(());
    }

    println!();
    if total_warnings > 0 {
        println!("   {} {}", "Warnings:".yellow(), total_warnings);
    }
    if total_errors > 0 {
        println!("   {} {}", "Errors:".red(), total_errors);
        bail!("{} has {} error(s)", page.path(), total_errors);
    }

    Ok(())
}
