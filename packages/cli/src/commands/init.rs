use super::Context;
use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagewright_common::{IdGenerator, PageDocument};
use pagewright_content::{ContentStore, FsContentStore};
use std::fs;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Content directory
    #[arg(short, long, default_value = "content")]
    pub content_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub async fn init(args: InitArgs, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        "📝 Initializing Pagewright project...".bright_blue().bold()
    );

    let config = Config {
        content_dir: args.content_dir.clone(),
        ..Config::default()
    };

    let store = FsContentStore::new(config.content_root(&ctx.cwd));
    store.init().await?;
    println!("  {} Created {}/pages and {}/components", "✓".green(), args.content_dir, args.content_dir);

    // Seed a home page
    if !store.page_exists("home").await? {
        let page = PageDocument::new_page("home", "Home", &mut IdGenerator::new())?;
        store.save_page(&page).await?;
        println!("  {} Created page home", "✓".green());
    }

    // Write config file
    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: pagewright page show home");
    println!("  2. Run: pagewright edit home add Heading --parent <id>");
    println!("  3. Run: pagewright validate home");

    Ok(())
}
