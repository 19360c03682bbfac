mod commands;
mod config;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    component, edit, init, page, validate, watch, ComponentCommand, Context, EditArgs, InitArgs,
    PageCommand, ValidateArgs, WatchArgs,
};
use config::Config;

/// Pagewright CLI - schema-driven page builder
#[derive(Parser, Debug)]
#[command(name = "pagewright")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Pagewright project
    Init(InitArgs),

    /// Create, list, delete and inspect pages
    Page {
        #[command(subcommand)]
        command: PageCommand,
    },

    /// List and register component schemas
    Component {
        #[command(subcommand)]
        command: ComponentCommand,
    },

    /// Apply one edit to a page and save it
    Edit(EditArgs),

    /// Check a page against the component schemas
    Validate(ValidateArgs),

    /// Watch the content directory for changes made elsewhere
    Watch(WatchArgs),
}

fn init_tracing(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("Cannot get current directory")?;
    let config = Config::load(&cwd)
        .with_context(|| format!("Failed to read {}", config::DEFAULT_CONFIG_NAME))?;
    init_tracing(&config.log_level);

    let ctx = Context::new(cwd, config);

    match cli.command {
        Command::Init(args) => init(args, &ctx).await,
        Command::Page { command } => page(command, &ctx).await,
        Command::Component { command } => component(command, &ctx).await,
        Command::Edit(args) => edit(args, &ctx).await,
        Command::Validate(args) => validate(args, &ctx).await,
        Command::Watch(args) => watch(args, &ctx).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
