use super::Context;
use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use pagewright_common::{IdGenerator, PageDocument};
use pagewright_content::{load_registry, ContentStore};
use pagewright_renderer::Renderer;

#[derive(Debug, Subcommand)]
pub enum PageCommand {
    /// Create a page seeded with an empty container
    New {
        /// Page name (lowercase letters, digits, '-' or '_')
        name: String,

        /// Page title (defaults to the name)
        #[arg(short, long)]
        title: Option<String>,
    },

    /// List pages
    List,

    /// Delete a page
    Delete { name: String },

    /// Print a page's component outline
    Show {
        name: String,

        /// Print the stored JSON instead of the outline
        #[arg(long)]
        json: bool,
    },
}

pub async fn page(command: PageCommand, ctx: &Context) -> Result<()> {
    let store = ctx.store();

    match command {
        PageCommand::New { name, title } => {
            let title = title.unwrap_or_else(|| name.clone());
            let page = PageDocument::new_page(&name, &title, &mut IdGenerator::new())?;
            store.create_page(&page).await?;

            println!("{} Created {}", "✓".green(), page.path().bright_white());
            if let Some(root) = page.components.roots().first() {
                println!("   Root container: {}", root.id.dimmed());
            }
        }

        PageCommand::List => {
            let pages = store.list_pages().await?;
            if pages.is_empty() {
                println!("No pages yet. Run: pagewright page new <name>");
            }
            for name in pages {
                println!("{}", name);
            }
        }

        PageCommand::Delete { name } => {
            store.delete_page(&name).await?;
            println!("{} Deleted {}", "✓".green(), name);
        }

        PageCommand::Show { name, json } => {
            let page = store.load_page(&name).await?;
            if json {
                println!("{}", page.to_json()?);
                return Ok(());
            }

            let registry = load_registry(&store).await?;
            let rendered = Renderer::new(&registry).render(&page.components);

            println!("{} {}", page.title.bold(), format!("({})", page.path()).dimmed());
            print!("{}", rendered.outline());

            let errors = rendered.errors().len();
            if errors > 0 {
                println!("{} {} unknown component(s)", "⚠️".yellow(), errors);
            }
        }
    }

    Ok(())
}
