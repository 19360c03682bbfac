use super::Context;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagewright_content::{page_name_from_path, ChangeKind, RemotePoller};
use std::sync::Arc;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Seconds between polls (overrides pollIntervalSecs)
    #[arg(short, long)]
    pub interval: Option<u64>,
}

pub async fn watch(args: WatchArgs, ctx: &Context) -> Result<()> {
    let period = args
        .interval
        .map(|secs| Duration::from_secs(secs.max(1)))
        .unwrap_or_else(|| ctx.config.poll_interval());

    let store = ctx.store();
    store.init().await?;

    println!(
        "👀 {} {} every {}s (Ctrl+C to stop)",
        "Watching".green().bold(),
        ctx.content_root().display(),
        period.as_secs()
    );

    let mut handle = RemotePoller::new(Arc::new(store), period).spawn();

    loop {
        tokio::select! {
            event = handle.events.recv() => {
                let Some(event) = event else { break };
                let marker = match event.kind {
                    ChangeKind::Created => "+".green(),
                    ChangeKind::Modified => "~".yellow(),
                    ChangeKind::Removed => "-".red(),
                };
                match page_name_from_path(&event.path) {
                    Some(name) => println!("  {} page {} {}", marker, name.bold(), event.kind),
                    None => println!("  {} {} {}", marker, event.path, event.kind),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        }
    }

    handle.shutdown().await;
    println!("{}", "Stopped watching".dimmed());
    Ok(())
}
