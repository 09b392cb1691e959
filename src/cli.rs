use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::event::IssueEvent;
use crate::load_config::load_config;
use crate::notion::NotionClient;
use crate::synchronise::synchronise;

/// CLI for notion-sync: mirror GitHub issue events into a Notion database.
#[derive(Parser)]
#[clap(
    name = "notion-sync",
    version,
    about = "Synchronise a GitHub issue event into a Notion database"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Synchronise the issue event described by the environment
    Sync {
        /// Path to an optional YAML schema-mapping file
        #[clap(long)]
        config: Option<PathBuf>,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    let result = match cli.command {
        Commands::Sync { config } => {
            let config = load_config(config.as_deref())?;
            config.trace_loaded();
            let event = IssueEvent::from_env()
                .context("failed to read the issue event from the environment")?;
            let store = NotionClient::new(&config)?;
            println!("Synchronise starting...");
            match synchronise(&config, &event, &store).await {
                Ok(outcome) => {
                    println!("Synchronise complete. Outcome: {:?}", outcome);
                    Ok(())
                }
                Err(e) => {
                    eprintln!("[ERROR] Synchronisation failed: {}", e);
                    Err(e.into())
                }
            }
        }
    };

    // For CLI/test parity: Explicit process exit only in main(), not in run()
    result
}
