//! # deckplan CLI interface
//!
//! Argument parsing and orchestration only. Every non-trivial behaviour lives
//! in [`deckplan_core`]; this module loads configuration, wires the real
//! backends (resvg, the OpenAI-compatible image client) into the core caches,
//! and prints results.
//!
//! - [`Cli`] / [`Commands`]: user-facing subcommands.
//! - [`run`]: async entrypoint shared by `main` and integration tests.
//!
//! Slide plans are printed to stdout as JSON. Logs go through `tracing`.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use deckplan_core::config::DeckConfig;
use deckplan_core::icons::IconCache;
use deckplan_core::images::{ImageCache, ImageStore, OpenAiImageClient};
use deckplan_core::pipeline::{plan_from_markdown, plan_from_proposal};
use deckplan_core::proposal::Proposal;
use std::fs;
use std::path::{Path, PathBuf};

use crate::load_config::load_config;

/// CLI for deckplan: turn documents into validated slide plans.
#[derive(Parser)]
#[clap(
    name = "deckplan",
    version,
    about = "Plan slide decks from markdown or structured proposals and manage their illustration assets"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse, map and validate a document, printing the slide plan as JSON
    Plan {
        /// Markdown document, or proposal JSON with --proposal
        #[clap(long)]
        input: PathBuf,
        /// Path to the YAML config file
        #[clap(long)]
        config: Option<PathBuf>,
        /// Treat the input as a structured proposal JSON document
        #[clap(long)]
        proposal: bool,
    },
    /// Render one icon to a PNG file
    Icon {
        #[clap(long)]
        name: String,
        #[clap(long, default_value_t = 64)]
        size: u32,
        #[clap(long, default_value = "#1F4E79")]
        color: String,
        #[clap(long)]
        out: PathBuf,
        #[clap(long)]
        config: Option<PathBuf>,
    },
    /// Fetch or generate the illustration for a slide through the image cache
    Illustrate {
        #[clap(long)]
        title: String,
        #[clap(long, default_value = "")]
        content: String,
        #[clap(long)]
        out: PathBuf,
        #[clap(long)]
        config: Option<PathBuf>,
    },
    /// Delete expired illustrations from the image cache directory
    Sweep {
        #[clap(long)]
        config: Option<PathBuf>,
    },
}

fn config_or_default(path: Option<&Path>) -> Result<DeckConfig> {
    let config = match path {
        Some(path) => load_config(path)?,
        None => {
            tracing::info!("No config file given, using defaults");
            DeckConfig::default()
        }
    };
    config.trace_loaded();
    Ok(config)
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "Wrote output file");
    Ok(())
}

/// Async CLI entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Plan {
            input,
            config,
            proposal,
        } => {
            let config = config_or_default(config.as_deref())?;
            let text = fs::read_to_string(&input)
                .with_context(|| format!("Failed to read input {}", input.display()))?;
            tracing::info!(command = "plan", input = %input.display(), proposal, "Planning slides");

            let outcome = if proposal {
                let proposal = Proposal::from_json(&text).context("Failed to decode proposal")?;
                plan_from_proposal(&proposal, &config)
            } else {
                plan_from_markdown(&text, &config)
            };
            tracing::info!(command = "plan", report = ?outcome.report, "Validation report");
            println!("{}", serde_json::to_string_pretty(&outcome.presentation)?);
            Ok(())
        }
        Commands::Icon {
            name,
            size,
            color,
            out,
            config,
        } => {
            let config = config_or_default(config.as_deref())?;
            let cache = IconCache::open(config.icons).context("Failed to load icon library")?;
            let Some(png) = cache.render(&name, size, &color) else {
                bail!("Icon {name:?} could not be rendered");
            };
            write_output(&out, &png)
        }
        Commands::Illustrate {
            title,
            content,
            out,
            config,
        } => {
            let config = config_or_default(config.as_deref())?;
            let client = OpenAiImageClient::new_from_env()
                .map_err(|e| anyhow!(e))
                .context("Failed to construct image client from env")?;
            let cache =
                ImageCache::open(config.images, client).context("Failed to open image cache")?;
            match cache.get_or_generate(&title, &content).await {
                Some(bytes) => write_output(&out, &bytes),
                None => {
                    tracing::error!(command = "illustrate", title = %title, "No illustration produced");
                    bail!("No illustration produced for {title:?}")
                }
            }
        }
        Commands::Sweep { config } => {
            let config = config_or_default(config.as_deref())?;
            let store = ImageStore::open(config.images).context("Failed to open image cache")?;
            let entries = store.entries();
            tracing::info!(command = "sweep", removed = store.swept_at_open(), "Sweep complete");
            println!(
                "{}",
                serde_json::json!({
                    "removed": store.swept_at_open(),
                    "remaining": entries.len(),
                    "usage_bytes": entries.iter().map(|f| f.len).sum::<u64>(),
                })
            );
            Ok(())
        }
    }
}
