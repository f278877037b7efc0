use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use pagepatch::core::output::OutputFormat;
use pagepatch::{BatchConfig, PageVariant};

mod commands;

#[derive(Parser)]
#[command(name = "pagepatch")]
#[command(author, version)]
#[command(
    about = "Add unsaved-changes and delete-confirmation behaviour to entity pages",
    long_about = "Runs an ordered, idempotent set of rewrite steps over entity detail and \
                  creation pages. Re-running is safe: steps whose changes are already \
                  present are skipped, and pages that do not look as expected are left alone."
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (json, text, markdown)
    #[arg(short = 'f', long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Config file (defaults to ./pagepatch.toml when present)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Migrate every configured entity's detail and creation page
    Apply {
        /// Directory holding the entity directories
        #[arg(short = 'b', long)]
        base_path: Option<PathBuf>,

        /// Only process these entities (repeatable)
        #[arg(short, long = "entity")]
        entities: Vec<String>,

        /// Use every entity directory found under the base path
        #[arg(long)]
        discover: bool,

        /// Show the changes without writing
        #[arg(long)]
        preview: bool,
    },

    /// Migrate a single page
    File {
        /// Page to rewrite
        path: PathBuf,

        /// Page variant
        #[arg(long, value_enum)]
        variant: PageVariant,

        /// Show the changes without writing
        #[arg(long)]
        preview: bool,
    },

    /// List the pipeline steps
    Steps {
        /// Only this variant
        #[arg(long, value_enum)]
        variant: Option<PageVariant>,
    },

    /// Write a default pagepatch.toml
    InitConfig {
        /// Destination (defaults to ./pagepatch.toml)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "pagepatch=debug"
    } else {
        "pagepatch=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Apply {
            base_path,
            entities,
            discover,
            preview,
        } => {
            let config = BatchConfig::load(cli.config.as_deref())?;
            commands::apply::run(config, base_path, entities, discover, preview, cli.format)?
        }
        Commands::File {
            path,
            variant,
            preview,
        } => commands::file::run(path, variant, preview, cli.format)?,
        Commands::Steps { variant } => commands::steps::run(variant, cli.format)?,
        Commands::InitConfig { path, force } => commands::init_config::run(path, force)?,
    }

    Ok(())
}
