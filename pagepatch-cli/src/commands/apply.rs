use anyhow::Result;
use std::path::PathBuf;

use pagepatch::core::output::{OutputFormat, OutputWriter};
use pagepatch::{preview_batch, run_batch, BatchConfig, FsStore, PageProcessor};

pub fn run(
    mut config: BatchConfig,
    base_path: Option<PathBuf>,
    entities: Vec<String>,
    discover: bool,
    preview: bool,
    format: OutputFormat,
) -> Result<()> {
    if let Some(base_path) = base_path {
        config.base_path = base_path;
    }

    if discover {
        config.discover()?;
    }

    if !entities.is_empty() {
        config.entities = entities;
    }

    let targets = config.targets();
    if targets.is_empty() {
        println!("No entities to process under {}", config.base_path.display());
        return Ok(());
    }

    let processor = PageProcessor::new(FsStore)?;
    let writer = OutputWriter::new(format);

    if preview {
        // Preview mode - show what would change
        let (previews, errors) = preview_batch(&processor, &targets);
        writer.write_previews(&previews, &errors)?;
    } else {
        // Apply mode - make the changes
        let summary = run_batch(&processor, &targets);
        writer.write_summary(&summary)?;
    }

    Ok(())
}
