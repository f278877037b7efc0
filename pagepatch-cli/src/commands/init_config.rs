use anyhow::{bail, Result};
use std::path::PathBuf;

use pagepatch::BatchConfig;

pub fn run(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = path.unwrap_or_else(|| PathBuf::from(BatchConfig::FILE_NAME));

    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    BatchConfig::create_default_config(&path)?;
    println!("✓ Wrote default config to {}", path.display());

    Ok(())
}
