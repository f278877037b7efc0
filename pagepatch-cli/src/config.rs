use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::batch::EntityTarget;
use crate::core::PatchError;

/// Which pages the batch touches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Directory holding one sub-directory per entity
    #[serde(default = "default_base_path")]
    pub base_path: PathBuf,

    /// Detail page location relative to an entity directory
    #[serde(default = "default_detail_page")]
    pub detail_page: PathBuf,

    /// Creation page location relative to an entity directory
    #[serde(default = "default_creation_page")]
    pub creation_page: PathBuf,

    /// Entity directory names, processed in this order
    #[serde(default = "default_entities")]
    pub entities: Vec<String>,
}

fn default_base_path() -> PathBuf {
    PathBuf::from("app/client/gtm-strategy")
}

fn default_detail_page() -> PathBuf {
    PathBuf::from("[oId]/page.tsx")
}

fn default_creation_page() -> PathBuf {
    PathBuf::from("new/content.tsx")
}

fn default_entities() -> Vec<String> {
    [
        "personas",
        "use-cases",
        "references",
        "segments",
        "playbooks",
        "competitors",
        "proof-points",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            detail_page: default_detail_page(),
            creation_page: default_creation_page(),
            entities: default_entities(),
        }
    }
}

impl BatchConfig {
    /// Default file name looked up in the current directory
    pub const FILE_NAME: &'static str = "pagepatch.toml";

    /// Load `path` if given, else `./pagepatch.toml` if present, else defaults.
    /// An explicitly named file that does not exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => {
                let project_path = PathBuf::from(Self::FILE_NAME);
                if project_path.exists() {
                    tracing::info!("Loading config from: {}", project_path.display());
                    Self::load_from_file(&project_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = toml::from_str(&contents)
            .map_err(|e| PatchError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Write the default config as TOML
    pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let toml_string = toml::to_string_pretty(&BatchConfig::default())
            .context("Failed to serialize default config")?;

        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory: {}", parent.display())
                })?;
            }
        }

        fs::write(path.as_ref(), toml_string)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// One target per configured entity, in configured order
    pub fn targets(&self) -> Vec<EntityTarget> {
        self.entities
            .iter()
            .map(|entity| {
                let dir = self.base_path.join(entity);
                EntityTarget {
                    entity: entity.clone(),
                    detail: dir.join(&self.detail_page),
                    creation: dir.join(&self.creation_page),
                }
            })
            .collect()
    }

    /// Replace the entity list with every immediate sub-directory of
    /// `base_path` that holds a detail or creation page. Sorted by name.
    pub fn discover(&mut self) -> Result<usize> {
        let mut found = Vec::new();

        for entry in WalkDir::new(&self.base_path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.with_context(|| {
                format!("Failed to scan directory: {}", self.base_path.display())
            })?;
            if !entry.file_type().is_dir() {
                continue;
            }

            let dir = entry.path();
            if dir.join(&self.detail_page).is_file() || dir.join(&self.creation_page).is_file() {
                found.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        tracing::debug!("Discovered {} entities under {}", found.len(), self.base_path.display());
        self.entities = found;
        Ok(self.entities.len())
    }
}
