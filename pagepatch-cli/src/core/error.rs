use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("File not found: {0}")]
    MissingFile(PathBuf),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid anchor pattern for step `{step}`: {source}")]
    InvalidPattern {
        step: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PatchError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type PatchResult<T> = std::result::Result<T, PatchError>;
