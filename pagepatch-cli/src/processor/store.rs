use std::fs;
use std::path::Path;

use crate::core::{PatchError, PatchResult};

/// Storage boundary for page files.
///
/// Each call is a single open-read or open-write; there are no retries and no
/// temp-file swap, so a crash mid-write can leave a truncated file.
pub trait PageStore {
    fn exists(&self, path: &Path) -> bool;

    fn read(&self, path: &Path) -> PatchResult<String>;

    fn write(&self, path: &Path, contents: &str) -> PatchResult<()>;
}

/// Plain filesystem store
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl PageStore for FsStore {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read(&self, path: &Path) -> PatchResult<String> {
        fs::read_to_string(path).map_err(|e| PatchError::io(path, e))
    }

    fn write(&self, path: &Path, contents: &str) -> PatchResult<()> {
        fs::write(path, contents).map_err(|e| PatchError::io(path, e))
    }
}
