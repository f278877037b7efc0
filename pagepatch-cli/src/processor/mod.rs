mod preview;
mod store;

pub use preview::{compute_diff, generate_preview, PagePreview};
pub use store::{FsStore, PageStore};

use std::path::Path;

use crate::core::{PageVariant, PatchError, PatchResult, ProcessingResult};
use crate::transform::{Pipeline, PipelineOutput};

/// Reads one page, runs the pipeline for its variant and writes the result back.
pub struct PageProcessor<S> {
    store: S,
    detail: Pipeline,
    creation: Pipeline,
}

impl<S: PageStore> PageProcessor<S> {
    pub fn new(store: S) -> PatchResult<Self> {
        Ok(Self {
            store,
            detail: Pipeline::for_variant(PageVariant::Detail)?,
            creation: Pipeline::for_variant(PageVariant::Creation)?,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn pipeline(&self, variant: PageVariant) -> &Pipeline {
        match variant {
            PageVariant::Detail => &self.detail,
            PageVariant::Creation => &self.creation,
        }
    }

    /// Process a single file. Never fails: every problem ends up in the result.
    pub fn process(&self, path: &Path, variant: PageVariant) -> ProcessingResult {
        if !self.store.exists(path) {
            tracing::warn!("Not found: {}", path.display());
            return ProcessingResult::skipped(path.to_path_buf(), variant);
        }

        tracing::info!("Processing {} page: {}", variant, path.display());

        let original = match self.store.read(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Read failed: {}", e);
                return ProcessingResult::failed(path.to_path_buf(), variant, Vec::new(), e);
            }
        };

        let PipelineOutput { buffer, reports } = self.pipeline(variant).run(original.clone());

        if buffer == original {
            return ProcessingResult::completed(path.to_path_buf(), variant, false, reports);
        }

        match self.store.write(path, &buffer) {
            Ok(()) => ProcessingResult::completed(path.to_path_buf(), variant, true, reports),
            Err(e) => {
                tracing::warn!("Write failed: {}", e);
                ProcessingResult::failed(path.to_path_buf(), variant, reports, e)
            }
        }
    }

    /// Run the pipeline without writing and describe the would-be change
    pub fn preview(&self, path: &Path, variant: PageVariant) -> PatchResult<PagePreview> {
        if !self.store.exists(path) {
            return Err(PatchError::MissingFile(path.to_path_buf()));
        }

        let original = self.store.read(path)?;
        let output = self.pipeline(variant).run(original.clone());

        Ok(PagePreview::new(
            path.to_path_buf(),
            variant,
            output.reports,
            &original,
            &output.buffer,
        ))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};
    use std::io;
    use std::path::PathBuf;

    /// In-memory store that can be told to fail writes for chosen paths
    #[derive(Default)]
    pub struct MemoryStore {
        pub files: RefCell<HashMap<PathBuf, String>>,
        pub failing_writes: HashSet<PathBuf>,
    }

    impl MemoryStore {
        pub fn with_file(self, path: &str, contents: &str) -> Self {
            self.files
                .borrow_mut()
                .insert(PathBuf::from(path), contents.to_string());
            self
        }

        pub fn fail_writes_to(mut self, path: &str) -> Self {
            self.failing_writes.insert(PathBuf::from(path));
            self
        }

        pub fn contents(&self, path: &str) -> Option<String> {
            self.files.borrow().get(Path::new(path)).cloned()
        }
    }

    impl PageStore for MemoryStore {
        fn exists(&self, path: &Path) -> bool {
            self.files.borrow().contains_key(path)
        }

        fn read(&self, path: &Path) -> PatchResult<String> {
            self.files.borrow().get(path).cloned().ok_or_else(|| {
                PatchError::io(path, io::Error::new(io::ErrorKind::NotFound, "missing"))
            })
        }

        fn write(&self, path: &Path, contents: &str) -> PatchResult<()> {
            if self.failing_writes.contains(path) {
                return Err(PatchError::io(
                    path,
                    io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
                ));
            }
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), contents.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MemoryStore;
    use super::*;
    use crate::core::FileStatus;

    const PAGE: &str = "import { useState, useEffect } from 'react';\n\
                        \n\
                        export default function Page() {\n\
                        \x20 const [items, setItems] = useState([]);\n\
                        \n\
                        \x20 useEffect(() => {}, []);\n\
                        \n\
                        \x20 return (\n\
                        \x20   <div>\n\
                        \x20     <div>\n\
                        \x20       <button onClick={() => router.back()}>Back</button>\n\
                        \x20     </div>\n\
                        \x20   </div>\n\
                        \x20 );\n\
                        }\n";

    #[test]
    fn test_missing_file_is_skipped() {
        let processor = PageProcessor::new(MemoryStore::default()).unwrap();
        let result = processor.process(Path::new("nope.tsx"), PageVariant::Detail);

        assert_eq!(result.status, FileStatus::Skipped);
        assert!(result.error.is_none());
    }

    #[test]
    fn test_updated_then_unchanged() {
        let store = MemoryStore::default().with_file("page.tsx", PAGE);
        let processor = PageProcessor::new(store).unwrap();

        let first = processor.process(Path::new("page.tsx"), PageVariant::Creation);
        assert_eq!(first.status, FileStatus::Updated);
        let written = processor.store().contents("page.tsx").unwrap();
        assert!(written.contains("<UnsavedChangesWarning hasUnsavedChanges={hasUnsavedChanges} />"));
        assert!(written.contains("onClick={handleBack}"));

        let second = processor.process(Path::new("page.tsx"), PageVariant::Creation);
        assert_eq!(second.status, FileStatus::Unchanged);
        assert_eq!(processor.store().contents("page.tsx").unwrap(), written);
    }

    #[test]
    fn test_write_failure_is_reported_not_raised() {
        let store = MemoryStore::default()
            .with_file("locked.tsx", PAGE)
            .fail_writes_to("locked.tsx");
        let processor = PageProcessor::new(store).unwrap();

        let result = processor.process(Path::new("locked.tsx"), PageVariant::Detail);
        assert_eq!(result.status, FileStatus::Failed);
        assert!(result.error.as_deref().unwrap_or("").contains("read-only"));
        assert_eq!(processor.store().contents("locked.tsx").unwrap(), PAGE);
    }

    #[test]
    fn test_preview_does_not_write() {
        let store = MemoryStore::default().with_file("page.tsx", PAGE);
        let processor = PageProcessor::new(store).unwrap();

        let preview = processor
            .preview(Path::new("page.tsx"), PageVariant::Detail)
            .unwrap();
        assert!(preview.has_changes());
        assert!(preview.diff.contains("+import ConfirmDeleteModal"));
        assert_eq!(processor.store().contents("page.tsx").unwrap(), PAGE);
    }

    #[test]
    fn test_preview_of_missing_file_errors() {
        let processor = PageProcessor::new(MemoryStore::default()).unwrap();
        let err = processor
            .preview(Path::new("gone.tsx"), PageVariant::Detail)
            .unwrap_err();
        assert!(matches!(err, PatchError::MissingFile(_)));
    }
}
