use serde::Serialize;
use std::path::PathBuf;

use crate::core::{FileStatus, PageVariant, PatchError, ProcessingResult};
use crate::processor::{PagePreview, PageProcessor, PageStore};

/// The two pages that belong to one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityTarget {
    pub entity: String,
    pub detail: PathBuf,
    pub creation: PathBuf,
}

impl EntityTarget {
    fn pages(&self) -> [(&PathBuf, PageVariant); 2] {
        [
            (&self.detail, PageVariant::Detail),
            (&self.creation, PageVariant::Creation),
        ]
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EntityReport {
    pub entity: String,
    pub results: Vec<ProcessingResult>,
}

/// Result of a batch run
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    pub entities: Vec<EntityReport>,

    /// Files rewritten in place
    pub updated: usize,

    /// Files that already carried every change
    pub unchanged: usize,

    /// Paths that do not exist
    pub skipped: usize,

    /// Files whose read or write failed
    pub failed: usize,

    /// Updated or unchanged files where at least one anchor was missing
    pub partial: usize,
}

impl BatchSummary {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, result: &ProcessingResult) {
        match result.status {
            FileStatus::Updated => self.updated += 1,
            FileStatus::Unchanged => self.unchanged += 1,
            FileStatus::Skipped => self.skipped += 1,
            FileStatus::Failed => self.failed += 1,
        }
        if result.status != FileStatus::Failed && result.is_partial() {
            self.partial += 1;
        }
    }

    pub fn total_files(&self) -> usize {
        self.updated + self.unchanged + self.skipped + self.failed
    }

    pub fn results(&self) -> impl Iterator<Item = &ProcessingResult> {
        self.entities.iter().flat_map(|e| e.results.iter())
    }
}

/// Process every page of every target, one file at a time.
///
/// A failing file is recorded and the run moves on; the batch always completes.
pub fn run_batch<S: PageStore>(
    processor: &PageProcessor<S>,
    targets: &[EntityTarget],
) -> BatchSummary {
    let mut summary = BatchSummary::new();

    for target in targets {
        tracing::info!("Processing {}...", target.entity);
        let mut report = EntityReport {
            entity: target.entity.clone(),
            results: Vec::new(),
        };

        for (path, variant) in target.pages() {
            let result = processor.process(path, variant);
            summary.record(&result);
            report.results.push(result);
        }

        summary.entities.push(report);
    }

    summary
}

/// Dry-run counterpart of [`run_batch`]. Missing files are left out;
/// unreadable ones are returned as errors next to the previews.
pub fn preview_batch<S: PageStore>(
    processor: &PageProcessor<S>,
    targets: &[EntityTarget],
) -> (Vec<PagePreview>, Vec<String>) {
    let mut previews = Vec::new();
    let mut errors = Vec::new();

    for target in targets {
        for (path, variant) in target.pages() {
            match processor.preview(path, variant) {
                Ok(preview) => previews.push(preview),
                Err(PatchError::MissingFile(_)) => {}
                Err(e) => errors.push(e.to_string()),
            }
        }
    }

    (previews, errors)
}
