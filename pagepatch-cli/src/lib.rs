// pagepatch/src/lib.rs
pub mod batch;
pub mod config;
pub mod core;
pub mod processor;
pub mod transform;

// Re-export key types
pub use batch::{preview_batch, run_batch, BatchSummary, EntityReport, EntityTarget};
pub use config::BatchConfig;
pub use crate::core::{FileStatus, PageVariant, PatchError, ProcessingResult, StepOutcome, StepReport};
pub use processor::{FsStore, PagePreview, PageProcessor, PageStore};
pub use transform::{Pipeline, PipelineOutput};
