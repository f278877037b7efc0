//! Ordered, idempotent rewrite steps over a page buffer.

pub mod guard;
pub mod matcher;
pub mod pipeline;
pub mod snippets;
pub mod steps;

pub use guard::Guard;
pub use matcher::{Anchor, AnchorMatch};
pub use pipeline::{Pipeline, PipelineOutput};
pub use steps::Step;
