use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Which kind of entity page a file is. Decides the step list the pipeline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PageVariant {
    /// `[oId]/page.tsx`: view + edit page for an existing entity
    Detail,
    /// `new/content.tsx`: creation form
    Creation,
}

impl PageVariant {
    pub fn label(&self) -> &'static str {
        match self {
            PageVariant::Detail => "detail",
            PageVariant::Creation => "creation",
        }
    }
}

impl fmt::Display for PageVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a single step did to the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    /// The rewrite ran and changed the buffer
    Applied,
    /// The guard found the step's markers; buffer left alone
    AlreadyPresent,
    /// The anchor pattern did not match; buffer left alone
    AnchorMissing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub step: &'static str,
    pub outcome: StepOutcome,
}

/// Final state of one file after the page processor is done with it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// Rewritten in place
    Updated,
    /// Pipeline produced identical text, nothing written
    Unchanged,
    /// Path does not exist
    Skipped,
    /// Read or write failed
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessingResult {
    pub path: PathBuf,
    pub variant: PageVariant,
    pub status: FileStatus,

    /// One entry per pipeline step, in pipeline order. Empty when the
    /// file was skipped or could not be read.
    pub steps: Vec<StepReport>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProcessingResult {
    pub fn skipped(path: PathBuf, variant: PageVariant) -> Self {
        Self {
            path,
            variant,
            status: FileStatus::Skipped,
            steps: Vec::new(),
            error: None,
        }
    }

    pub fn failed(
        path: PathBuf,
        variant: PageVariant,
        steps: Vec<StepReport>,
        error: impl fmt::Display,
    ) -> Self {
        Self {
            path,
            variant,
            status: FileStatus::Failed,
            steps,
            error: Some(error.to_string()),
        }
    }

    pub fn completed(
        path: PathBuf,
        variant: PageVariant,
        changed: bool,
        steps: Vec<StepReport>,
    ) -> Self {
        Self {
            path,
            variant,
            status: if changed {
                FileStatus::Updated
            } else {
                FileStatus::Unchanged
            },
            steps,
            error: None,
        }
    }

    /// Names of the steps whose anchor could not be located
    pub fn missed_anchors(&self) -> Vec<&'static str> {
        self.steps
            .iter()
            .filter(|r| r.outcome == StepOutcome::AnchorMissing)
            .map(|r| r.step)
            .collect()
    }

    /// True when at least one step silently skipped for lack of an anchor
    pub fn is_partial(&self) -> bool {
        self.steps
            .iter()
            .any(|r| r.outcome == StepOutcome::AnchorMissing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missed_anchors_only_lists_anchor_misses() {
        let result = ProcessingResult::completed(
            PathBuf::from("a/page.tsx"),
            PageVariant::Detail,
            true,
            vec![
                StepReport { step: "add-imports", outcome: StepOutcome::Applied },
                StepReport { step: "add-tracking-state", outcome: StepOutcome::AnchorMissing },
                StepReport { step: "append-ui", outcome: StepOutcome::AlreadyPresent },
            ],
        );

        assert_eq!(result.status, FileStatus::Updated);
        assert!(result.is_partial());
        assert_eq!(result.missed_anchors(), vec!["add-tracking-state"]);
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let result = ProcessingResult::skipped(PathBuf::from("x.tsx"), PageVariant::Creation);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["status"], "skipped");
        assert_eq!(json["variant"], "creation");
        assert!(json.get("error").is_none());
    }
}
