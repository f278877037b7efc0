use serde::Serialize;
use similar::{ChangeTag, TextDiff};
use std::path::PathBuf;

use crate::core::{PageVariant, StepReport};

/// What the pipeline would do to one file, without writing it
#[derive(Debug, Clone, Serialize)]
pub struct PagePreview {
    pub path: PathBuf,
    pub variant: PageVariant,
    pub steps: Vec<StepReport>,
    pub lines_added: usize,
    pub lines_removed: usize,

    /// Unified diff, empty when nothing would change
    pub diff: String,
}

impl PagePreview {
    pub fn new(
        path: PathBuf,
        variant: PageVariant,
        steps: Vec<StepReport>,
        old: &str,
        new: &str,
    ) -> Self {
        let label = path.display().to_string();
        let (diff, lines_added, lines_removed) = compute_diff(&label, old, new);
        Self {
            path,
            variant,
            steps,
            lines_added,
            lines_removed,
            diff,
        }
    }

    pub fn has_changes(&self) -> bool {
        self.lines_added > 0 || self.lines_removed > 0
    }

    /// Human-readable block for one file
    pub fn format_diff(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("📝 {} ({})\n", self.path.display(), self.variant));
        output.push_str(&format!(
            "   +{} -{}\n\n",
            self.lines_added, self.lines_removed
        ));
        output.push_str(&self.diff);
        output
    }
}

/// Unified diff of `old` against `new` plus added/removed line counts
pub fn compute_diff(label: &str, old: &str, new: &str) -> (String, usize, usize) {
    let diff = TextDiff::from_lines(old, new);

    let mut added = 0;
    let mut removed = 0;
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => added += 1,
            ChangeTag::Delete => removed += 1,
            ChangeTag::Equal => {}
        }
    }

    if added == 0 && removed == 0 {
        return (String::new(), 0, 0);
    }

    let text = diff
        .unified_diff()
        .context_radius(3)
        .header(&format!("a/{}", label), &format!("b/{}", label))
        .to_string();

    (text, added, removed)
}

/// Generate preview for all files
pub fn generate_preview(previews: &[PagePreview]) -> String {
    let changed: Vec<&PagePreview> = previews.iter().filter(|p| p.has_changes()).collect();
    let mut output = String::new();

    output.push_str("========================================\n");
    output.push_str("           PREVIEW CHANGES\n");
    output.push_str("========================================\n\n");
    output.push_str(&format!(
        "📊 {} file{} would change\n\n",
        changed.len(),
        if changed.len() == 1 { "" } else { "s" }
    ));

    for (i, preview) in changed.iter().enumerate() {
        output.push_str(&preview.format_diff());
        if i < changed.len() - 1 {
            output.push_str("\n----------------------------------------\n\n");
        }
    }

    output.push_str("\n========================================\n");
    output
}
