use anyhow::Result;
use serde::Serialize;

use crate::batch::BatchSummary;
use crate::core::types::*;
use crate::processor::{generate_preview, PagePreview};

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
}

const RULE: &str = "============================================================";

pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn write_summary(&self, summary: &BatchSummary) -> Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(summary)?),
            OutputFormat::Text => print!("{}", format_summary_text(summary)),
            OutputFormat::Markdown => print!("{}", format_summary_markdown(summary)),
        }
        Ok(())
    }

    pub fn write_result(&self, result: &ProcessingResult) -> Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
            OutputFormat::Text | OutputFormat::Markdown => println!("{}", format_result_line(result)),
        }
        Ok(())
    }

    pub fn write_previews(&self, previews: &[PagePreview], errors: &[String]) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                #[derive(Serialize)]
                struct PreviewResponse<'a> {
                    previews: &'a [PagePreview],
                    errors: &'a [String],
                }
                println!(
                    "{}",
                    serde_json::to_string_pretty(&PreviewResponse { previews, errors })?
                );
            }
            OutputFormat::Text | OutputFormat::Markdown => {
                if previews.iter().any(|p| p.has_changes()) {
                    println!("{}", generate_preview(previews));
                    println!("\n💡 Run without --preview to apply changes");
                } else {
                    println!("No changes needed.");
                }
                for error in errors {
                    println!("  ❌ {}", error);
                }
            }
        }
        Ok(())
    }

    pub fn write_steps(&self, variant: PageVariant, steps: &[&'static str]) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                #[derive(Serialize)]
                struct StepList<'a> {
                    variant: PageVariant,
                    steps: &'a [&'static str],
                }
                println!("{}", serde_json::to_string_pretty(&StepList { variant, steps })?);
            }
            OutputFormat::Text => {
                println!("{} pipeline:", variant);
                for (i, step) in steps.iter().enumerate() {
                    println!("  {}. {}", i + 1, step);
                }
            }
            OutputFormat::Markdown => {
                println!("## {} pipeline\n", variant);
                for (i, step) in steps.iter().enumerate() {
                    println!("{}. `{}`", i + 1, step);
                }
            }
        }
        Ok(())
    }
}

/// One status line for a processed file
pub fn format_result_line(result: &ProcessingResult) -> String {
    let path = result.path.display();
    let mut line = match result.status {
        FileStatus::Updated => format!("✅ Updated: {}", path),
        FileStatus::Unchanged => format!("➖ Unchanged: {}", path),
        FileStatus::Skipped => format!("⚠️  Not found: {}", path),
        FileStatus::Failed => format!(
            "❌ Error processing {}: {}",
            path,
            result.error.as_deref().unwrap_or("unknown error")
        ),
    };

    if result.status != FileStatus::Failed && result.is_partial() {
        line.push_str(&format!(" (partial: {})", result.missed_anchors().join(", ")));
    }
    line
}

pub fn format_summary_text(summary: &BatchSummary) -> String {
    let mut output = String::new();

    for entity in &summary.entities {
        output.push_str(&format!("\n{}\nProcessing {}...\n{}\n", RULE, entity.entity, RULE));
        for result in &entity.results {
            output.push_str(&format_result_line(result));
            output.push('\n');
        }
    }

    output.push_str(&format!("\n{}\n", RULE));
    output.push_str(&format!(
        "{} files: {} updated, {} unchanged, {} not found, {} failed",
        summary.total_files(),
        summary.updated,
        summary.unchanged,
        summary.skipped,
        summary.failed
    ));
    if summary.partial > 0 {
        output.push_str(&format!(" ({} partially migrated)", summary.partial));
    }
    output.push_str(&format!("\n{}\n", RULE));
    output
}

pub fn format_summary_markdown(summary: &BatchSummary) -> String {
    let mut output = String::from("# Page migration\n");

    for entity in &summary.entities {
        output.push_str(&format!("\n## {}\n\n", entity.entity));
        output.push_str("| File | Variant | Status | Missed anchors |\n");
        output.push_str("|------|---------|--------|----------------|\n");
        for result in &entity.results {
            output.push_str(&format!(
                "| `{}` | {} | {:?} | {} |\n",
                result.path.display(),
                result.variant,
                result.status,
                result.missed_anchors().join(", ")
            ));
        }
    }

    output.push_str("\n| Updated | Unchanged | Not found | Failed | Partial |\n");
    output.push_str("|---------|-----------|-----------|--------|---------|\n");
    output.push_str(&format!(
        "| {} | {} | {} | {} | {} |\n",
        summary.updated, summary.unchanged, summary.skipped, summary.failed, summary.partial
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::EntityReport;
    use std::path::PathBuf;

    fn summary() -> BatchSummary {
        BatchSummary {
            entities: vec![EntityReport {
                entity: "personas".to_string(),
                results: vec![
                    ProcessingResult::completed(
                        PathBuf::from("personas/[oId]/page.tsx"),
                        PageVariant::Detail,
                        true,
                        vec![StepReport {
                            step: "append-ui",
                            outcome: StepOutcome::AnchorMissing,
                        }],
                    ),
                    ProcessingResult::skipped(
                        PathBuf::from("personas/new/content.tsx"),
                        PageVariant::Creation,
                    ),
                ],
            }],
            updated: 1,
            unchanged: 0,
            skipped: 1,
            failed: 0,
            partial: 1,
        }
    }

    #[test]
    fn test_text_summary_lists_files_and_totals() {
        let text = format_summary_text(&summary());

        assert!(text.contains("Processing personas..."));
        assert!(text.contains("✅ Updated: personas/[oId]/page.tsx (partial: append-ui)"));
        assert!(text.contains("⚠️  Not found: personas/new/content.tsx"));
        assert!(text.contains("2 files: 1 updated, 0 unchanged, 1 not found, 0 failed (1 partially migrated)"));
    }

    #[test]
    fn test_failed_line_carries_error() {
        let result = ProcessingResult::failed(
            PathBuf::from("x.tsx"),
            PageVariant::Detail,
            Vec::new(),
            "disk full",
        );
        assert_eq!(format_result_line(&result), "❌ Error processing x.tsx: disk full");
    }

    #[test]
    fn test_markdown_summary_has_table_rows() {
        let md = format_summary_markdown(&summary());

        assert!(md.contains("## personas"));
        assert!(md.contains("| `personas/[oId]/page.tsx` | detail | Updated | append-ui |"));
        assert!(md.contains("| 1 | 0 | 1 | 0 | 1 |"));
    }
}
