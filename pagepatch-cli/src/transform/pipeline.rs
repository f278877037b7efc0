use crate::core::{PageVariant, PatchResult, StepOutcome, StepReport};

use super::steps::{
    AddImports, AddTrackingState, AppendUi, ClearFlagOnSave, GuardCancel, ReplaceRemoveHandler,
    RewireBackButton, Step,
};

/// Ordered list of steps for one page variant.
///
/// Steps run strictly in order and each one sees the previous step's output.
/// There is no rollback: when an early step misses its anchor, later steps that
/// depend on its text will usually miss too.
pub struct Pipeline {
    variant: PageVariant,
    steps: Vec<Box<dyn Step>>,
}

/// Buffer produced by a pipeline run plus what every step did
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub buffer: String,
    pub reports: Vec<StepReport>,
}

impl PipelineOutput {
    pub fn applied_count(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| r.outcome == StepOutcome::Applied)
            .count()
    }
}

impl Pipeline {
    pub fn for_variant(variant: PageVariant) -> PatchResult<Self> {
        let mut steps: Vec<Box<dyn Step>> = vec![
            Box::new(AddImports::new()?),
            Box::new(AddTrackingState::new()?),
            Box::new(ReplaceRemoveHandler::new()?),
            Box::new(RewireBackButton::new()?),
            Box::new(ClearFlagOnSave::new()?),
        ];

        // Creation forms have no edit mode to cancel out of
        if variant == PageVariant::Detail {
            steps.push(Box::new(GuardCancel::new()?));
        }

        steps.push(Box::new(AppendUi::new()?));

        Ok(Self { variant, steps })
    }

    pub fn variant(&self) -> PageVariant {
        self.variant
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    pub fn run(&self, buffer: String) -> PipelineOutput {
        let mut buffer = buffer;
        let mut reports = Vec::with_capacity(self.steps.len());

        for step in &self.steps {
            let (next, outcome) = step.apply(buffer);
            tracing::debug!("{}: {:?}", step.name(), outcome);
            buffer = next;
            reports.push(StepReport {
                step: step.name(),
                outcome,
            });
        }

        PipelineOutput { buffer, reports }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_detail_runs_all_seven_steps_in_order() {
        let pipeline = Pipeline::for_variant(PageVariant::Detail).unwrap();

        assert_eq!(
            pipeline.step_names(),
            vec![
                "add-imports",
                "add-tracking-state",
                "replace-remove-handler",
                "rewire-back-button",
                "clear-flag-on-save",
                "guard-cancel",
                "append-ui",
            ]
        );
    }

    #[test]
    fn test_creation_omits_cancel_guard() {
        let pipeline = Pipeline::for_variant(PageVariant::Creation).unwrap();
        let names = pipeline.step_names();

        assert_eq!(names.len(), 6);
        assert!(!names.contains(&"guard-cancel"));
        assert_eq!(names.last(), Some(&"append-ui"));
    }

    #[test]
    fn test_foreign_content_is_untouched() {
        let input = "fn main() {\n    println!(\"not a page\");\n}\n".to_string();

        for variant in [PageVariant::Detail, PageVariant::Creation] {
            let pipeline = Pipeline::for_variant(variant).unwrap();
            let output = pipeline.run(input.clone());

            assert_eq!(output.buffer, input);
            assert_eq!(output.applied_count(), 0);
            assert!(output
                .reports
                .iter()
                .all(|r| r.outcome == StepOutcome::AnchorMissing));
        }
    }

    #[test]
    fn test_imports_present_state_still_added() {
        let input = "import ConfirmDeleteModal from '@/components/ConfirmDeleteModal';\n\
                     import UnsavedChangesWarning from '@/components/UnsavedChangesWarning';\n\
                     \x20 const [items, setItems] = useState([]);\n\n  useEffect(() => {}, []);\n";
        let output = Pipeline::for_variant(PageVariant::Creation)
            .unwrap()
            .run(input.to_string());

        assert_eq!(output.reports[0].outcome, StepOutcome::AlreadyPresent);
        assert_eq!(output.reports[1].outcome, StepOutcome::Applied);
        assert!(output.buffer.contains("const [hasUnsavedChanges, setHasUnsavedChanges]"));
    }
}
