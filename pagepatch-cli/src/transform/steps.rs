use crate::core::{PatchResult, StepOutcome};

use super::guard::Guard;
use super::matcher::{insert_at, splice, Anchor};
use super::snippets;

/// One semantic edit applied to a page buffer.
///
/// `rewrite` is pure: it returns the edited text, or `None` when the step's
/// anchor cannot be found. `apply` wraps it with the idempotency guard.
pub trait Step {
    /// Stable identifier, used in reports and logs
    fn name(&self) -> &'static str;

    fn guard(&self) -> &Guard;

    /// Whether this step's effect is already in the buffer
    fn is_applied(&self, buffer: &str) -> bool {
        self.guard().is_satisfied(buffer)
    }

    fn rewrite(&self, buffer: &str) -> Option<String>;

    fn apply(&self, buffer: String) -> (String, StepOutcome) {
        if self.is_applied(&buffer) {
            return (buffer, StepOutcome::AlreadyPresent);
        }
        match self.rewrite(&buffer) {
            Some(next) => (next, StepOutcome::Applied),
            None => (buffer, StepOutcome::AnchorMissing),
        }
    }
}

/// Adds the two component imports after the last import statement
pub struct AddImports {
    guard: Guard,
    last_import: Anchor,
}

impl AddImports {
    pub const NAME: &'static str = "add-imports";

    pub fn new() -> PatchResult<Self> {
        Ok(Self {
            guard: Guard::new(&["ConfirmDeleteModal", "UnsavedChangesWarning"]),
            last_import: Anchor::new(Self::NAME, r#"import [^;]+from ['"][^'"]+['"];"#)?,
        })
    }
}

impl Step for AddImports {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn guard(&self) -> &Guard {
        &self.guard
    }

    fn rewrite(&self, buffer: &str) -> Option<String> {
        let anchor = self.last_import.last(buffer)?;
        Some(insert_at(buffer, anchor.end, snippets::IMPORTS))
    }
}

/// Declares the unsaved-changes flag and the delete confirmation record
/// between the state block and the first effect
pub struct AddTrackingState {
    guard: Guard,
    state_boundary: Anchor,
}

impl AddTrackingState {
    pub const NAME: &'static str = "add-tracking-state";

    pub fn new() -> PatchResult<Self> {
        Ok(Self {
            guard: Guard::new(&["hasUnsavedChanges", "deleteConfirmation"]),
            state_boundary: Anchor::new(
                Self::NAME,
                r"\);[ \t]*\n(?:[ \t]*\n)+[ \t]*(useEffect\()",
            )?,
        })
    }
}

impl Step for AddTrackingState {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn guard(&self) -> &Guard {
        &self.guard
    }

    fn rewrite(&self, buffer: &str) -> Option<String> {
        let effect = self.state_boundary.first(buffer)?.group(1)?;
        Some(insert_at(buffer, effect.start, snippets::TRACKING_STATE))
    }
}

/// Body of a component-level arrow function: blank lines or lines indented
/// deeper than the component, so a match never runs into a sibling declaration.
const HANDLER_BODY: &str = r"(?:(?:   [^\n]*)?\n)*?";

/// Swaps the immediate-delete handler for the confirm-first handler set
pub struct ReplaceRemoveHandler {
    guard: Guard,
    remove_handler: Anchor,
}

impl ReplaceRemoveHandler {
    pub const NAME: &'static str = "replace-remove-handler";

    pub fn new() -> PatchResult<Self> {
        Ok(Self {
            guard: Guard::new(&["handleConfirmDelete", "handleBack"]),
            remove_handler: Anchor::new(
                Self::NAME,
                &format!(
                    r"  const handleRemoveArrayItem = \(field: string, index: number\) => \{{\n{}  \}};",
                    HANDLER_BODY
                ),
            )?,
        })
    }
}

impl Step for ReplaceRemoveHandler {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn guard(&self) -> &Guard {
        &self.guard
    }

    fn rewrite(&self, buffer: &str) -> Option<String> {
        let handler = self.remove_handler.first(buffer)?;
        Some(splice(buffer, handler.start..handler.end, snippets::HANDLERS))
    }
}

/// Points inline `router.back()` buttons at `handleBack`
pub struct RewireBackButton {
    guard: Guard,
    inline_back: Anchor,
}

impl RewireBackButton {
    pub const NAME: &'static str = "rewire-back-button";

    pub fn new() -> PatchResult<Self> {
        Ok(Self {
            guard: Guard::none(),
            inline_back: Anchor::new(Self::NAME, r"onClick=\{\(\) => router\.back\(\)\}")?,
        })
    }
}

impl Step for RewireBackButton {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn guard(&self) -> &Guard {
        &self.guard
    }

    // Always rewrites when an inline action is left. Once none remain and a
    // rewired button exists there is nothing to do, which is not an anchor miss.
    fn is_applied(&self, buffer: &str) -> bool {
        !self.inline_back.is_match(buffer) && buffer.contains(snippets::BACK_ACTION)
    }

    fn rewrite(&self, buffer: &str) -> Option<String> {
        self.inline_back
            .replace_all_literal(buffer, snippets::BACK_ACTION)
    }
}

/// Clears the flag right after the save success toast
pub struct ClearFlagOnSave {
    guard: Guard,
    save_success: Anchor,
}

impl ClearFlagOnSave {
    pub const NAME: &'static str = "clear-flag-on-save";

    pub fn new() -> PatchResult<Self> {
        Ok(Self {
            guard: Guard::new(&[snippets::CLEAR_FLAG]),
            save_success: Anchor::new(
                Self::NAME,
                r"(toast\.success\([^\)]+\);)\n(\s+)(setIsEditing\(false\);|const backUrl)",
            )?,
        })
    }
}

impl Step for ClearFlagOnSave {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn guard(&self) -> &Guard {
        &self.guard
    }

    fn rewrite(&self, buffer: &str) -> Option<String> {
        let found = self.save_success.first(buffer)?;
        let indent = &buffer[found.group(2)?];
        let follow = found.group(3)?;
        let statement = format!("{}\n{}", snippets::CLEAR_FLAG, indent);
        Some(insert_at(buffer, follow.start, &statement))
    }
}

/// Makes `handleCancel` ask before discarding edits. Detail pages only.
pub struct GuardCancel {
    guard: Guard,
    cancel_start: Anchor,
    cancel_handler: Anchor,
    editing_off: Anchor,
}

impl GuardCancel {
    pub const NAME: &'static str = "guard-cancel";

    pub fn new() -> PatchResult<Self> {
        Ok(Self {
            guard: Guard::new(&[snippets::CANCEL_GUARD_MARKER]),
            cancel_start: Anchor::new(Self::NAME, r"  const handleCancel = \(\) => \{\n")?,
            cancel_handler: Anchor::new(
                Self::NAME,
                &format!(r"  const handleCancel = \(\) => \{{\n({})  \}};", HANDLER_BODY),
            )?,
            editing_off: Anchor::new(Self::NAME, r"(?m)^([ \t]*)setIsEditing\(false\);")?,
        })
    }
}

impl Step for GuardCancel {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn guard(&self) -> &Guard {
        &self.guard
    }

    fn rewrite(&self, buffer: &str) -> Option<String> {
        let start = self.cancel_start.first(buffer)?;
        let guarded = insert_at(buffer, start.end, snippets::CANCEL_GUARD);

        // Second edit is confined to the handler body and is best-effort.
        let body = self
            .cancel_handler
            .first_within(&guarded, start.start, guarded.len())
            .filter(|handler| handler.start == start.start)
            .and_then(|handler| handler.group(1));
        let Some(body) = body else {
            tracing::debug!("{}: handleCancel has no closing `}};` at component indent", Self::NAME);
            return Some(guarded);
        };

        match self.editing_off.first_within(&guarded, body.start, body.end) {
            Some(off) => {
                let line = off.group(0)?;
                let indent = &guarded[off.group(1)?];
                let statement = format!("{}{}\n", indent, snippets::CLEAR_FLAG);
                Some(insert_at(&guarded, line.start, &statement))
            }
            None => {
                tracing::debug!("{}: no setIsEditing(false) inside handleCancel", Self::NAME);
                Some(guarded)
            }
        }
    }
}

/// Mounts the warning component and the confirmation dialog at the end of the tree
pub struct AppendUi {
    guard: Guard,
    closing: Anchor,
}

impl AppendUi {
    pub const NAME: &'static str = "append-ui";

    pub fn new() -> PatchResult<Self> {
        Ok(Self {
            guard: Guard::new(&["<UnsavedChangesWarning"]),
            closing: Anchor::new(Self::NAME, r"(      </div>\n)    </div>\n  \);\n\}")?,
        })
    }
}

impl Step for AppendUi {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn guard(&self) -> &Guard {
        &self.guard
    }

    fn rewrite(&self, buffer: &str) -> Option<String> {
        let inner_close = self.closing.first(buffer)?.group(1)?;
        Some(insert_at(buffer, inner_close.end, snippets::UI_AFFORDANCES))
    }
}
