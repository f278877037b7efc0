//! TSX fragments spliced into entity pages.

/// Placed after the last import statement
pub const IMPORTS: &str = "
import ConfirmDeleteModal from '@/components/ConfirmDeleteModal';
import UnsavedChangesWarning from '@/components/UnsavedChangesWarning';";

/// Placed in front of the first `useEffect(` that follows the state block
pub const TRACKING_STATE: &str = r#"// Unsaved changes tracking
  const [hasUnsavedChanges, setHasUnsavedChanges] = useState(false);

  // Delete confirmation modal state
  const [deleteConfirmation, setDeleteConfirmation] = useState<{
    isOpen: boolean;
    field: string;
    index: number;
    itemName: string;
  }>({
    isOpen: false,
    field: '',
    index: -1,
    itemName: ''
  });

  "#;

/// Replaces the immediate-delete `handleRemoveArrayItem`
pub const HANDLERS: &str = r#"  const handleRemoveArrayItem = (field: string, index: number) => {
    // Get the item value for the confirmation modal
    const fieldArray = formData[field as keyof typeof formData] as string[];
    const itemName = fieldArray[index] || 'this item';

    // Show delete confirmation modal
    setDeleteConfirmation({
      isOpen: true,
      field,
      index,
      itemName
    });
  };

  const handleConfirmDelete = () => {
    // Actually delete the item
    const { field, index } = deleteConfirmation;
    setFormData(prev => ({
      ...prev,
      [field]: (prev[field as keyof typeof prev] as string[]).filter((_, i) => i !== index)
    }));

    // Close modal
    setDeleteConfirmation({
      isOpen: false,
      field: '',
      index: -1,
      itemName: ''
    });
  };

  const handleBack = () => {
    if (hasUnsavedChanges) {
      const confirmed = window.confirm('You have unsaved changes. Are you sure you want to leave this page?');
      if (!confirmed) return;
    }
    router.back();
  };"#;

pub const BACK_ACTION: &str = "onClick={handleBack}";

pub const CLEAR_FLAG: &str = "setHasUnsavedChanges(false);";

/// Marker comment that opens the cancel guard
pub const CANCEL_GUARD_MARKER: &str = "Check for unsaved changes";

/// Inserted as the first statements of `handleCancel`
pub const CANCEL_GUARD: &str = r#"    // Check for unsaved changes
    if (hasUnsavedChanges) {
      const confirmed = window.confirm('You have unsaved changes. Are you sure you want to cancel?');
      if (!confirmed) return;
    }

"#;

/// Inserted between the two closing `</div>` lines at the end of the component
pub const UI_AFFORDANCES: &str = r#"
      {/* Unsaved Changes Warning */}
      <UnsavedChangesWarning hasUnsavedChanges={hasUnsavedChanges} />

      {/* Delete Confirmation Modal */}
      <ConfirmDeleteModal
        isOpen={deleteConfirmation.isOpen}
        onClose={() => setDeleteConfirmation({ isOpen: false, field: '', index: -1, itemName: '' })}
        onConfirm={handleConfirmDelete}
        itemName={deleteConfirmation.itemName}
        itemType="item"
      />
"#;
