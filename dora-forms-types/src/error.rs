use crate::Label;

/// Error type for saved-forms view operations.
#[derive(Debug, thiserror::Error)]
pub enum SavedFormsError {
    /// The requested index does not point into the supplied forms.
    #[error("Form index {index} out of range ({len} saved forms)")]
    InvalidSelection { index: usize, len: usize },

    /// The operation needs a selected form and none is selected.
    #[error("No form selected")]
    NoSelection,

    /// Export was requested before the chart completed a render pass.
    #[error("Chart has not been rendered yet")]
    ChartNotReady,

    /// Export was requested while edit mode holds unsaved changes.
    #[error("Unsaved changes must be saved or discarded before export")]
    UnsavedChanges,

    /// Chart capture, document generation or saving failed.
    #[error("Document error: {0}")]
    Document(#[source] anyhow::Error),
}

impl SavedFormsError {
    /// Create a document error from any error type.
    pub fn document(err: impl Into<anyhow::Error>) -> Self {
        Self::Document(err.into())
    }

    /// The bilingual message shown to the user for this error.
    pub fn label(&self) -> Label {
        match self {
            Self::InvalidSelection { .. } => Label::InvalidSelection,
            Self::NoSelection => Label::NoSelection,
            Self::ChartNotReady => Label::ChartNotReady,
            Self::UnsavedChanges => Label::UnsavedChanges,
            Self::Document(_) => Label::DocumentFailed,
        }
    }
}
