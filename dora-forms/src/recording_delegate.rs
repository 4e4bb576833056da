//! Recording delegate for driving the view without a real parent.
//!
//! `RecordingDelegate` keeps its own list of forms, applies the update and
//! delete requests it receives, and records every call. This is useful for
//! testing front ends and the view itself.
//!
//! # Example
//!
//! ```rust,ignore
//! use dora_forms::{DelegateCall, FormData, RecordingDelegate};
//!
//! let delegate = RecordingDelegate::new()
//!     .with_form(FormData::new("2024-01-01").with_answer(1, 3));
//!
//! // ... hand it to a SavedForms view, select, edit, commit ...
//!
//! assert!(matches!(view.delegate().calls()[0], DelegateCall::Update(_)));
//! ```

use dora_forms_types::{FormData, FormDelegate, FormSource};

/// One callback received by a [`RecordingDelegate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelegateCall {
    Update(FormData),
    Delete(String),
}

/// A parent that stores forms in memory and records every callback.
#[derive(Debug, Clone, Default)]
pub struct RecordingDelegate {
    forms: Vec<FormData>,
    calls: Vec<DelegateCall>,
}

impl RecordingDelegate {
    /// Create an empty delegate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stored form.
    pub fn with_form(mut self, form: FormData) -> Self {
        self.forms.push(form);
        self
    }

    /// Add several stored forms.
    pub fn with_forms(mut self, forms: impl IntoIterator<Item = FormData>) -> Self {
        self.forms.extend(forms);
        self
    }

    /// All callbacks received so far, oldest first.
    pub fn calls(&self) -> &[DelegateCall] {
        &self.calls
    }

    /// Forms passed to `on_update_form`, oldest first.
    pub fn updates(&self) -> Vec<&FormData> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DelegateCall::Update(form) => Some(form),
                DelegateCall::Delete(_) => None,
            })
            .collect()
    }

    /// Dates passed to `on_delete_form`, oldest first.
    pub fn deletes(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DelegateCall::Delete(date) => Some(date.as_str()),
                DelegateCall::Update(_) => None,
            })
            .collect()
    }
}

impl FormDelegate for RecordingDelegate {
    fn on_update_form(&mut self, form: FormData) {
        if let Some(stored) = self.forms.iter_mut().find(|f| f.date == form.date) {
            *stored = form.clone();
        }
        self.calls.push(DelegateCall::Update(form));
    }

    fn on_delete_form(&mut self, date: &str) {
        self.forms.retain(|f| f.date != date);
        self.calls.push(DelegateCall::Delete(date.to_string()));
    }
}

impl FormSource for RecordingDelegate {
    fn forms(&self) -> Vec<FormData> {
        self.forms.clone()
    }
}
