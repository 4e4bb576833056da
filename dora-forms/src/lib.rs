//! # dora-forms
//!
//! The saved-forms view of the DORA questionnaire: list previously submitted
//! responses, select one, edit and save it, chart its answers and export it as
//! a PDF report. Front-end agnostic.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dora_forms::{ExportOptions, Language, SavedForms, SavedFormsProps};
//! use dora_forms_chart::BarChartCanvas;
//! use dora_doc_pdf::PdfGenerator;
//!
//! let props = SavedFormsProps::new(forms, questions, categories, Language::Es);
//! let mut view = SavedForms::new(props, store, BarChartCanvas::new(800, 400), PdfGenerator::new())
//!     .with_export_options(ExportOptions::new().with_directory("reports"));
//!
//! view.select_form(0)?;
//! view.toggle_edit()?;
//! view.set_answer(QuestionId::new(1), 5)?;
//! view.commit_changes()?;
//!
//! view.render_chart();
//! let path = view.export_pdf()?;
//! ```
//!
//! ## Collaborators
//!
//! - `FormDelegate` - the parent that owns the forms (`on_update_form`, `on_delete_form`)
//! - `ChartSurface` - a chart that can be rendered and captured as an image
//! - `DocumentGenerator` - builds the report handed to the export pipeline
//!
//! Front ends are separate crates:
//! - `dora-forms-ratatui` - terminal UI

// Re-export all types from dora-forms-types
pub use dora_forms_types::*;

mod edit_buffer;
pub use edit_buffer::EditBuffer;

mod view;
pub use view::{DEFAULT_EXPORT_FILE_NAME, ExportOptions, SavedForms, SavedFormsProps};

// Delegate for driving the view without a real parent
mod recording_delegate;
pub use recording_delegate::{DelegateCall, RecordingDelegate};
