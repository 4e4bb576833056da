//! # dora-forms-ratatui
//!
//! Terminal front end for the saved-forms view.
//!
//! The screen lists the saved questionnaires by date next to the answers of
//! the selected one and a bar chart of its category averages. Keys select a
//! form, toggle edit mode, change answers and observations, save or discard,
//! delete after confirmation, and export the PDF report.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dora_forms::{SavedForms, SavedFormsProps};
//! use dora_forms_ratatui::SavedFormsTui;
//!
//! let mut view = SavedForms::new(props, store, chart, generator);
//! SavedFormsTui::new().run(&mut view)?;
//! ```

mod app;
mod draw;
mod state;

pub use app::{SavedFormsTui, Theme, TuiError};
