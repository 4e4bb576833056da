//! Core types for the dora-forms crates.
//!
//! This crate provides the foundational types for the saved-forms view:
//! - `FormData` - One submitted questionnaire (answers and observations)
//! - `Question` and `Category` - The immutable catalog supplied by the parent
//! - `Language`, `Localized` and `Label` - Bilingual (es/pt) presentation text
//! - `ChartData` - Per-category averages shown in the bar chart
//! - `FormDelegate`, `ChartSurface` and `DocumentGenerator` traits - The seams
//!   between the view and its parent, chart and document collaborators

mod question_id;
pub use question_id::QuestionId;

mod language;
pub use language::{Language, Localized, UnknownLanguage};

mod i18n;
pub use i18n::Label;

mod form_data;
pub use form_data::{Answers, FormData, Observations, Rating};

mod catalog;
pub use catalog::{Category, CategoryId, Question};

mod chart_data;
pub use chart_data::{ChartBar, ChartData, MIN_SCALE_MAX};

mod document;
pub use document::{Document, DocumentRequest, PDF_MEDIA_TYPE, PNG_DATA_URL_PREFIX};

mod error;
pub use error::SavedFormsError;

mod traits;
pub use traits::{ChartSurface, DocumentGenerator, FormDelegate, FormSource};
