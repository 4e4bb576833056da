//! Parent application for the saved-forms view.
//!
//! Owns the questionnaire responses in a JSON file, supplies the question
//! catalog and wires the view to the raster chart, the PDF generator and the
//! terminal front end.

pub mod catalog;
pub mod config;
pub mod store;

pub use catalog::{Catalog, CatalogError};
pub use config::{AppConfig, ConfigError};
pub use store::{JsonFormStore, StoreError};
