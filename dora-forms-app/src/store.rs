//! JSON file store owning the saved forms.

use std::path::{Path, PathBuf};

use dora_forms::{FormData, FormDelegate, FormSource};
use thiserror::Error;
use tracing::{error, info, warn};

/// Error type for the form store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid forms file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Parent of the saved-forms view: keeps the forms in memory and writes them
/// back to a JSON file after every update or delete.
#[derive(Debug, Clone)]
pub struct JsonFormStore {
    path: PathBuf,
    forms: Vec<FormData>,
}

impl JsonFormStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let forms = match std::fs::read_to_string(&path) {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|source| StoreError::Json {
                    path: path.clone(),
                    source,
                })?
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no forms file yet, starting empty");
                Vec::new()
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        Ok(Self { path, forms })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write all forms to the file.
    pub fn save(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.forms).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!(path = %self.path.display(), forms = self.forms.len(), "saved forms file");
        Ok(())
    }

    fn persist(&self) {
        // The view's callbacks cannot fail, so a write error only gets logged
        if let Err(err) = self.save() {
            error!(error = %err, "failed to persist forms");
        }
    }
}

impl FormDelegate for JsonFormStore {
    fn on_update_form(&mut self, form: FormData) {
        match self.forms.iter_mut().find(|f| f.is_identified_by(&form.date)) {
            Some(stored) => *stored = form,
            None => {
                warn!(date = %form.date, "update for unknown form, appending it");
                self.forms.push(form);
            }
        }
        self.persist();
    }

    fn on_delete_form(&mut self, date: &str) {
        let before = self.forms.len();
        self.forms.retain(|f| !f.is_identified_by(date));
        if self.forms.len() == before {
            warn!(date, "delete for unknown form");
        }
        self.persist();
    }
}

impl FormSource for JsonFormStore {
    fn forms(&self) -> Vec<FormData> {
        self.forms.clone()
    }
}
