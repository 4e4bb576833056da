use std::fs;
use std::io;
use std::path::Path;

use crate::{Category, FormData, Language, Question};

/// Media type of documents produced by the PDF generator.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Prefix of the chart image URLs passed to document generators.
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Everything a document generator needs to build a report.
#[derive(Debug, Clone, Copy)]
pub struct DocumentRequest<'a> {
    pub form: &'a FormData,
    pub questions: &'a [Question],
    pub categories: &'a [Category],
    pub language: Language,
    /// The rendered chart as a `data:image/png;base64,...` URL.
    pub chart_image: &'a str,
}

/// A generated, saveable document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    media_type: &'static str,
    bytes: Vec<u8>,
}

impl Document {
    pub fn new(media_type: &'static str, bytes: Vec<u8>) -> Self {
        Self { media_type, bytes }
    }

    pub fn media_type(&self) -> &'static str {
        self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Write the document to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, &self.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_writes_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("informe_dora.pdf");

        let doc = Document::new(PDF_MEDIA_TYPE, b"%PDF-1.4".to_vec());
        doc.save(&path).unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.4");
        assert_eq!(doc.media_type(), "application/pdf");
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("informe_dora.pdf");

        let doc = Document::new(PDF_MEDIA_TYPE, Vec::new());
        assert!(doc.save(&path).is_err());
    }
}
