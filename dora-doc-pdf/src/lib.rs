//! PDF backend for dora-forms: generates the report of a saved questionnaire.
//!
//! The report is a PDF 1.4 document using the standard Helvetica fonts: a
//! localized title, the form date, the chart image with its category
//! averages, then one section per category with each question, its answer
//! and its observation.

mod layout;
mod report;
mod text;
mod writer;

use dora_forms_types::{Document, DocumentGenerator, DocumentRequest, PDF_MEDIA_TYPE};
use thiserror::Error;

/// Error type for PDF generation.
#[derive(Debug, Error)]
pub enum PdfError {
    /// The chart image is not a `data:image/png;base64,` URL.
    #[error("Chart image is not a PNG data URL")]
    InvalidDataUrl,

    /// The data URL payload is not valid base64.
    #[error("Chart image is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The payload is not a decodable PNG.
    #[error("Chart image could not be decoded: {0}")]
    Image(#[from] image::ImageError),

    /// Stream compression failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Page geometry and output options, in PDF points.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfOptions {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    /// Flate-compress content and image streams.
    pub compress: bool,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self::a4()
    }
}

impl PdfOptions {
    /// A4 portrait with 50pt margins.
    pub fn a4() -> Self {
        Self {
            page_width: 595.0,
            page_height: 842.0,
            margin: 50.0,
            compress: true,
        }
    }

    /// Enable or disable stream compression.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

/// Document generator producing PDF reports.
#[derive(Debug, Clone, Default)]
pub struct PdfGenerator {
    options: PdfOptions,
}

impl PdfGenerator {
    /// Create a generator with A4 pages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom page options.
    pub fn with_options(mut self, options: PdfOptions) -> Self {
        self.options = options;
        self
    }
}

/// Generate the PDF bytes of a report.
pub fn to_pdf(request: &DocumentRequest<'_>, options: &PdfOptions) -> Result<Vec<u8>, PdfError> {
    let chart = report::decode_chart_image(request.chart_image)?;
    let pages = report::layout_report(request, &chart, options);
    report::write_pdf(&pages, &chart, options)
}

impl DocumentGenerator for PdfGenerator {
    type Error = PdfError;

    fn generate(&self, request: &DocumentRequest<'_>) -> Result<Document, Self::Error> {
        let bytes = to_pdf(request, &self.options)?;
        tracing::info!(
            date = %request.form.date,
            language = %request.language,
            size = bytes.len(),
            "generated PDF report"
        );
        Ok(Document::new(PDF_MEDIA_TYPE, bytes))
    }
}
