use crate::{ChartData, Document, DocumentRequest, FormData};

/// Trait for the parent that owns the saved forms.
///
/// The view never mutates the parent's forms; it requests replacement and
/// removal through these callbacks.
pub trait FormDelegate {
    /// Replace the stored form that has the same date as `form`.
    fn on_update_form(&mut self, form: FormData);

    /// Remove the stored form identified by `date`.
    fn on_delete_form(&mut self, date: &str);
}

/// A parent that can hand its current forms back to the view.
///
/// Front ends use this after an update or delete to refresh the view's copy.
pub trait FormSource {
    fn forms(&self) -> Vec<FormData>;
}

/// Trait for a chart that can be rendered and captured as an image.
pub trait ChartSurface {
    /// The error type for this chart.
    type Error: Into<anyhow::Error>;

    /// Render a pass with the given data.
    fn draw(&mut self, data: &ChartData);

    /// Whether at least one render pass has completed.
    fn is_rendered(&self) -> bool;

    /// Capture the last rendered pass as a `data:image/png;base64,...` URL.
    fn to_base64_image(&self) -> Result<String, Self::Error>;
}

/// Trait for document builders used by the export pipeline.
pub trait DocumentGenerator {
    /// The error type for this generator.
    type Error: Into<anyhow::Error>;

    /// Build a report for the requested form.
    fn generate(&self, request: &DocumentRequest<'_>) -> Result<Document, Self::Error>;
}
