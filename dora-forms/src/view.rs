//! The saved-forms view controller.
//!
//! Holds the selection, the edit buffer and the edit-mode flag, mirrors them to
//! whatever front end draws the view, and drives the export pipeline.

use std::collections::BTreeMap;
use std::path::PathBuf;

use dora_forms_types::{
    Answers, Category, ChartData, ChartSurface, DocumentGenerator, DocumentRequest, FormData,
    FormDelegate, Language, Observations, Question, QuestionId, Rating, SavedFormsError,
};
use tracing::{debug, info, warn};

use crate::EditBuffer;

/// File name the export pipeline saves reports under.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "informe_dora.pdf";

static NO_ANSWERS: Answers = BTreeMap::new();
static NO_OBSERVATIONS: Observations = BTreeMap::new();

/// Data supplied by the parent.
#[derive(Debug, Clone, Default)]
pub struct SavedFormsProps {
    pub forms: Vec<FormData>,
    pub questions: Vec<Question>,
    pub categories: Vec<Category>,
    pub language: Language,
}

impl SavedFormsProps {
    pub fn new(
        forms: Vec<FormData>,
        questions: Vec<Question>,
        categories: Vec<Category>,
        language: Language,
    ) -> Self {
        Self {
            forms,
            questions,
            categories,
            language,
        }
    }
}

/// Where exported reports are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Directory the report is saved into.
    pub directory: PathBuf,
    /// File name of the report.
    pub file_name: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportOptions {
    /// Export into the current directory under the default file name.
    pub fn new() -> Self {
        Self {
            directory: PathBuf::from("."),
            file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }

    /// Set the target directory.
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    /// Set the file name.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Full path of the report.
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}

/// The saved-forms view.
///
/// `D` is the parent receiving update/delete requests, `C` the chart surface
/// and `G` the document generator used by [`SavedForms::export_pdf`].
pub struct SavedForms<D, C, G> {
    forms: Vec<FormData>,
    questions: Vec<Question>,
    categories: Vec<Category>,
    language: Language,
    delegate: D,
    chart: C,
    generator: G,
    selected: Option<usize>,
    buffer: EditBuffer,
    editing: bool,
    export: ExportOptions,
}

impl<D, C, G> SavedForms<D, C, G>
where
    D: FormDelegate,
    C: ChartSurface,
    G: DocumentGenerator,
{
    /// Create a view with nothing selected.
    pub fn new(props: SavedFormsProps, delegate: D, chart: C, generator: G) -> Self {
        Self {
            forms: props.forms,
            questions: props.questions,
            categories: props.categories,
            language: props.language,
            delegate,
            chart,
            generator,
            selected: None,
            buffer: EditBuffer::new(),
            editing: false,
            export: ExportOptions::new(),
        }
    }

    /// Set where exported reports are written.
    pub fn with_export_options(mut self, export: ExportOptions) -> Self {
        self.export = export;
        self
    }

    // === Accessors ===

    pub fn forms(&self) -> &[FormData] {
        &self.forms
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// The canonical stored form currently selected.
    pub fn selected_form(&self) -> Option<&FormData> {
        self.selected.and_then(|i| self.forms.get(i))
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn edit_buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    /// Whether the buffer holds values that differ from the selected form.
    pub fn has_unsaved_changes(&self) -> bool {
        self.selected_form().is_some_and(|form| self.buffer.differs_from(form))
    }

    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    pub fn delegate_mut(&mut self) -> &mut D {
        &mut self.delegate
    }

    pub fn chart(&self) -> &C {
        &self.chart
    }

    pub fn export_options(&self) -> &ExportOptions {
        &self.export
    }

    // === Props ===

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Replace the supplied forms, e.g. after the parent applied an update.
    ///
    /// The selection follows the selected form's date; it is cleared when that
    /// form is gone. Outside edit mode the buffer is re-seeded from the refreshed form.
    pub fn set_forms(&mut self, forms: Vec<FormData>) {
        let anchor = self.selected_form().map(|form| form.date.clone());
        self.forms = forms;

        let position =
            anchor.and_then(|date| self.forms.iter().position(|f| f.is_identified_by(&date)));
        self.selected = position;

        match position {
            Some(index) => {
                if !self.editing {
                    self.buffer.seed_from(&self.forms[index]);
                }
                debug!(index, "selection re-anchored after forms refresh");
            }
            None => {
                self.editing = false;
                self.buffer.clear();
            }
        }
    }

    // === Selection ===

    /// Select the form at `index`, seed the buffer from it and leave edit mode.
    pub fn select_form(&mut self, index: usize) -> Result<(), SavedFormsError> {
        let Some(form) = self.forms.get(index) else {
            warn!(index, len = self.forms.len(), "rejected out-of-range selection");
            return Err(SavedFormsError::InvalidSelection {
                index,
                len: self.forms.len(),
            });
        };

        self.buffer.seed_from(form);
        self.selected = Some(index);
        self.editing = false;
        debug!(index, date = %form.date, "selected form");
        Ok(())
    }

    // === Editing ===

    /// Flip edit mode. Returns the new mode.
    pub fn toggle_edit(&mut self) -> Result<bool, SavedFormsError> {
        self.require_selection()?;
        self.editing = !self.editing;
        debug!(editing = self.editing, "toggled edit mode");
        Ok(self.editing)
    }

    /// Insert or overwrite one answer in the edit buffer.
    pub fn set_answer(
        &mut self,
        question: QuestionId,
        value: Rating,
    ) -> Result<(), SavedFormsError> {
        self.require_selection()?;
        self.buffer.set_answer(question, value);
        Ok(())
    }

    /// Insert or overwrite one observation in the edit buffer.
    pub fn set_observation(
        &mut self,
        question: QuestionId,
        text: impl Into<String>,
    ) -> Result<(), SavedFormsError> {
        self.require_selection()?;
        self.buffer.set_observation(question, text.into());
        Ok(())
    }

    /// Send the selected form with the buffer contents to the parent and leave edit mode.
    ///
    /// The buffer is kept, so re-entering edit mode shows the values just saved.
    pub fn commit_changes(&mut self) -> Result<(), SavedFormsError> {
        let index = self.require_selection()?;
        let updated = self.buffer.to_form(&self.forms[index]);
        info!(date = %updated.date, "committing form changes");
        self.delegate.on_update_form(updated);
        self.editing = false;
        Ok(())
    }

    /// Throw away buffered edits and leave edit mode.
    pub fn discard_changes(&mut self) -> Result<(), SavedFormsError> {
        let index = self.require_selection()?;
        self.buffer.seed_from(&self.forms[index]);
        self.editing = false;
        debug!(index, "discarded buffered changes");
        Ok(())
    }

    /// Ask the parent to remove the form at `index`.
    ///
    /// Deleting the selected form clears the selection.
    pub fn delete_form(&mut self, index: usize) -> Result<(), SavedFormsError> {
        let Some(form) = self.forms.get(index) else {
            warn!(index, len = self.forms.len(), "rejected out-of-range delete");
            return Err(SavedFormsError::InvalidSelection {
                index,
                len: self.forms.len(),
            });
        };

        let date = form.date.clone();
        info!(%date, "deleting form");
        self.delegate.on_delete_form(&date);

        if self.selected == Some(index) {
            self.selected = None;
            self.editing = false;
            self.buffer.clear();
        }
        Ok(())
    }

    // === Display ===

    /// Answers to display: the buffer while editing, the stored form otherwise.
    pub fn displayed_answers(&self) -> &Answers {
        match (self.editing, self.selected_form()) {
            (true, Some(_)) => self.buffer.answers(),
            (false, Some(form)) => &form.answers,
            (_, None) => &NO_ANSWERS,
        }
    }

    /// Observations to display: the buffer while editing, the stored form otherwise.
    pub fn displayed_observations(&self) -> &Observations {
        match (self.editing, self.selected_form()) {
            (true, Some(_)) => self.buffer.observations(),
            (false, Some(form)) => &form.observations,
            (_, None) => &NO_OBSERVATIONS,
        }
    }

    pub fn displayed_answer(&self, question: QuestionId) -> Option<Rating> {
        self.displayed_answers().get(&question).copied()
    }

    pub fn displayed_observation(&self, question: QuestionId) -> Option<&str> {
        self.displayed_observations().get(&question).map(String::as_str)
    }

    /// Bar chart data for the displayed answers.
    pub fn chart_data(&self) -> ChartData {
        if self.selected.is_none() {
            return ChartData::empty();
        }
        ChartData::from_answers(
            self.displayed_answers(),
            &self.questions,
            &self.categories,
            self.language,
        )
    }

    /// Run a render pass of the chart surface with the current chart data.
    pub fn render_chart(&mut self) {
        let data = self.chart_data();
        self.chart.draw(&data);
    }

    // === Export ===

    /// Capture the chart, build the report of the selected form and save it.
    ///
    /// Refused while edit mode holds unsaved changes, since the chart would
    /// then show values the report does not contain.
    ///
    /// Returns the path the report was written to.
    pub fn export_pdf(&self) -> Result<PathBuf, SavedFormsError> {
        let index = self.require_selection()?;
        if !self.chart.is_rendered() {
            warn!("export requested before the chart was rendered");
            return Err(SavedFormsError::ChartNotReady);
        }
        // The surface shows the buffer while editing; the report uses the stored form
        if self.editing && self.has_unsaved_changes() {
            warn!("export requested with unsaved edits");
            return Err(SavedFormsError::UnsavedChanges);
        }

        let chart_image = self
            .chart
            .to_base64_image()
            .map_err(SavedFormsError::document)?;

        let form = &self.forms[index];
        let request = DocumentRequest {
            form,
            questions: &self.questions,
            categories: &self.categories,
            language: self.language,
            chart_image: &chart_image,
        };
        let document = self
            .generator
            .generate(&request)
            .map_err(SavedFormsError::document)?;

        let path = self.export.path();
        document.save(&path).map_err(SavedFormsError::document)?;
        info!(date = %form.date, path = %path.display(), "exported report");
        Ok(path)
    }

    fn require_selection(&self) -> Result<usize, SavedFormsError> {
        match self.selected {
            Some(index) if index < self.forms.len() => Ok(index),
            _ => Err(SavedFormsError::NoSelection),
        }
    }
}
