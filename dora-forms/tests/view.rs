//! Integration tests for the saved-forms view

use std::cell::Cell;
use std::rc::Rc;

use dora_forms::{
    Category, ChartData, ChartSurface, DelegateCall, Document, DocumentGenerator, DocumentRequest,
    ExportOptions, FormData, FormSource, Language, Localized, PDF_MEDIA_TYPE, Question, QuestionId,
    RecordingDelegate, SavedForms, SavedFormsError, SavedFormsProps,
};
use pretty_assertions::assert_eq;

/// Chart that records its last draw and hands out a fixed image.
#[derive(Default)]
struct StubChart {
    last: Option<ChartData>,
}

impl ChartSurface for StubChart {
    type Error = anyhow::Error;

    fn draw(&mut self, data: &ChartData) {
        self.last = Some(data.clone());
    }

    fn is_rendered(&self) -> bool {
        self.last.is_some()
    }

    fn to_base64_image(&self) -> Result<String, Self::Error> {
        Ok("data:image/png;base64,AAAA".to_string())
    }
}

/// Generator that counts invocations and echoes the request into the document.
#[derive(Clone, Default)]
struct StubGenerator {
    calls: Rc<Cell<usize>>,
    fail: bool,
}

impl DocumentGenerator for StubGenerator {
    type Error = anyhow::Error;

    fn generate(&self, request: &DocumentRequest<'_>) -> Result<Document, Self::Error> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            anyhow::bail!("encoding failed");
        }
        let body = format!(
            "{}|{}|{}",
            request.form.date, request.language, request.chart_image
        );
        Ok(Document::new(PDF_MEDIA_TYPE, body.into_bytes()))
    }
}

type View = SavedForms<RecordingDelegate, StubChart, StubGenerator>;

fn catalog() -> (Vec<Question>, Vec<Category>) {
    let questions = vec![
        Question::new(1, 1, Localized::new("¿Frecuencia?", "Frequência?")),
        Question::new(2, 1, Localized::new("¿Tiempo?", "Tempo?")),
        Question::new(3, 2, Localized::new("¿Fallos?", "Falhas?")),
    ];
    let categories = vec![
        Category::new(1, Localized::new("Rendimiento", "Desempenho")),
        Category::new(2, Localized::new("Estabilidad", "Estabilidade")),
    ];
    (questions, categories)
}

fn forms() -> Vec<FormData> {
    vec![
        FormData::new("2024-01-01")
            .with_answer(1, 3)
            .with_observation(1, "ok"),
        FormData::new("2024-02-01")
            .with_answer(1, 1)
            .with_answer(3, 4)
            .with_observation(3, "caídas"),
    ]
}

fn view_with(forms: Vec<FormData>, generator: StubGenerator) -> View {
    let (questions, categories) = catalog();
    let delegate = RecordingDelegate::new().with_forms(forms.clone());
    let props = SavedFormsProps::new(forms, questions, categories, Language::Es);
    SavedForms::new(props, delegate, StubChart::default(), generator)
}

fn view() -> View {
    view_with(forms(), StubGenerator::default())
}

#[test]
fn select_seeds_buffer_and_clears_edit_mode() {
    let mut view = view();
    view.select_form(0).unwrap();
    view.toggle_edit().unwrap();
    assert!(view.is_editing());

    view.select_form(1).unwrap();

    let expected = &forms()[1];
    assert_eq!(view.selected_index(), Some(1));
    assert_eq!(view.edit_buffer().answers(), &expected.answers);
    assert_eq!(view.edit_buffer().observations(), &expected.observations);
    assert!(!view.is_editing());
}

#[test]
fn select_out_of_range_is_rejected() {
    let mut view = view();
    view.select_form(0).unwrap();

    let err = view.select_form(5).unwrap_err();

    assert!(matches!(
        err,
        SavedFormsError::InvalidSelection { index: 5, len: 2 }
    ));
    assert_eq!(view.selected_index(), Some(0));
}

#[test]
fn toggle_twice_restores_mode_and_keeps_buffer() {
    let mut view = view();
    view.select_form(0).unwrap();
    view.set_answer(QuestionId::new(2), 4).unwrap();
    let before = view.edit_buffer().clone();

    assert!(view.toggle_edit().unwrap());
    assert!(!view.toggle_edit().unwrap());

    assert!(!view.is_editing());
    assert_eq!(view.edit_buffer(), &before);
}

#[test]
fn toggle_without_selection_is_rejected() {
    let mut view = view();
    assert!(matches!(
        view.toggle_edit(),
        Err(SavedFormsError::NoSelection)
    ));
    assert!(!view.is_editing());
}

#[test]
fn setters_touch_only_their_key() {
    let mut view = view();
    view.select_form(1).unwrap();

    view.set_answer(QuestionId::new(3), 2).unwrap();
    view.set_observation(QuestionId::new(1), "nuevo").unwrap();

    let buffer = view.edit_buffer();
    assert_eq!(buffer.answers()[&QuestionId::new(1)], 1);
    assert_eq!(buffer.answers()[&QuestionId::new(3)], 2);
    assert_eq!(buffer.observations()[&QuestionId::new(3)], "caídas");
    assert_eq!(buffer.observations()[&QuestionId::new(1)], "nuevo");
    assert_eq!(buffer.answers().len(), 2);
}

#[test]
fn commit_without_selection_does_not_call_delegate() {
    let mut view = view();

    assert!(matches!(
        view.commit_changes(),
        Err(SavedFormsError::NoSelection)
    ));
    assert!(view.delegate().calls().is_empty());
}

#[test]
fn commit_sends_buffer_once_and_keeps_it() {
    let mut view = view();
    view.select_form(0).unwrap();
    view.toggle_edit().unwrap();
    view.set_answer(QuestionId::new(1), 5).unwrap();

    view.commit_changes().unwrap();

    assert_eq!(
        view.delegate().calls(),
        &[DelegateCall::Update(
            FormData::new("2024-01-01")
                .with_answer(1, 5)
                .with_observation(1, "ok")
        )]
    );
    assert!(!view.is_editing());
    assert_eq!(view.edit_buffer().answers()[&QuestionId::new(1)], 5);
}

#[test]
fn scenario_select_set_answer_commit() {
    let forms = vec![
        FormData::new("2024-01-01")
            .with_answer(1, 3)
            .with_observation(1, "ok"),
    ];
    let mut view = view_with(forms, StubGenerator::default());

    view.select_form(0).unwrap();
    view.set_answer(QuestionId::new(1), 5).unwrap();
    view.commit_changes().unwrap();

    let updates = view.delegate().updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(
        updates[0],
        &FormData::new("2024-01-01")
            .with_answer(1, 5)
            .with_observation(1, "ok")
    );
}

#[test]
fn displayed_values_follow_edit_mode() {
    let mut view = view();
    view.select_form(0).unwrap();
    view.toggle_edit().unwrap();
    view.set_answer(QuestionId::new(1), 1).unwrap();
    assert_eq!(view.displayed_answer(QuestionId::new(1)), Some(1));

    view.toggle_edit().unwrap();

    assert_eq!(view.displayed_answer(QuestionId::new(1)), Some(3));
    assert_eq!(view.displayed_observation(QuestionId::new(1)), Some("ok"));
    assert!(view.has_unsaved_changes());
}

#[test]
fn discard_reseeds_buffer() {
    let mut view = view();
    view.select_form(0).unwrap();
    view.toggle_edit().unwrap();
    view.set_answer(QuestionId::new(1), 1).unwrap();

    view.discard_changes().unwrap();

    assert!(!view.is_editing());
    assert!(!view.has_unsaved_changes());
    assert!(view.delegate().calls().is_empty());
}

#[test]
fn refresh_reanchors_selection_by_date() {
    let mut view = view();
    view.select_form(1).unwrap();
    view.set_answer(QuestionId::new(1), 5).unwrap();
    view.commit_changes().unwrap();

    let mut refreshed = view.delegate().forms();
    refreshed.reverse();
    view.set_forms(refreshed);

    assert_eq!(view.selected_index(), Some(0));
    assert_eq!(view.selected_form().unwrap().date, "2024-02-01");
    assert_eq!(view.displayed_answer(QuestionId::new(1)), Some(5));
}

#[test]
fn refresh_while_editing_keeps_buffer() {
    let mut view = view();
    view.select_form(0).unwrap();
    view.toggle_edit().unwrap();
    view.set_answer(QuestionId::new(1), 5).unwrap();
    view.set_observation(QuestionId::new(1), "en curso").unwrap();

    let mut refreshed = forms();
    refreshed[0] = FormData::new("2024-01-01").with_answer(1, 2);
    view.set_forms(refreshed);

    assert!(view.is_editing());
    assert_eq!(view.selected_index(), Some(0));
    assert_eq!(view.displayed_answer(QuestionId::new(1)), Some(5));
    assert_eq!(view.displayed_observation(QuestionId::new(1)), Some("en curso"));
    assert_eq!(view.selected_form().unwrap().answer(QuestionId::new(1)), Some(2));
}

#[test]
fn deleting_earlier_form_shifts_selection() {
    let mut view = view();
    view.select_form(1).unwrap();

    view.delete_form(0).unwrap();
    assert_eq!(view.selected_index(), Some(1));

    let remaining = view.delegate().forms();
    view.set_forms(remaining);

    assert_eq!(view.forms().len(), 1);
    assert_eq!(view.selected_index(), Some(0));
    assert_eq!(view.selected_form().unwrap().date, "2024-02-01");
    assert_eq!(view.edit_buffer().answers(), &forms()[1].answers);
}

#[test]
fn delete_selected_clears_selection() {
    let mut view = view();
    view.select_form(0).unwrap();

    view.delete_form(0).unwrap();

    assert_eq!(view.delegate().deletes(), vec!["2024-01-01"]);
    assert_eq!(view.selected_index(), None);

    let remaining = view.delegate().forms();
    view.set_forms(remaining);
    assert_eq!(view.forms().len(), 1);
    assert_eq!(view.selected_index(), None);
}

#[test]
fn delete_out_of_range_is_rejected() {
    let mut view = view();
    assert!(matches!(
        view.delete_form(9),
        Err(SavedFormsError::InvalidSelection { index: 9, len: 2 })
    ));
    assert!(view.delegate().calls().is_empty());
}

#[test]
fn chart_data_averages_displayed_answers() {
    let mut view = view();
    assert!(view.chart_data().is_empty());

    view.select_form(1).unwrap();
    view.set_language(Language::Pt);
    let data = view.chart_data();

    assert_eq!(data.bars.len(), 2);
    assert_eq!(data.bars[0].label, "Desempenho");
    assert_eq!(data.bars[0].value, 1.0);
    assert_eq!(data.bars[1].value, 4.0);
}

#[test]
fn export_before_render_does_not_generate() {
    let generator = StubGenerator::default();
    let mut view = view_with(forms(), generator.clone());
    view.select_form(0).unwrap();

    assert!(matches!(
        view.export_pdf(),
        Err(SavedFormsError::ChartNotReady)
    ));
    assert_eq!(generator.calls.get(), 0);
}

#[test]
fn export_with_unsaved_edits_is_refused() {
    let generator = StubGenerator::default();
    let mut view = view_with(forms(), generator.clone());
    view.select_form(0).unwrap();
    view.toggle_edit().unwrap();
    view.set_answer(QuestionId::new(1), 5).unwrap();
    view.render_chart();

    assert!(matches!(
        view.export_pdf(),
        Err(SavedFormsError::UnsavedChanges)
    ));
    assert_eq!(generator.calls.get(), 0);
    assert_eq!(
        SavedFormsError::UnsavedChanges.label().text(Language::Pt),
        "Salve ou descarte as alterações antes de gerar o PDF"
    );
}

#[test]
fn export_after_discard_matches_stored_form() {
    let dir = tempfile::tempdir().unwrap();
    let generator = StubGenerator::default();
    let mut view = view_with(forms(), generator.clone())
        .with_export_options(ExportOptions::new().with_directory(dir.path()));
    view.select_form(0).unwrap();
    view.toggle_edit().unwrap();
    view.set_answer(QuestionId::new(1), 5).unwrap();
    view.render_chart();
    view.discard_changes().unwrap();
    view.render_chart();

    assert_eq!(view.chart().last.as_ref().unwrap().bars[0].value, 3.0);
    view.export_pdf().unwrap();
    assert_eq!(generator.calls.get(), 1);
}

#[test]
fn export_while_editing_without_changes_is_allowed() {
    let dir = tempfile::tempdir().unwrap();
    let generator = StubGenerator::default();
    let mut view = view_with(forms(), generator.clone())
        .with_export_options(ExportOptions::new().with_directory(dir.path()));
    view.select_form(0).unwrap();
    view.toggle_edit().unwrap();
    view.render_chart();

    view.export_pdf().unwrap();
    assert_eq!(generator.calls.get(), 1);
}

#[test]
fn export_without_selection_does_not_generate() {
    let generator = StubGenerator::default();
    let mut view = view_with(forms(), generator.clone());
    view.render_chart();

    assert!(matches!(
        view.export_pdf(),
        Err(SavedFormsError::NoSelection)
    ));
    assert_eq!(generator.calls.get(), 0);
}

#[test]
fn export_saves_document_under_fixed_name() {
    let dir = tempfile::tempdir().unwrap();
    let generator = StubGenerator::default();
    let mut view = view_with(forms(), generator.clone())
        .with_export_options(ExportOptions::new().with_directory(dir.path()));
    view.select_form(1).unwrap();
    view.render_chart();

    let path = view.export_pdf().unwrap();

    assert_eq!(path, dir.path().join("informe_dora.pdf"));
    assert_eq!(generator.calls.get(), 1);
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, "2024-02-01|es|data:image/png;base64,AAAA");
}

#[test]
fn generator_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let generator = StubGenerator {
        fail: true,
        ..StubGenerator::default()
    };
    let mut view = view_with(forms(), generator)
        .with_export_options(ExportOptions::new().with_directory(dir.path()));
    view.select_form(0).unwrap();
    view.render_chart();

    let err = view.export_pdf().unwrap_err();

    assert!(matches!(err, SavedFormsError::Document(_)));
    assert_eq!(err.to_string(), "Document error: encoding failed");
    assert!(!dir.path().join("informe_dora.pdf").exists());
}
