//! Interaction state of the terminal front end and its key handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use dora_forms::{
    ChartSurface, DocumentGenerator, FormDelegate, FormSource, Label, Language, Question,
    QuestionId, SavedForms, SavedFormsError,
};
use tracing::warn;

/// Which pane receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    List,
    Detail,
}

/// Modal input state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Mode {
    Normal,
    /// Typing the observation of `question`.
    EditingObservation {
        question: QuestionId,
        text: String,
        cursor: usize,
    },
    ConfirmDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusKind {
    Info,
    Error,
}

/// Message shown in the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Status {
    pub(crate) text: String,
    pub(crate) kind: StatusKind,
}

/// State of the terminal UI that is not part of the view itself.
#[derive(Debug, Clone)]
pub(crate) struct UiState {
    pub(crate) focus: Focus,
    pub(crate) mode: Mode,
    pub(crate) list_cursor: usize,
    pub(crate) question_cursor: usize,
    pub(crate) status: Option<Status>,
    pub(crate) quit: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            focus: Focus::List,
            mode: Mode::Normal,
            list_cursor: 0,
            question_cursor: 0,
            status: None,
            quit: false,
        }
    }
}

/// Questions in display order: grouped by category, categories in catalog order.
pub(crate) fn ordered_questions<D, C, G>(view: &SavedForms<D, C, G>) -> Vec<&Question>
where
    D: FormDelegate,
    C: ChartSurface,
    G: DocumentGenerator,
{
    view.categories()
        .iter()
        .flat_map(|category| category.questions(view.questions()))
        .collect()
}

impl UiState {
    fn info(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            text: text.into(),
            kind: StatusKind::Info,
        });
    }

    fn error(&mut self, err: &SavedFormsError, language: Language) {
        warn!(error = %err, "operation rejected");
        self.status = Some(Status {
            text: err.label().text(language).to_string(),
            kind: StatusKind::Error,
        });
    }

    fn focused_question<D, C, G>(&self, view: &SavedForms<D, C, G>) -> Option<QuestionId>
    where
        D: FormDelegate,
        C: ChartSurface,
        G: DocumentGenerator,
    {
        ordered_questions(view).get(self.question_cursor).map(|q| q.id)
    }

    /// Pull the parent's forms back into the view after an update or delete.
    fn refresh<D, C, G>(&mut self, view: &mut SavedForms<D, C, G>)
    where
        D: FormDelegate + FormSource,
        C: ChartSurface,
        G: DocumentGenerator,
    {
        let forms = view.delegate().forms();
        view.set_forms(forms);
        self.list_cursor = match view.selected_index() {
            Some(index) => index,
            None => self.list_cursor.min(view.forms().len().saturating_sub(1)),
        };
    }

    /// Apply one key press to the view and the UI state.
    pub(crate) fn handle_key<D, C, G>(&mut self, view: &mut SavedForms<D, C, G>, key: KeyEvent)
    where
        D: FormDelegate + FormSource,
        C: ChartSurface,
        G: DocumentGenerator,
    {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return;
        }

        match std::mem::replace(&mut self.mode, Mode::Normal) {
            Mode::ConfirmDelete => self.handle_confirm(view, key),
            Mode::EditingObservation {
                question,
                text,
                cursor,
            } => self.handle_observation_input(view, key, question, text, cursor),
            Mode::Normal => self.handle_normal(view, key),
        }
    }

    fn handle_confirm<D, C, G>(&mut self, view: &mut SavedForms<D, C, G>, key: KeyEvent)
    where
        D: FormDelegate + FormSource,
        C: ChartSurface,
        G: DocumentGenerator,
    {
        let language = view.language();
        match key.code {
            KeyCode::Char('s' | 'S' | 'y' | 'Y') => {
                let Some(index) = view.selected_index() else {
                    self.error(&SavedFormsError::NoSelection, language);
                    return;
                };
                match view.delete_form(index) {
                    Ok(()) => {
                        self.refresh(view);
                        self.focus = Focus::List;
                        self.info(Label::FormDeleted.text(language));
                    }
                    Err(err) => self.error(&err, language),
                }
            }
            KeyCode::Char('n' | 'N') | KeyCode::Esc => self.status = None,
            _ => self.mode = Mode::ConfirmDelete,
        }
    }

    fn handle_observation_input<D, C, G>(
        &mut self,
        view: &mut SavedForms<D, C, G>,
        key: KeyEvent,
        question: QuestionId,
        mut text: String,
        mut cursor: usize,
    ) where
        D: FormDelegate + FormSource,
        C: ChartSurface,
        G: DocumentGenerator,
    {
        match key.code {
            KeyCode::Enter => {
                if let Err(err) = view.set_observation(question, text) {
                    self.error(&err, view.language());
                }
                return;
            }
            KeyCode::Esc => return,
            KeyCode::Char(c) => {
                let at = byte_index(&text, cursor);
                text.insert(at, c);
                cursor += 1;
            }
            KeyCode::Backspace if cursor > 0 => {
                cursor -= 1;
                let at = byte_index(&text, cursor);
                text.remove(at);
            }
            KeyCode::Delete if cursor < text.chars().count() => {
                let at = byte_index(&text, cursor);
                text.remove(at);
            }
            KeyCode::Left => cursor = cursor.saturating_sub(1),
            KeyCode::Right => cursor = (cursor + 1).min(text.chars().count()),
            KeyCode::Home => cursor = 0,
            KeyCode::End => cursor = text.chars().count(),
            _ => {}
        }
        self.mode = Mode::EditingObservation {
            question,
            text,
            cursor,
        };
    }

    fn handle_normal<D, C, G>(&mut self, view: &mut SavedForms<D, C, G>, key: KeyEvent)
    where
        D: FormDelegate + FormSource,
        C: ChartSurface,
        G: DocumentGenerator,
    {
        let language = view.language();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::List => Focus::Detail,
                    Focus::Detail => Focus::List,
                };
            }
            KeyCode::Up => match self.focus {
                Focus::List => self.list_cursor = self.list_cursor.saturating_sub(1),
                Focus::Detail => self.question_cursor = self.question_cursor.saturating_sub(1),
            },
            KeyCode::Down => match self.focus {
                Focus::List => {
                    let last = view.forms().len().saturating_sub(1);
                    self.list_cursor = (self.list_cursor + 1).min(last);
                }
                Focus::Detail => {
                    let last = ordered_questions(view).len().saturating_sub(1);
                    self.question_cursor = (self.question_cursor + 1).min(last);
                }
            },
            KeyCode::Enter if self.focus == Focus::List => {
                match view.select_form(self.list_cursor) {
                    Ok(()) => {
                        self.focus = Focus::Detail;
                        self.question_cursor = 0;
                        self.status = None;
                    }
                    Err(err) => self.error(&err, language),
                }
            }
            KeyCode::Char('e') => match view.toggle_edit() {
                Ok(true) => {
                    self.focus = Focus::Detail;
                    self.info(Label::Editing.text(language));
                }
                Ok(false) => self.status = None,
                Err(err) => self.error(&err, language),
            },
            KeyCode::Char(c @ '0'..='9') if view.is_editing() => {
                let Some(question) = self.focused_question(view) else {
                    return;
                };
                let value = c as u8 - b'0';
                if let Err(err) = view.set_answer(question, value) {
                    self.error(&err, language);
                }
            }
            KeyCode::Char('o') if view.is_editing() => {
                if let Some(question) = self.focused_question(view) {
                    let text = view
                        .displayed_observation(question)
                        .unwrap_or_default()
                        .to_string();
                    let cursor = text.chars().count();
                    self.mode = Mode::EditingObservation {
                        question,
                        text,
                        cursor,
                    };
                }
            }
            KeyCode::Char('s') => match view.commit_changes() {
                Ok(()) => {
                    self.refresh(view);
                    self.info(Label::ChangesSaved.text(language));
                }
                Err(err) => self.error(&err, language),
            },
            KeyCode::Char('x') => match view.discard_changes() {
                Ok(()) => self.info(Label::ChangesDiscarded.text(language)),
                Err(err) => self.error(&err, language),
            },
            KeyCode::Char('p') => match view.export_pdf() {
                Ok(path) => self.info(format!(
                    "{} {}",
                    Label::PdfSaved.text(language),
                    path.display()
                )),
                Err(err) => self.error(&err, language),
            },
            KeyCode::Char('d') => {
                if view.selected_form().is_some() {
                    self.mode = Mode::ConfirmDelete;
                    self.info(Label::ConfirmDelete.text(language));
                } else {
                    self.error(&SavedFormsError::NoSelection, language);
                }
            }
            _ => {}
        }
    }
}

fn byte_index(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map_or(text.len(), |(i, _)| i)
}
