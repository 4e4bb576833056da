use dora_forms_types::{Answers, FormData, Observations, QuestionId, Rating};

/// Working copy of a form's answers and observations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    answers: Answers,
    observations: Observations,
}

impl EditBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the buffer contents with a copy of the form's maps.
    pub fn seed_from(&mut self, form: &FormData) {
        self.answers = form.answers.clone();
        self.observations = form.observations.clone();
    }

    pub fn clear(&mut self) {
        self.answers.clear();
        self.observations.clear();
    }

    pub fn set_answer(&mut self, question: QuestionId, value: Rating) {
        self.answers.insert(question, value);
    }

    pub fn set_observation(&mut self, question: QuestionId, text: String) {
        self.observations.insert(question, text);
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn observations(&self) -> &Observations {
        &self.observations
    }

    /// Build a replacement record: identity from `form`, contents from the buffer.
    pub fn to_form(&self, form: &FormData) -> FormData {
        FormData {
            date: form.date.clone(),
            answers: self.answers.clone(),
            observations: self.observations.clone(),
        }
    }

    /// Whether the buffer differs from the given form.
    pub fn differs_from(&self, form: &FormData) -> bool {
        self.answers != form.answers || self.observations != form.observations
    }
}
