use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::QuestionId;

/// A selected numeric answer. The scale is owned by the parent and not validated here.
pub type Rating = u8;

/// Answers of one form, keyed by question.
pub type Answers = BTreeMap<QuestionId, Rating>;

/// Free-text observations of one form, keyed by question.
pub type Observations = BTreeMap<QuestionId, String>;

/// One submitted questionnaire.
///
/// The `date` doubles as the identity of the form: updates replace the form
/// with the same date and deletes are requested by date.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormData {
    pub date: String,
    #[serde(default)]
    pub answers: Answers,
    #[serde(default)]
    pub observations: Observations,
}

impl FormData {
    /// Create an empty form for the given date.
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            answers: Answers::new(),
            observations: Observations::new(),
        }
    }

    /// Set an answer, builder style.
    pub fn with_answer(mut self, question: u32, value: Rating) -> Self {
        self.answers.insert(QuestionId::new(question), value);
        self
    }

    /// Set an observation, builder style.
    pub fn with_observation(mut self, question: u32, text: impl Into<String>) -> Self {
        self.observations.insert(QuestionId::new(question), text.into());
        self
    }

    /// Get the answer for a question.
    pub fn answer(&self, question: QuestionId) -> Option<Rating> {
        self.answers.get(&question).copied()
    }

    /// Get the observation for a question.
    pub fn observation(&self, question: QuestionId) -> Option<&str> {
        self.observations.get(&question).map(String::as_str)
    }

    /// Check whether this form has the given identity.
    pub fn is_identified_by(&self, date: &str) -> bool {
        self.date == date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builder_and_accessors() {
        let form = FormData::new("2024-01-01")
            .with_answer(1, 3)
            .with_observation(1, "ok");

        assert_eq!(form.answer(QuestionId::new(1)), Some(3));
        assert_eq!(form.observation(QuestionId::new(1)), Some("ok"));
        assert_eq!(form.answer(QuestionId::new(2)), None);
        assert!(form.is_identified_by("2024-01-01"));
    }

    #[test]
    fn json_uses_string_keys() {
        let form = FormData::new("2024-01-01")
            .with_answer(1, 3)
            .with_observation(1, "ok");

        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "date": "2024-01-01",
                "answers": { "1": 3 },
                "observations": { "1": "ok" }
            })
        );

        let back: FormData = serde_json::from_value(json).unwrap();
        assert_eq!(back, form);
    }

    #[test]
    fn missing_maps_default_to_empty() {
        let form: FormData = serde_json::from_str(r#"{"date":"2024-02-02"}"#).unwrap();
        assert!(form.answers.is_empty());
        assert!(form.observations.is_empty());
    }
}
