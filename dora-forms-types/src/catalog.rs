use serde::{Deserialize, Serialize};

use crate::{Language, Localized, QuestionId};

/// Identifier of a question category.
pub type CategoryId = u32;

/// A catalog question. Immutable reference data supplied by the parent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub category: CategoryId,
    pub text: Localized,
}

impl Question {
    pub fn new(id: u32, category: CategoryId, text: Localized) -> Self {
        Self {
            id: QuestionId::new(id),
            category,
            text,
        }
    }

    /// The prompt in the given language.
    pub fn prompt(&self, language: Language) -> &str {
        self.text.get(language)
    }
}

/// A grouping of questions, used for chart labels and report sections.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: Localized,
}

impl Category {
    pub fn new(id: CategoryId, name: Localized) -> Self {
        Self { id, name }
    }

    /// The name in the given language.
    pub fn label(&self, language: Language) -> &str {
        self.name.get(language)
    }

    /// Questions of this category, in catalog order.
    pub fn questions<'a>(&self, questions: &'a [Question]) -> impl Iterator<Item = &'a Question> {
        let id = self.id;
        questions.iter().filter(move |q| q.category == id)
    }
}
