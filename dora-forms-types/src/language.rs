use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Display language of the view. Every user-facing string exists in both.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Spanish.
    #[default]
    Es,
    /// Portuguese.
    Pt,
}

impl Language {
    /// The two-letter code, `"es"` or `"pt"`.
    pub fn code(self) -> &'static str {
        match self {
            Self::Es => "es",
            Self::Pt => "pt",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when parsing an unsupported language code.
#[derive(Debug, thiserror::Error)]
#[error("Unsupported language '{0}', expected 'es' or 'pt'")]
pub struct UnknownLanguage(String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "es" => Ok(Self::Es),
            "pt" => Ok(Self::Pt),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}

/// A piece of catalog text in both supported languages.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized {
    pub es: String,
    pub pt: String,
}

impl Localized {
    /// Create a localized text from its Spanish and Portuguese variants.
    pub fn new(es: impl Into<String>, pt: impl Into<String>) -> Self {
        Self {
            es: es.into(),
            pt: pt.into(),
        }
    }

    /// Get the variant for the given language.
    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::Es => &self.es,
            Language::Pt => &self.pt,
        }
    }
}
