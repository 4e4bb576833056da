use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a catalog question, e.g. `QuestionId::new(3)`.
///
/// Used as the key of both the answer and the observation maps of a form.
/// Serializes as a bare number, so JSON maps keyed by it read as `{"3": 4}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(u32);

impl QuestionId {
    /// Create a question id from its number.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw number.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for QuestionId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl FromStr for QuestionId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}
