use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::{Domain, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text is missing")]
    MissingText,

    #[error("option {0} is missing")]
    MissingOption(ChoiceKey),

    #[error("correct answer is missing")]
    MissingCorrectKey,

    #[error("correct answer '{0}' is not one of A, B, C, D")]
    InvalidCorrectKey(String),
}

//
// ─── CHOICE KEY ────────────────────────────────────────────────────────────────
//

/// One of the four answer slots of a multiple-choice question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChoiceKey {
    A,
    B,
    C,
    D,
}

impl ChoiceKey {
    pub const ALL: [ChoiceKey; 4] = [ChoiceKey::A, ChoiceKey::B, ChoiceKey::C, ChoiceKey::D];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ChoiceKey::A => "A",
            ChoiceKey::B => "B",
            ChoiceKey::C => "C",
            ChoiceKey::D => "D",
        }
    }

    /// Parses a key the way question banks tend to write it: `b`, `B`, `B)`, ` B. `.
    #[must_use]
    pub fn parse_loose(raw: &str) -> Option<Self> {
        let trimmed = raw.trim().trim_end_matches([')', '.', ':']).trim();
        match trimmed.to_ascii_uppercase().as_str() {
            "A" => Some(ChoiceKey::A),
            "B" => Some(ChoiceKey::B),
            "C" => Some(ChoiceKey::C),
            "D" => Some(ChoiceKey::D),
            _ => None,
        }
    }
}

impl fmt::Display for ChoiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── CHOICE MAP ────────────────────────────────────────────────────────────────
//

/// Exactly one value per choice key, in `A`..`D` order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceMap<T> {
    #[serde(rename = "A")]
    a: T,
    #[serde(rename = "B")]
    b: T,
    #[serde(rename = "C")]
    c: T,
    #[serde(rename = "D")]
    d: T,
}

impl<T> ChoiceMap<T> {
    #[must_use]
    pub fn new(a: T, b: T, c: T, d: T) -> Self {
        Self { a, b, c, d }
    }

    #[must_use]
    pub fn get(&self, key: ChoiceKey) -> &T {
        match key {
            ChoiceKey::A => &self.a,
            ChoiceKey::B => &self.b,
            ChoiceKey::C => &self.c,
            ChoiceKey::D => &self.d,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChoiceKey, &T)> {
        ChoiceKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Canonical multiple-choice question, independent of the bank's field naming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: Option<QuestionId>,
    text: String,
    domain: Option<Domain>,
    options: ChoiceMap<String>,
    explanations: Option<ChoiceMap<String>>,
    correct_key: ChoiceKey,
}

impl Question {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::MissingText` if the prompt is blank.
    pub fn new(
        id: Option<QuestionId>,
        text: impl Into<String>,
        domain: Option<Domain>,
        options: ChoiceMap<String>,
        correct_key: ChoiceKey,
    ) -> Result<Self, QuestionError> {
        let text = text.into().trim().to_string();
        if text.is_empty() {
            return Err(QuestionError::MissingText);
        }
        Ok(Self {
            id,
            text,
            domain,
            options,
            explanations: None,
            correct_key,
        })
    }

    #[must_use]
    pub fn with_explanations(mut self, explanations: ChoiceMap<String>) -> Self {
        self.explanations = Some(explanations);
        self
    }

    #[must_use]
    pub fn id(&self) -> Option<&QuestionId> {
        self.id.as_ref()
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn domain(&self) -> Option<&Domain> {
        self.domain.as_ref()
    }

    #[must_use]
    pub fn options(&self) -> &ChoiceMap<String> {
        &self.options
    }

    #[must_use]
    pub fn option(&self, key: ChoiceKey) -> &str {
        self.options.get(key)
    }

    #[must_use]
    pub fn explanation(&self, key: ChoiceKey) -> Option<&str> {
        self.explanations
            .as_ref()
            .map(|map| map.get(key).as_str())
            .filter(|text| !text.is_empty())
    }

    #[must_use]
    pub fn correct_key(&self) -> ChoiceKey {
        self.correct_key
    }

    #[must_use]
    pub fn is_correct(&self, key: ChoiceKey) -> bool {
        self.correct_key == key
    }
}
