use serde::Deserialize;

use crate::model::ids::{Domain, QuestionId};
use crate::model::question::{ChoiceKey, ChoiceMap, Question, QuestionError};

/// Wire shape of a question-bank record.
///
/// The bank has shipped two field conventions over time; both are accepted here
/// and `normalize` folds them into a single `Question`. When a record carries
/// both spellings of a field, the short one wins.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionRecord {
    #[serde(default)]
    id: Option<Scalar>,
    #[serde(default, rename = "question-id")]
    question_id: Option<Scalar>,
    #[serde(default)]
    domain: Option<Scalar>,

    #[serde(default)]
    question: Option<String>,
    #[serde(default, rename = "question-text")]
    question_text: Option<String>,

    #[serde(default, rename = "A")]
    a: Option<String>,
    #[serde(default, rename = "B")]
    b: Option<String>,
    #[serde(default, rename = "C")]
    c: Option<String>,
    #[serde(default, rename = "D")]
    d: Option<String>,
    #[serde(default, rename = "option-a")]
    option_a: Option<String>,
    #[serde(default, rename = "option-b")]
    option_b: Option<String>,
    #[serde(default, rename = "option-c")]
    option_c: Option<String>,
    #[serde(default, rename = "option-d")]
    option_d: Option<String>,

    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    correct: Option<String>,
    #[serde(default, rename = "correctAnswer")]
    correct_answer_camel: Option<String>,
    #[serde(default, rename = "correct answer")]
    correct_answer: Option<String>,

    #[serde(default, rename = "explanation-a")]
    explanation_a: Option<String>,
    #[serde(default, rename = "explanation-b")]
    explanation_b: Option<String>,
    #[serde(default, rename = "explanation-c")]
    explanation_c: Option<String>,
    #[serde(default, rename = "explanation-d")]
    explanation_d: Option<String>,
}

/// Numeric ids and domains arrive as JSON numbers from some bank revisions.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(text) => text,
            Scalar::Int(value) => value.to_string(),
            Scalar::Float(value) => value.to_string(),
        }
    }
}

fn first_present(candidates: impl IntoIterator<Item = Option<String>>) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

impl QuestionRecord {
    /// Fold either field convention into a canonical `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the prompt, any option, or the correct key
    /// is missing, or when the correct key is not `A`..`D`.
    pub fn normalize(self) -> Result<Question, QuestionError> {
        let text = first_present([self.question, self.question_text])
            .ok_or(QuestionError::MissingText)?;

        let option = |short: Option<String>, long: Option<String>, key: ChoiceKey| {
            first_present([short, long]).ok_or(QuestionError::MissingOption(key))
        };
        let options = ChoiceMap::new(
            option(self.a, self.option_a, ChoiceKey::A)?,
            option(self.b, self.option_b, ChoiceKey::B)?,
            option(self.c, self.option_c, ChoiceKey::C)?,
            option(self.d, self.option_d, ChoiceKey::D)?,
        );

        let raw_key = first_present([
            self.answer,
            self.correct,
            self.correct_answer_camel,
            self.correct_answer,
        ])
        .ok_or(QuestionError::MissingCorrectKey)?;
        let correct_key = ChoiceKey::parse_loose(&raw_key)
            .ok_or(QuestionError::InvalidCorrectKey(raw_key))?;

        let id = self
            .id
            .or(self.question_id)
            .map(Scalar::into_text)
            .filter(|id| !id.trim().is_empty())
            .map(QuestionId::new);
        let domain = self
            .domain
            .map(Scalar::into_text)
            .and_then(|tag| Domain::new(tag).ok());

        let question = Question::new(id, text, domain, options, correct_key)?;

        let explanations = [
            self.explanation_a,
            self.explanation_b,
            self.explanation_c,
            self.explanation_d,
        ];
        if explanations.iter().all(Option::is_none) {
            return Ok(question);
        }
        let [a, b, c, d] = explanations.map(|text| text.unwrap_or_default().trim().to_string());
        Ok(question.with_explanations(ChoiceMap::new(a, b, c, d)))
    }
}
