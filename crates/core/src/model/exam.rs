use thiserror::Error;

use crate::model::catalog::DEFAULT_EXAM_ID;
use crate::model::ids::ExamId;

/// Question count used when a route or handoff does not name one.
pub const DEFAULT_QUESTION_COUNT: u32 = 90;

/// Default exam time budget (90 minutes).
pub const DEFAULT_TIME_BUDGET_SECS: u32 = 5400;

/// The pair that fully determines a retryable exam session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamConfig {
    exam_id: ExamId,
    requested_count: u32,
}

impl ExamConfig {
    #[must_use]
    pub fn new(exam_id: ExamId, requested_count: u32) -> Self {
        Self {
            exam_id,
            requested_count,
        }
    }

    /// Build a configuration from raw route values, defaulting missing or
    /// unparsable values to exam `1101` with 90 questions.
    #[must_use]
    pub fn from_query_values(exam: Option<&str>, count: Option<&str>) -> Self {
        let exam_id = exam
            .and_then(|raw| ExamId::new(raw).ok())
            .unwrap_or_else(|| ExamId::trusted(DEFAULT_EXAM_ID));
        let requested_count = count
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|count| *count > 0)
            .unwrap_or(DEFAULT_QUESTION_COUNT);
        Self::new(exam_id, requested_count)
    }

    #[must_use]
    pub fn exam_id(&self) -> &ExamId {
        &self.exam_id
    }

    #[must_use]
    pub fn requested_count(&self) -> u32 {
        self.requested_count
    }
}

impl Default for ExamConfig {
    fn default() -> Self {
        Self::new(ExamId::trusted(DEFAULT_EXAM_ID), DEFAULT_QUESTION_COUNT)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SubmissionResultError {
    #[error("correct count ({correct}) exceeds total ({total})")]
    CorrectExceedsTotal { correct: u32, total: u32 },
}

/// Outcome of a submitted exam. Computed once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    correct_count: u32,
    total_count: u32,
    elapsed_seconds: u32,
    config: ExamConfig,
}

impl SubmissionResult {
    /// # Errors
    ///
    /// Returns `SubmissionResultError::CorrectExceedsTotal` if the tally is inconsistent.
    pub fn new(
        correct_count: u32,
        total_count: u32,
        elapsed_seconds: u32,
        config: ExamConfig,
    ) -> Result<Self, SubmissionResultError> {
        if correct_count > total_count {
            return Err(SubmissionResultError::CorrectExceedsTotal {
                correct: correct_count,
                total: total_count,
            });
        }
        Ok(Self {
            correct_count,
            total_count,
            elapsed_seconds,
            config,
        })
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn total_count(&self) -> u32 {
        self.total_count
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    #[must_use]
    pub fn config(&self) -> &ExamConfig {
        &self.config
    }
}
