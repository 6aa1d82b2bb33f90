//! Shared error types for the services crate.

use thiserror::Error;

use exam_core::model::{ExamId, SubmissionResultError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors raised while acquiring questions from the bank.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadFailure {
    #[error("question bank request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("question bank responded with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("question bank payload is not a list of questions")]
    NotAList,
    #[error("question bank payload could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("no questions available")]
    Empty,
}

/// Errors raised by a single tutor chat turn.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatError {
    #[error("message is empty")]
    EmptyMessage,
    #[error("chat request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("chat service responded with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("chat service error: {0}")]
    Remote(String),
    #[error("chat service returned no reply")]
    EmptyReply,
}

/// Missing selections detected before any network call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigurationError {
    #[error("Please select an exam.")]
    MissingExam,
    #[error("Please select a domain.")]
    MissingDomain,
    #[error("exam {0} is not in the catalog")]
    UnknownExam(ExamId),
}

/// Errors emitted by the exam session and controller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for session")]
    Empty,
    #[error("exam already submitted")]
    AlreadySubmitted,
    #[error(transparent)]
    Result(#[from] SubmissionResultError),
}

/// Errors emitted while starting an exam.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExamStartError {
    #[error(transparent)]
    Load(#[from] LoadFailure),
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Errors emitted by `PracticeService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PracticeError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Load(#[from] LoadFailure),
}

/// Errors emitted by `ThemeService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PreferencesError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error("invalid http client configuration: {0}")]
    Http(#[from] reqwest::Error),
}
