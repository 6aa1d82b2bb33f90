use thiserror::Error;

use crate::model::{ParseIdError, QuestionError, SubmissionResultError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Submission(#[from] SubmissionResultError),
    #[error(transparent)]
    Id(#[from] ParseIdError),
}
