mod catalog;
mod exam;
mod handoff;
mod ids;
mod question;
mod record;
mod theme;

pub use ids::{Domain, ExamId, ParseIdError, QuestionId};

pub use catalog::{DEFAULT_EXAM_ID, ExamCatalog, ExamDefinition};
pub use exam::{
    DEFAULT_QUESTION_COUNT, DEFAULT_TIME_BUDGET_SECS, ExamConfig, SubmissionResult,
    SubmissionResultError,
};
pub use handoff::ResultsHandoff;
pub use question::{ChoiceKey, ChoiceMap, Question, QuestionError};
pub use record::QuestionRecord;
pub use theme::{THEME_PREFERENCE_KEY, Theme, UnknownTheme};
