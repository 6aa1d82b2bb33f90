//! Timed exam: question set loading, session state, countdown and submission.

mod controller;
mod countdown;
mod loader;
mod scoring;
mod service;
mod session;

pub use controller::{
    ExamController, ExamIntent, IntentOutcome, SubmitPreview, SubmitTrigger, TickOutcome,
};
pub use countdown::{Countdown, Tick};
pub use loader::{FetchStrategy, QuestionSetLoader, per_domain_quota};
pub use scoring::score_answers;
pub use service::ExamService;
pub use session::{
    DomainProgress, ExamFeatures, ExamSession, NavigatorCell, OptionView, QuestionView,
};
