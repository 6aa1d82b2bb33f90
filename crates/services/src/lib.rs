#![forbid(unsafe_code)]

pub mod app_services;
pub mod community;
pub mod config;
pub mod error;
pub mod exam;
pub mod practice;
pub mod preferences_service;
pub mod question_bank;
pub mod tutor;

pub use exam_core::Clock;

pub use app_services::AppServices;
pub use community::{CommunityChat, CommunityMessage};
pub use config::DashboardConfig;
pub use error::{
    AppServicesError, ChatError, ConfigurationError, ExamStartError, LoadFailure, PracticeError,
    PreferencesError, SessionError,
};
pub use exam::{ExamController, ExamService, QuestionSetLoader};
pub use practice::{OptionState, PracticeRound, PracticeService};
pub use preferences_service::ThemeService;
pub use question_bank::{HttpQuestionBank, QuestionBank, QuestionQuery};
pub use tutor::{ChatClient, ChatTranscript, HttpChatClient, TutorService};
