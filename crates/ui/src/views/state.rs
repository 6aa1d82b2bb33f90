use dioxus::prelude::*;
use services::{ConfigurationError, PracticeError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    ExamLoad,
    PracticeLoad,
    MissingExam,
    MissingDomain,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Unknown => "Something went wrong. Please try again.",
            Self::ExamLoad => "Failed to load exam questions. Please try again.",
            Self::PracticeLoad => "Failed to load a practice question. Please try again.",
            Self::MissingExam => "Please select an exam.",
            Self::MissingDomain => "Please select a domain.",
        }
    }
}

impl From<&ConfigurationError> for ViewError {
    fn from(err: &ConfigurationError) -> Self {
        match err {
            ConfigurationError::MissingExam | ConfigurationError::UnknownExam(_) => {
                Self::MissingExam
            }
            ConfigurationError::MissingDomain => Self::MissingDomain,
            _ => Self::Unknown,
        }
    }
}

impl From<&PracticeError> for ViewError {
    fn from(err: &PracticeError) -> Self {
        match err {
            PracticeError::Configuration(err) => Self::from(err),
            PracticeError::Load(_) => Self::PracticeLoad,
            _ => Self::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
