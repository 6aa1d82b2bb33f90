use std::env;

use exam_core::model::DEFAULT_TIME_BUDGET_SECS;
use tracing::warn;

use crate::exam::{ExamFeatures, FetchStrategy};

pub const DEFAULT_QUESTION_API_URL: &str = "http://127.0.0.1:3000/questions";
pub const DEFAULT_CHAT_API_URL: &str = "http://127.0.0.1:3000/chat";
pub const DEFAULT_DB_URL: &str = "sqlite://exam-dashboard.sqlite3";

/// Runtime configuration shared by every service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardConfig {
    pub question_api_url: String,
    pub chat_api_url: String,
    pub time_budget_secs: u32,
    pub fetch_strategy: FetchStrategy,
    pub features: ExamFeatures,
    pub db_url: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            question_api_url: DEFAULT_QUESTION_API_URL.into(),
            chat_api_url: DEFAULT_CHAT_API_URL.into(),
            time_budget_secs: DEFAULT_TIME_BUDGET_SECS,
            fetch_strategy: FetchStrategy::default(),
            features: ExamFeatures::default(),
            db_url: DEFAULT_DB_URL.into(),
        }
    }
}

impl DashboardConfig {
    /// Read `EXAM_*` environment variables over the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    ///
    /// Unparsable values are logged and ignored.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(url) = read("EXAM_QUESTION_API_URL") {
            config.question_api_url = url;
        }
        if let Some(url) = read("EXAM_CHAT_API_URL") {
            config.chat_api_url = url;
        }
        if let Some(url) = read("EXAM_DB_URL") {
            config.db_url = url;
        }
        if let Some(raw) = read("EXAM_TIME_BUDGET_SECS") {
            match raw.parse::<u32>() {
                Ok(secs) if secs > 0 => config.time_budget_secs = secs,
                _ => warn!(value = %raw, "ignoring invalid EXAM_TIME_BUDGET_SECS"),
            }
        }
        if let Some(raw) = read("EXAM_FETCH_STRATEGY") {
            match raw.parse::<FetchStrategy>() {
                Ok(strategy) => config.fetch_strategy = strategy,
                Err(()) => warn!(value = %raw, "ignoring invalid EXAM_FETCH_STRATEGY"),
            }
        }
        if let Some(raw) = read("EXAM_FLAGGING") {
            match parse_bool(&raw) {
                Some(enabled) => config.features.flagging = enabled,
                None => warn!(value = %raw, "ignoring invalid EXAM_FLAGGING"),
            }
        }
        if let Some(raw) = read("EXAM_DOMAIN_PROGRESS") {
            match parse_bool(&raw) {
                Some(enabled) => config.features.domain_progress = enabled,
                None => warn!(value = %raw, "ignoring invalid EXAM_DOMAIN_PROGRESS"),
            }
        }

        config
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
