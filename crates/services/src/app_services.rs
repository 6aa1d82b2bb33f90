use std::sync::Arc;
use std::time::Duration;

use exam_core::model::ExamCatalog;
use reqwest::Client;
use storage::repository::Storage;

use crate::Clock;
use crate::config::DashboardConfig;
use crate::error::AppServicesError;
use crate::exam::{ExamService, QuestionSetLoader};
use crate::practice::PracticeService;
use crate::preferences_service::ThemeService;
use crate::question_bank::{HttpQuestionBank, QuestionBank};
use crate::tutor::{ChatClient, HttpChatClient, TutorService};

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Assembles the app-facing services from configuration and backends.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    catalog: ExamCatalog,
    exam: Arc<ExamService>,
    practice: Arc<PracticeService>,
    tutor: Arc<TutorService>,
    theme: Arc<ThemeService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and the HTTP collaborators.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or the HTTP
    /// client cannot be built.
    pub async fn new_sqlite(
        config: &DashboardConfig,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(&config.db_url).await?;
        Self::with_http(config, clock, &storage)
    }

    /// Build services over an existing `Storage` using the HTTP collaborators.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Http` if the HTTP client cannot be built.
    pub fn with_http(
        config: &DashboardConfig,
        clock: Clock,
        storage: &Storage,
    ) -> Result<Self, AppServicesError> {
        let client = Client::builder().timeout(HTTP_TIMEOUT).build()?;
        let bank: Arc<dyn QuestionBank> =
            Arc::new(HttpQuestionBank::new(client.clone(), &config.question_api_url));
        let chat: Arc<dyn ChatClient> =
            Arc::new(HttpChatClient::new(client, &config.chat_api_url));
        Ok(Self::with_backends(config, clock, bank, chat, storage))
    }

    /// Build services over arbitrary backends.
    #[must_use]
    pub fn with_backends(
        config: &DashboardConfig,
        clock: Clock,
        bank: Arc<dyn QuestionBank>,
        chat: Arc<dyn ChatClient>,
        storage: &Storage,
    ) -> Self {
        let catalog = ExamCatalog::builtin();
        let loader =
            QuestionSetLoader::new(Arc::clone(&bank), catalog.clone(), config.fetch_strategy);
        let exam = Arc::new(ExamService::new(
            loader,
            config.time_budget_secs,
            config.features,
        ));
        let practice = Arc::new(PracticeService::new(bank, catalog.clone()));
        let tutor = Arc::new(TutorService::new(chat));
        let theme = Arc::new(ThemeService::new(Arc::clone(&storage.preferences)));

        Self {
            clock,
            catalog,
            exam,
            practice,
            tutor,
            theme,
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn catalog(&self) -> &ExamCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn exam(&self) -> Arc<ExamService> {
        Arc::clone(&self.exam)
    }

    #[must_use]
    pub fn practice(&self) -> Arc<PracticeService> {
        Arc::clone(&self.practice)
    }

    #[must_use]
    pub fn tutor(&self) -> Arc<TutorService> {
        Arc::clone(&self.tutor)
    }

    #[must_use]
    pub fn theme(&self) -> Arc<ThemeService> {
        Arc::clone(&self.theme)
    }
}
