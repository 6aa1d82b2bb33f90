use exam_core::model::{Domain, ExamConfig};
use tracing::info;

use super::controller::ExamController;
use super::countdown::Countdown;
use super::loader::QuestionSetLoader;
use super::session::{ExamFeatures, ExamSession};
use crate::error::ExamStartError;

/// Builds ready-to-run exam controllers.
#[derive(Clone)]
pub struct ExamService {
    loader: QuestionSetLoader,
    time_budget_secs: u32,
    features: ExamFeatures,
}

impl ExamService {
    #[must_use]
    pub fn new(loader: QuestionSetLoader, time_budget_secs: u32, features: ExamFeatures) -> Self {
        Self {
            loader,
            time_budget_secs,
            features,
        }
    }

    #[must_use]
    pub fn time_budget_secs(&self) -> u32 {
        self.time_budget_secs
    }

    #[must_use]
    pub fn features(&self) -> ExamFeatures {
        self.features
    }

    /// Load a fresh shuffled question set across the exam's catalog domains
    /// and start the clock.
    ///
    /// # Errors
    ///
    /// Returns `ExamStartError::Load` if the question set cannot be acquired.
    pub async fn start_exam(&self, config: ExamConfig) -> Result<ExamController, ExamStartError> {
        self.start_exam_for_domains(config, &[]).await
    }

    /// Same as `start_exam`, restricted to `domains` when non-empty.
    ///
    /// # Errors
    ///
    /// Returns `ExamStartError::Load` if the question set cannot be acquired.
    pub async fn start_exam_for_domains(
        &self,
        config: ExamConfig,
        domains: &[Domain],
    ) -> Result<ExamController, ExamStartError> {
        let questions = self.loader.load(&config, domains).await?;
        let session = ExamSession::new(questions, self.features)?;
        info!(
            exam = %config.exam_id(),
            questions = session.len(),
            budget = self.time_budget_secs,
            "exam started"
        );
        Ok(ExamController::new(
            config,
            session,
            Countdown::new(self.time_budget_secs),
        ))
    }
}
