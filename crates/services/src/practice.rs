use std::sync::Arc;

use exam_core::model::{ChoiceKey, Domain, ExamCatalog, ExamId, Question};
use tracing::info;

use crate::error::{ConfigurationError, LoadFailure, PracticeError};
use crate::question_bank::{QuestionBank, QuestionQuery};

/// Feedback styling of one option after the user answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionState {
    Correct,
    Incorrect,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeOptionView {
    pub key: ChoiceKey,
    pub text: String,
    pub state: OptionState,
}

/// A single untimed question. The first selection locks the round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeRound {
    question: Question,
    selected: Option<ChoiceKey>,
}

impl PracticeRound {
    #[must_use]
    pub fn new(question: Question) -> Self {
        Self {
            question,
            selected: None,
        }
    }

    #[must_use]
    pub fn question(&self) -> &Question {
        &self.question
    }

    #[must_use]
    pub fn selected(&self) -> Option<ChoiceKey> {
        self.selected
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.selected.is_some()
    }

    /// Returns `false` if the round was already answered.
    pub fn select(&mut self, key: ChoiceKey) -> bool {
        if self.selected.is_some() {
            return false;
        }
        self.selected = Some(key);
        true
    }

    #[must_use]
    pub fn is_correct(&self) -> Option<bool> {
        self.selected.map(|key| self.question.is_correct(key))
    }

    #[must_use]
    pub fn option_state(&self, key: ChoiceKey) -> OptionState {
        let Some(selected) = self.selected else {
            return OptionState::Neutral;
        };
        if self.question.is_correct(key) {
            OptionState::Correct
        } else if key == selected {
            OptionState::Incorrect
        } else {
            OptionState::Neutral
        }
    }

    #[must_use]
    pub fn options(&self) -> Vec<PracticeOptionView> {
        self.question
            .options()
            .iter()
            .map(|(key, text)| PracticeOptionView {
                key,
                text: text.clone(),
                state: self.option_state(key),
            })
            .collect()
    }

    /// Rationale for the chosen option, once answered.
    #[must_use]
    pub fn selected_explanation(&self) -> Option<&str> {
        self.selected.and_then(|key| self.question.explanation(key))
    }
}

/// Fetches single practice questions for an exam/domain selection.
#[derive(Clone)]
pub struct PracticeService {
    bank: Arc<dyn QuestionBank>,
    catalog: ExamCatalog,
}

impl PracticeService {
    #[must_use]
    pub fn new(bank: Arc<dyn QuestionBank>, catalog: ExamCatalog) -> Self {
        Self { bank, catalog }
    }

    #[must_use]
    pub fn catalog(&self) -> &ExamCatalog {
        &self.catalog
    }

    /// Check the dropdown selections before anything is fetched.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if either value is blank, the exam is not
    /// in the catalog, or the domain does not belong to the exam.
    pub fn validate_selection(
        &self,
        exam: Option<&str>,
        domain: Option<&str>,
    ) -> Result<(ExamId, Domain), ConfigurationError> {
        let exam = exam
            .and_then(|raw| ExamId::new(raw).ok())
            .ok_or(ConfigurationError::MissingExam)?;
        let domain = domain
            .and_then(|raw| Domain::new(raw).ok())
            .ok_or(ConfigurationError::MissingDomain)?;
        if self.catalog.get(&exam).is_none() {
            return Err(ConfigurationError::UnknownExam(exam));
        }
        if !self.catalog.contains_domain(&exam, &domain) {
            return Err(ConfigurationError::MissingDomain);
        }
        Ok((exam, domain))
    }

    /// Fetch one question for the selection.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::Configuration` before any request when the
    /// selection is incomplete, and `PracticeError::Load` if the bank fails
    /// or has nothing for the domain.
    pub async fn generate(
        &self,
        exam: Option<&str>,
        domain: Option<&str>,
    ) -> Result<PracticeRound, PracticeError> {
        let (exam, domain) = self.validate_selection(exam, domain)?;
        info!(%exam, %domain, "generating practice question");
        let query = QuestionQuery::Domain { domain, limit: 1 };
        let question = self
            .bank
            .fetch(&query)
            .await?
            .into_iter()
            .next()
            .ok_or(LoadFailure::Empty)?;
        Ok(PracticeRound::new(question))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use exam_core::model::ChoiceMap;
    use std::sync::Mutex;

    fn question() -> Question {
        Question::new(
            None,
            "Which port does SSH use?",
            Some(Domain::new("2.1").unwrap()),
            ChoiceMap::new("21".into(), "22".into(), "23".into(), "25".into()),
            ChoiceKey::B,
        )
        .unwrap()
        .with_explanations(ChoiceMap::new(
            "FTP control.".into(),
            "Secure shell.".into(),
            "Telnet.".into(),
            "SMTP.".into(),
        ))
    }

    struct RecordingBank {
        queries: Mutex<Vec<QuestionQuery>>,
        questions: Vec<Question>,
    }

    #[async_trait]
    impl QuestionBank for RecordingBank {
        async fn fetch(&self, query: &QuestionQuery) -> Result<Vec<Question>, LoadFailure> {
            self.queries.lock().unwrap().push(query.clone());
            Ok(self.questions.clone())
        }
    }

    fn service(questions: Vec<Question>) -> (PracticeService, Arc<RecordingBank>) {
        let bank = Arc::new(RecordingBank {
            queries: Mutex::new(Vec::new()),
            questions,
        });
        (
            PracticeService::new(bank.clone(), ExamCatalog::builtin()),
            bank,
        )
    }

    #[test]
    fn wrong_answer_marks_selection_and_correct_option() {
        let mut round = PracticeRound::new(question());
        assert_eq!(round.option_state(ChoiceKey::B), OptionState::Neutral);

        assert!(round.select(ChoiceKey::A));
        assert_eq!(round.is_correct(), Some(false));
        assert_eq!(round.option_state(ChoiceKey::A), OptionState::Incorrect);
        assert_eq!(round.option_state(ChoiceKey::B), OptionState::Correct);
        assert_eq!(round.option_state(ChoiceKey::C), OptionState::Neutral);
        assert_eq!(round.selected_explanation(), Some("FTP control."));
    }

    #[test]
    fn first_selection_locks_round() {
        let mut round = PracticeRound::new(question());
        assert!(round.select(ChoiceKey::B));
        assert!(!round.select(ChoiceKey::C));
        assert_eq!(round.selected(), Some(ChoiceKey::B));
        assert_eq!(round.is_correct(), Some(true));
    }

    #[tokio::test]
    async fn missing_selection_fails_before_fetching() {
        let (service, bank) = service(vec![question()]);

        let err = service.generate(None, Some("2.1")).await.unwrap_err();
        assert!(matches!(
            err,
            PracticeError::Configuration(ConfigurationError::MissingExam)
        ));
        let err = service.generate(Some("1101"), Some(" ")).await.unwrap_err();
        assert!(matches!(
            err,
            PracticeError::Configuration(ConfigurationError::MissingDomain)
        ));
        assert!(bank.queries.lock().unwrap().is_empty());
    }

    #[test]
    fn domain_must_belong_to_exam() {
        let (service, _) = service(Vec::new());
        assert_eq!(
            service.validate_selection(Some("1101"), Some("1.11")),
            Err(ConfigurationError::MissingDomain)
        );
        assert!(service.validate_selection(Some("1102"), Some("1.11")).is_ok());
    }

    #[tokio::test]
    async fn generate_requests_one_question_for_domain() {
        let (service, bank) = service(vec![question()]);
        let round = service.generate(Some("1101"), Some("2.1")).await.unwrap();
        assert_eq!(round.question().text(), "Which port does SSH use?");
        assert_eq!(
            bank.queries.lock().unwrap().as_slice(),
            &[QuestionQuery::Domain {
                domain: Domain::new("2.1").unwrap(),
                limit: 1
            }]
        );
    }

    #[tokio::test]
    async fn empty_bank_is_a_load_failure() {
        let (service, _) = service(Vec::new());
        let err = service.generate(Some("1101"), Some("2.1")).await.unwrap_err();
        assert!(matches!(err, PracticeError::Load(LoadFailure::Empty)));
    }
}
