use async_trait::async_trait;
use exam_core::model::{Domain, ExamId, Question, QuestionRecord};
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::LoadFailure;

/// One request against the question bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionQuery {
    /// `?domain=<d>&limit=<n>`
    Domain { domain: Domain, limit: u32 },
    /// `?domains=<d1,d2,...>&limit=<n>`
    Domains { domains: Vec<Domain>, limit: u32 },
    /// `?exam=<id>&count=<n>`
    Exam { exam: ExamId, count: u32 },
}

impl QuestionQuery {
    /// Query-string pairs for this request.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            QuestionQuery::Domain { domain, limit } => vec![
                ("domain", domain.to_string()),
                ("limit", limit.to_string()),
            ],
            QuestionQuery::Domains { domains, limit } => {
                let joined = domains
                    .iter()
                    .map(Domain::as_str)
                    .collect::<Vec<_>>()
                    .join(",");
                vec![("domains", joined), ("limit", limit.to_string())]
            }
            QuestionQuery::Exam { exam, count } => vec![
                ("exam", exam.to_string()),
                ("count", count.to_string()),
            ],
        }
    }
}

/// Read-only source of normalized questions.
#[async_trait]
pub trait QuestionBank: Send + Sync {
    /// Fetch the questions matching `query`.
    ///
    /// # Errors
    ///
    /// Returns `LoadFailure` on transport errors, non-success statuses, or a
    /// payload that is not a list.
    async fn fetch(&self, query: &QuestionQuery) -> Result<Vec<Question>, LoadFailure>;
}

/// `QuestionBank` backed by the remote HTTP API.
#[derive(Clone)]
pub struct HttpQuestionBank {
    client: Client,
    base_url: String,
}

impl HttpQuestionBank {
    #[must_use]
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl QuestionBank for HttpQuestionBank {
    async fn fetch(&self, query: &QuestionQuery) -> Result<Vec<Question>, LoadFailure> {
        let pairs = query.query_pairs();
        debug!(url = %self.base_url, ?pairs, "fetching questions");

        let response = self
            .client
            .get(&self.base_url)
            .header(ACCEPT, "application/json")
            .query(&pairs)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LoadFailure::HttpStatus(response.status()));
        }

        let body = response.text().await?;
        let payload: Value = serde_json::from_str(&body)?;
        parse_question_payload(payload)
    }
}

/// Turn a bank payload into canonical questions.
///
/// Records that cannot be normalized are skipped and logged.
///
/// # Errors
///
/// Returns `LoadFailure::NotAList` if the payload is not a JSON array.
pub fn parse_question_payload(payload: Value) -> Result<Vec<Question>, LoadFailure> {
    let Value::Array(items) = payload else {
        return Err(LoadFailure::NotAList);
    };

    let mut questions = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let record = match serde_json::from_value::<QuestionRecord>(item) {
            Ok(record) => record,
            Err(err) => {
                warn!(index, error = %err, "skipping undecodable question record");
                continue;
            }
        };
        match record.normalize() {
            Ok(question) => questions.push(question),
            Err(err) => warn!(index, error = %err, "skipping invalid question record"),
        }
    }
    Ok(questions)
}
