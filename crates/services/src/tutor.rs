use std::sync::Arc;

use async_trait::async_trait;
use exam_core::model::{ChoiceKey, ChoiceMap, Question};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ChatError;

/// Shown in place of a reply when a chat turn fails.
pub const CHAT_APOLOGY: &str = "Sorry, I encountered an error. Please try again.";

const GENERAL_INSTRUCTION: &str = "You are a CompTIA exam instructor. Answer clearly with real-world \
examples and study tips, and remind users what and how to remember for the exam.";

//
// ─── WIRE TYPES ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionContext {
    pub question: String,
    pub options: ChoiceMap<String>,
    /// Always present on the wire, `null` when the question has no domain.
    pub domain: Option<String>,
}

impl From<&Question> for QuestionContext {
    fn from(question: &Question) -> Self {
        let [a, b, c, d] = ChoiceKey::ALL.map(|key| question.option(key).to_string());
        Self {
            question: question.text().to_string(),
            options: ChoiceMap::new(a, b, c, d),
            domain: question.domain().map(ToString::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_question: Option<QuestionContext>,
    pub instruction: String,
}

/// Body of one stateless chat turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ChatContext>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    reply: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Tutor instruction for the question on screen, if any.
#[must_use]
pub fn system_instruction(current: Option<&Question>) -> String {
    let Some(question) = current else {
        return GENERAL_INSTRUCTION.to_string();
    };
    let mut instruction = format!(
        "You are a CompTIA exam instructor. The user is currently viewing this question:\n\n\
         Question: {}\nOptions:\n",
        question.text()
    );
    for (key, text) in question.options().iter() {
        instruction.push_str(&format!("{key}) {text}\n"));
    }
    if let Some(domain) = question.domain() {
        instruction.push_str(&format!("\nDomain: {domain}\n"));
    }
    instruction.push_str(
        "\nProvide guidance and explanations without directly revealing the answer unless \
         specifically asked.\nUse real-world examples and study tips, and help users \
         understand the underlying concepts.",
    );
    instruction
}

//
// ─── CLIENT ────────────────────────────────────────────────────────────────────
//

/// Remote chat-completion endpoint.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send one turn and return the reply text.
    ///
    /// # Errors
    ///
    /// Returns `ChatError` on transport failures, error statuses, an `error`
    /// body, or an empty reply.
    async fn send(&self, request: &ChatRequest) -> Result<String, ChatError>;
}

#[derive(Clone)]
pub struct HttpChatClient {
    client: Client,
    url: String,
}

impl HttpChatClient {
    #[must_use]
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ChatClient for HttpChatClient {
    async fn send(&self, request: &ChatRequest) -> Result<String, ChatError> {
        debug!(url = %self.url, "sending chat turn");
        let response = self.client.post(&self.url).json(request).send().await?;
        let status = response.status();
        let body: Option<ChatResponse> = response.json().await.ok();

        if let Some(error) = body.as_ref().and_then(|body| body.error.clone()) {
            return Err(ChatError::Remote(error));
        }
        if !status.is_success() {
            return Err(ChatError::HttpStatus(status));
        }
        body.and_then(|body| body.reply)
            .map(|reply| reply.trim().to_string())
            .filter(|reply| !reply.is_empty())
            .ok_or(ChatError::EmptyReply)
    }
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Relays user questions to the tutor, with the on-screen question as context.
#[derive(Clone)]
pub struct TutorService {
    client: Arc<dyn ChatClient>,
}

impl TutorService {
    #[must_use]
    pub fn new(client: Arc<dyn ChatClient>) -> Self {
        Self { client }
    }

    /// Ask one question. No earlier turns are sent.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::EmptyMessage` for blank input, or whatever the
    /// client reports.
    pub async fn ask(
        &self,
        message: &str,
        current: Option<&Question>,
    ) -> Result<String, ChatError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        let request = ChatRequest {
            message: message.to_string(),
            context: Some(ChatContext {
                current_question: current.map(QuestionContext::from),
                instruction: system_instruction(current),
            }),
        };
        let reply = self.client.send(&request).await;
        if let Err(err) = &reply {
            warn!(error = %err, "tutor chat turn failed");
        }
        reply
    }
}

//
// ─── TRANSCRIPT ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

/// Local, display-only history of the tutor conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
}

impl ChatTranscript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage {
            role: ChatRole::User,
            text: text.into(),
        });
    }

    /// Append the reply, or the apology if the turn failed.
    pub fn push_reply(&mut self, reply: Result<String, ChatError>) {
        let text = reply.unwrap_or_else(|_| CHAT_APOLOGY.to_string());
        self.messages.push(ChatMessage {
            role: ChatRole::Assistant,
            text,
        });
    }
}
