//! Tutor relay
//!
//! Stateless bridge between a free-form question and the completion
//! service. Every call is a single best-effort attempt: failures degrade to a
//! fixed reply and are never retried.

use crate::llm::{LlmMessage, LlmRequest, LlmService, MessageRole};
use crate::state_machine::state::DEFAULT_CONTEXT_LABEL;
use std::sync::Arc;

pub const EMPTY_MESSAGE_REPLY: &str = "Please ask a question.";
pub const MISSING_KEY_REPLY: &str =
    "The OpenAI API key is missing. Set OPENAI_API_KEY in your environment.";
pub const UNAVAILABLE_REPLY: &str = "I could not reach the tutor right now. Try again soon.";
pub const EMPTY_COMPLETION_REPLY: &str =
    "I can try another explanation. What part feels unclear?";

const PERSONA: &[&str] = &[
    "You are a friendly high school math tutor.",
    "Be encouraging, concise, and intuition-focused.",
    "Avoid providing full solutions unless explicitly asked.",
    "Use short paragraphs, ask quick check-in questions when helpful.",
];

/// Request shaping for the completion service
#[derive(Debug, Clone, PartialEq)]
pub struct RelayConfig {
    pub max_tokens: u32,
    /// Kept low for a consistent tone
    pub temperature: f32,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            max_tokens: 180,
            temperature: 0.4,
        }
    }
}

/// Forwards free-form questions to the completion service
pub struct TutorRelay {
    /// `None` when no credential is configured
    llm: Option<Arc<dyn LlmService>>,
    config: RelayConfig,
}

impl TutorRelay {
    pub fn new(llm: Option<Arc<dyn LlmService>>, config: RelayConfig) -> Self {
        Self { llm, config }
    }

    pub fn is_configured(&self) -> bool {
        self.llm.is_some()
    }

    /// Ask the tutor. Always returns something displayable.
    ///
    /// `history` is the transcript so far in order; if it does not already
    /// end with `message` as a user turn, the message is appended.
    pub async fn ask(&self, message: &str, context: &str, history: &[LlmMessage]) -> String {
        let message = message.trim();
        if message.is_empty() {
            return EMPTY_MESSAGE_REPLY.to_string();
        }

        let Some(llm) = &self.llm else {
            tracing::warn!("Tutor relay called without an API key");
            return MISSING_KEY_REPLY.to_string();
        };

        let request = LlmRequest {
            system: Some(system_prompt(context)),
            messages: build_messages(message, history),
            max_tokens: Some(self.config.max_tokens),
            temperature: Some(self.config.temperature),
        };

        match llm.complete(&request).await {
            Ok(response) => response
                .text()
                .map_or_else(|| EMPTY_COMPLETION_REPLY.to_string(), str::to_string),
            Err(e) => {
                tracing::warn!(error = %e, kind = ?e.kind, "Tutor relay request failed");
                UNAVAILABLE_REPLY.to_string()
            }
        }
    }
}

/// Persona instructions followed by the lesson context
pub fn system_prompt(context: &str) -> String {
    let context = match context.trim() {
        "" => DEFAULT_CONTEXT_LABEL,
        c => c,
    };
    format!("{} Current lesson context: {context}", PERSONA.join(" "))
}

fn build_messages(message: &str, history: &[LlmMessage]) -> Vec<LlmMessage> {
    let mut messages = history.to_vec();
    let already_last = history
        .last()
        .is_some_and(|m| m.role == MessageRole::User && m.content.trim() == message);
    if !already_last {
        messages.push(LlmMessage::user(message));
    }
    messages
}
