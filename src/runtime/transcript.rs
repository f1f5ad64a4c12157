//! Append-only session transcript

use crate::llm::{LlmMessage, MessageRole};
use crate::state_machine::{Role, Tone};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One exchanged message. Never modified once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
    pub created_at: DateTime<Utc>,
}

/// Messages in display order
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn push(&mut self, role: Role, text: String, tone: Option<Tone>) -> &Message {
        self.messages.push(Message {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            text,
            tone,
            created_at: Utc::now(),
        });
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Transcript in completion-service roles, oldest first
    pub fn to_llm_history(&self) -> Vec<LlmMessage> {
        self.messages
            .iter()
            .map(|m| LlmMessage {
                role: match m.role {
                    Role::Tutor => MessageRole::Assistant,
                    Role::User => MessageRole::User,
                },
                content: m.text.clone(),
            })
            .collect()
    }
}
