//! Effects produced by state transitions

use super::state::{Role, Tone};

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a message to the transcript
    AppendMessage {
        role: Role,
        text: String,
        tone: Option<Tone>,
    },

    /// Forward a free-form question to the tutor relay
    AskTutor {
        message: String,
        context: &'static str,
    },
}

impl Effect {
    pub fn tutor(text: impl Into<String>, tone: Tone) -> Self {
        Effect::AppendMessage {
            role: Role::Tutor,
            text: text.into(),
            tone: Some(tone),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Effect::AppendMessage {
            role: Role::User,
            text: text.into(),
            tone: None,
        }
    }

    /// Text of an appended message, if this is one
    #[allow(dead_code)] // Used by tests
    pub fn message_text(&self) -> Option<&str> {
        match self {
            Effect::AppendMessage { text, .. } => Some(text),
            Effect::AskTutor { .. } => None,
        }
    }
}
