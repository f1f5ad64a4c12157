//! API request and response types

use crate::llm::{LlmMessage, MessageRole};
use crate::runtime::{Message, SessionSnapshot};
use crate::state_machine::Step;
use serde::{Deserialize, Serialize};

// ============================================================
// Relay façade
// ============================================================

/// Request to the stateless tutor relay
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

/// Prior turn supplied by a relay caller
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntry {
    pub role: HistoryRole,
    pub content: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryRole {
    User,
    Assistant,
}

impl From<HistoryEntry> for LlmMessage {
    fn from(entry: HistoryEntry) -> Self {
        let role = match entry.role {
            HistoryRole::User => MessageRole::User,
            HistoryRole::Assistant => MessageRole::Assistant,
        };
        LlmMessage {
            role,
            content: entry.content,
        }
    }
}

/// Relay reply; always present
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

// ============================================================
// Sessions
// ============================================================

/// Learner action on a session
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionRequest {
    StartDiagnostic,
    StartLesson,
    StartBridge,
    StartDefinition,
    StartPractice,
    AnswerDiagnostic { option_id: String },
    AnswerPractice { option_id: String },
}

/// Free-form question on a session
#[derive(Debug, Deserialize)]
pub struct SessionChatRequest {
    pub text: String,
}

/// The button shown for the current step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepButton {
    pub action: String,
    pub label: String,
}

/// An answer option on offer. Correctness is never exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub id: String,
    pub text: String,
}

/// The question whose options are currently on offer
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub id: String,
    pub prompt: String,
    pub options: Vec<OptionView>,
    pub allow_text: bool,
}

/// Full render model of a session
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: String,
    pub step: Step,
    pub diagnostic_index: usize,
    pub practice_index: usize,
    pub practice_done: bool,
    pub relay_pending: bool,
    pub button: Option<StepButton>,
    pub question: Option<QuestionView>,
    pub messages: Vec<Message>,
}

impl From<SessionSnapshot> for SessionView {
    fn from(snapshot: SessionSnapshot) -> Self {
        let state = snapshot.state;

        let button = step_button(state.step).map(|(action, label)| StepButton {
            action: action.to_string(),
            label: label.to_string(),
        });

        let question = if let Some(q) = state.current_diagnostic() {
            Some(QuestionView {
                id: q.id.to_string(),
                prompt: q.prompt.to_string(),
                options: q
                    .options
                    .iter()
                    .map(|o| OptionView {
                        id: o.id.to_string(),
                        text: o.text.to_string(),
                    })
                    .collect(),
                allow_text: false,
            })
        } else {
            state.current_practice().map(|q| QuestionView {
                id: q.id.to_string(),
                prompt: q.prompt.to_string(),
                options: q
                    .options
                    .iter()
                    .map(|o| OptionView {
                        id: o.id.to_string(),
                        text: o.text.to_string(),
                    })
                    .collect(),
                allow_text: q.allow_text,
            })
        };

        Self {
            id: snapshot.id,
            step: state.step,
            diagnostic_index: state.diagnostic_index,
            practice_index: state.practice_index,
            practice_done: state.practice_done,
            relay_pending: state.is_relay_pending(),
            button,
            question,
            messages: snapshot.messages,
        }
    }
}

/// Action name and label of the single button a step offers
fn step_button(step: Step) -> Option<(&'static str, &'static str)> {
    match step {
        Step::Intro => Some(("start_diagnostic", "Start lesson")),
        Step::Lesson => Some(("start_bridge", "Continue to rates")),
        Step::Bridge => Some(("start_definition", "See the definition")),
        Step::Definition => Some(("start_practice", "Start practice")),
        Step::Diagnostic | Step::Practice => None,
    }
}

// ============================================================
// Errors
// ============================================================

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
