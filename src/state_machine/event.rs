//! Events that can occur in a lesson session

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // Step buttons
    StartDiagnostic,
    StartLesson,
    StartBridge,
    StartDefinition,
    StartPractice,

    // Question answers
    AnswerDiagnostic {
        option_id: String,
        option_text: String,
    },
    AnswerPractice {
        option_text: String,
        feedback: String,
    },

    // Free-form input
    SubmitFreeform {
        text: String,
    },

    // Relay events
    RelaySettled {
        reply: String,
    },
    /// The relay task ended without producing a reply
    RelayFailed,
}

impl Event {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Event::StartDiagnostic => "start_diagnostic",
            Event::StartLesson => "start_lesson",
            Event::StartBridge => "start_bridge",
            Event::StartDefinition => "start_definition",
            Event::StartPractice => "start_practice",
            Event::AnswerDiagnostic { .. } => "answer_diagnostic",
            Event::AnswerPractice { .. } => "answer_practice",
            Event::SubmitFreeform { .. } => "submit_freeform",
            Event::RelaySettled { .. } => "relay_settled",
            Event::RelayFailed => "relay_failed",
        }
    }
}
