//! Lesson session state types

use crate::lesson::{
    DiagnosticQuestion, PracticeQuestion, DIAGNOSTIC_QUESTIONS, PRACTICE_QUESTIONS,
};
use serde::Serialize;

/// Context label used when no step-specific label applies
pub const DEFAULT_CONTEXT_LABEL: &str = "Limits and derivatives lesson.";

// ============================================================================
// Step
// ============================================================================

/// Stage of the fixed lesson sequence, in walk order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    #[default]
    Intro,
    Diagnostic,
    Lesson,
    Bridge,
    Definition,
    Practice,
}

impl Step {
    #[allow(dead_code)] // Used by tests
    pub const ALL: [Step; 6] = [
        Step::Intro,
        Step::Diagnostic,
        Step::Lesson,
        Step::Bridge,
        Step::Definition,
        Step::Practice,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Step::Intro => "intro",
            Step::Diagnostic => "diagnostic",
            Step::Lesson => "lesson",
            Step::Bridge => "bridge",
            Step::Definition => "definition",
            Step::Practice => "practice",
        }
    }

    /// Short description of the step handed to the completion service
    pub fn context_label(self) -> &'static str {
        match self {
            Step::Intro => "Intro and overview of the lesson.",
            Step::Diagnostic => "Diagnostic quiz on limits.",
            Step::Lesson => "Lesson on limits: approach, graph, two-sided limits.",
            Step::Bridge => "Bridge: average to instantaneous rate of change.",
            Step::Definition => "Definition of the derivative using a limit.",
            Step::Practice => "Practice questions on derivative meaning and definition.",
        }
    }

    /// Tone for messages the step emits; intro has none of its own
    pub fn tone(self) -> Tone {
        match self {
            Step::Diagnostic => Tone::Diagnostic,
            Step::Intro | Step::Lesson => Tone::Lesson,
            Step::Bridge => Tone::Bridge,
            Step::Definition => Tone::Definition,
            Step::Practice => Tone::Practice,
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Message metadata
// ============================================================================

/// Who authored a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Tutor,
    User,
}

/// Presentation category of a tutor message. Never affects behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Diagnostic,
    Lesson,
    Bridge,
    Definition,
    Practice,
}

// ============================================================================
// Lesson State
// ============================================================================

/// Whether a free-form question is waiting on the tutor relay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelayStatus {
    #[default]
    Idle,
    /// One relay call in flight; the reply will carry `tone`
    Awaiting { tone: Tone },
}

/// Mutable lesson position. The transcript is owned by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LessonState {
    pub step: Step,
    pub diagnostic_index: usize,
    pub practice_index: usize,
    pub practice_done: bool,
    pub relay: RelayStatus,
}

impl LessonState {
    /// The diagnostic question whose options are on offer, if any
    pub fn current_diagnostic(&self) -> Option<&'static DiagnosticQuestion> {
        if self.step == Step::Diagnostic {
            DIAGNOSTIC_QUESTIONS.get(self.diagnostic_index)
        } else {
            None
        }
    }

    /// The practice question whose options are on offer, if any
    pub fn current_practice(&self) -> Option<&'static PracticeQuestion> {
        if self.step == Step::Practice && !self.practice_done {
            PRACTICE_QUESTIONS.get(self.practice_index)
        } else {
            None
        }
    }

    pub fn is_relay_pending(&self) -> bool {
        matches!(self.relay, RelayStatus::Awaiting { .. })
    }
}
