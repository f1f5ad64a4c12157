//! Static lesson content
//!
//! Everything the tutor says on its own initiative lives here as immutable,
//! order-significant tables. The state machine only ever reads them.

mod content;

pub use content::{
    BRIDGE_CLOSER, BRIDGE_LEAD_IN, BRIDGE_LINES, DEFINITION_CLOSER, DEFINITION_LEAD_IN,
    DEFINITION_LINES, DIAGNOSTIC_DONE, DIAGNOSTIC_FEEDBACK, DIAGNOSTIC_LEAD_IN,
    DIAGNOSTIC_QUESTIONS, GREETING, LESSON_BLOCKS, LESSON_CLOSERS, LESSON_LEAD_IN, PRACTICE_DONE,
    PRACTICE_LEAD_IN, PRACTICE_QUESTIONS,
};

/// One titled paragraph of the limits lesson
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonBlock {
    #[allow(dead_code)] // Used by tests
    pub id: &'static str,
    pub title: &'static str,
    pub text: &'static str,
}

impl LessonBlock {
    /// Render the block as a single tutor line
    pub fn render(&self) -> String {
        format!("{} — {}", self.title, self.text)
    }
}

/// A selectable answer to a diagnostic question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticOption {
    pub id: &'static str,
    pub text: &'static str,
}

/// Pre-lesson multiple-choice check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticQuestion {
    pub id: &'static str,
    pub prompt: &'static str,
    pub options: &'static [DiagnosticOption],
}

impl DiagnosticQuestion {
    pub fn option(&self, option_id: &str) -> Option<&'static DiagnosticOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

/// Feedback for every option of one diagnostic question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticFeedback {
    pub question_id: &'static str,
    #[allow(dead_code)] // Never shown to the learner
    pub correct_option_id: &'static str,
    /// `(option id, explanation)` pairs
    pub feedback: &'static [(&'static str, &'static str)],
}

impl DiagnosticFeedback {
    pub fn for_option(&self, option_id: &str) -> Option<&'static str> {
        self.feedback
            .iter()
            .find(|(id, _)| *id == option_id)
            .map(|(_, text)| *text)
    }
}

/// A practice option with its pre-authored explanation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PracticeOption {
    pub id: &'static str,
    pub text: &'static str,
    pub feedback: &'static str,
}

/// Post-lesson exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PracticeQuestion {
    pub id: &'static str,
    pub prompt: &'static str,
    pub options: &'static [PracticeOption],
    /// Whether a typed answer is invited alongside the buttons
    pub allow_text: bool,
}

impl PracticeQuestion {
    pub fn option(&self, option_id: &str) -> Option<&'static PracticeOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

/// Look up the feedback table entry for a diagnostic question
pub fn diagnostic_feedback(question_id: &str) -> Option<&'static DiagnosticFeedback> {
    DIAGNOSTIC_FEEDBACK
        .iter()
        .find(|f| f.question_id == question_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_fixed_question_counts() {
        assert_eq!(DIAGNOSTIC_QUESTIONS.len(), 5);
        assert_eq!(PRACTICE_QUESTIONS.len(), 5);
    }

    #[test]
    fn test_every_diagnostic_option_has_feedback() {
        for question in DIAGNOSTIC_QUESTIONS {
            let table = diagnostic_feedback(question.id)
                .unwrap_or_else(|| panic!("no feedback for {}", question.id));
            assert!(question.option(table.correct_option_id).is_some());
            for option in question.options {
                assert!(
                    table.for_option(option.id).is_some(),
                    "missing feedback for {}",
                    option.id
                );
            }
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let mut seen = HashSet::new();
        for question in DIAGNOSTIC_QUESTIONS {
            assert!(seen.insert(question.id));
            for option in question.options {
                assert!(seen.insert(option.id));
            }
        }
        for question in PRACTICE_QUESTIONS {
            assert!(seen.insert(question.id));
            for option in question.options {
                assert!(seen.insert(option.id));
            }
        }
    }

    #[test]
    fn test_render_lesson_block() {
        let block = LESSON_BLOCKS[3];
        assert_eq!(
            block.render(),
            "Two-sided limits — A two-sided limit exists only when the left-hand and right-hand limits match."
        );
    }

    #[test]
    fn test_only_third_practice_question_invites_text() {
        let flags: Vec<bool> = PRACTICE_QUESTIONS.iter().map(|q| q.allow_text).collect();
        assert_eq!(flags, vec![false, false, true, false, false]);
    }
}
