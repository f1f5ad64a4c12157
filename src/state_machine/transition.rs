//! Pure state transition function
//!
//! The match in [`transition`] is the lesson's transition table: every legal
//! `(step, event)` pair has an arm, and everything else falls through to
//! [`TransitionError::InvalidTransition`], which callers treat as a no-op.

use super::state::{LessonState, RelayStatus, Step, Tone};
use super::{Effect, Event};
use crate::lesson::{
    self, BRIDGE_CLOSER, BRIDGE_LEAD_IN, BRIDGE_LINES, DEFINITION_CLOSER, DEFINITION_LEAD_IN,
    DEFINITION_LINES, DIAGNOSTIC_DONE, DIAGNOSTIC_LEAD_IN, DIAGNOSTIC_QUESTIONS, LESSON_BLOCKS,
    LESSON_CLOSERS, LESSON_LEAD_IN, PRACTICE_DONE, PRACTICE_LEAD_IN, PRACTICE_QUESTIONS,
};
use thiserror::Error;

/// Substituted when the relay hands back a blank reply
pub const REPHRASE_FALLBACK: &str = "I might have missed that. Can you rephrase your question?";

/// Appended when the relay call dies without a reply
pub const RELAY_FAILED_MESSAGE: &str = "Something went wrong on my side. Please try again.";

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: LessonState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: LessonState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("The tutor is still answering the previous question")]
    RelayBusy,
    #[error("Message is empty")]
    EmptyInput,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs; no I/O.
pub fn transition(
    state: &LessonState,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state.step, event) {
        // ============================================================
        // Step buttons
        // ============================================================

        // Intro + StartDiagnostic -> Diagnostic
        (Step::Intro, Event::StartDiagnostic) => {
            let next = LessonState {
                step: Step::Diagnostic,
                diagnostic_index: 0,
                ..*state
            };
            Ok(TransitionResult::new(next)
                .with_effect(Effect::tutor(DIAGNOSTIC_LEAD_IN, Tone::Diagnostic))
                .with_effect(Effect::tutor(
                    DIAGNOSTIC_QUESTIONS[0].prompt,
                    Tone::Diagnostic,
                )))
        }

        // Intro + StartLesson -> Lesson (warmup skipped)
        (Step::Intro, Event::StartLesson) => Ok(TransitionResult::new(LessonState {
            step: Step::Lesson,
            ..*state
        })
        .with_effects(lesson_effects())),

        // Lesson + StartBridge -> Bridge
        (Step::Lesson, Event::StartBridge) => Ok(TransitionResult::new(LessonState {
            step: Step::Bridge,
            ..*state
        })
        .with_effects(scripted_block(
            BRIDGE_LEAD_IN,
            BRIDGE_LINES,
            BRIDGE_CLOSER,
            Tone::Bridge,
        ))),

        // Bridge + StartDefinition -> Definition
        (Step::Bridge, Event::StartDefinition) => Ok(TransitionResult::new(LessonState {
            step: Step::Definition,
            ..*state
        })
        .with_effects(scripted_block(
            DEFINITION_LEAD_IN,
            DEFINITION_LINES,
            DEFINITION_CLOSER,
            Tone::Definition,
        ))),

        // Definition + StartPractice -> Practice
        (Step::Definition, Event::StartPractice) => {
            let next = LessonState {
                step: Step::Practice,
                practice_index: 0,
                practice_done: false,
                ..*state
            };
            Ok(TransitionResult::new(next)
                .with_effect(Effect::tutor(PRACTICE_LEAD_IN, Tone::Practice))
                .with_effect(Effect::tutor(PRACTICE_QUESTIONS[0].prompt, Tone::Practice)))
        }

        // ============================================================
        // Diagnostic answers
        // ============================================================

        // Diagnostic + AnswerDiagnostic (more questions) -> Diagnostic (next index)
        // Diagnostic + AnswerDiagnostic (last question) -> Lesson, no button press.
        // The auto-chain is the only transition that is not user-triggered.
        (
            Step::Diagnostic,
            Event::AnswerDiagnostic {
                option_id,
                option_text,
            },
        ) => {
            let Some(question) = state.current_diagnostic() else {
                return Err(TransitionError::InvalidTransition(format!(
                    "No diagnostic question at index {}",
                    state.diagnostic_index
                )));
            };

            let mut effects = vec![Effect::user(option_text)];
            if let Some(feedback) =
                lesson::diagnostic_feedback(question.id).and_then(|f| f.for_option(&option_id))
            {
                effects.push(Effect::tutor(feedback, Tone::Diagnostic));
            }

            let next_index = state.diagnostic_index + 1;
            if let Some(next_question) = DIAGNOSTIC_QUESTIONS.get(next_index) {
                effects.push(Effect::tutor(next_question.prompt, Tone::Diagnostic));
                Ok(TransitionResult::new(LessonState {
                    diagnostic_index: next_index,
                    ..*state
                })
                .with_effects(effects))
            } else {
                effects.push(Effect::tutor(DIAGNOSTIC_DONE, Tone::Diagnostic));
                Ok(TransitionResult::new(LessonState {
                    step: Step::Lesson,
                    ..*state
                })
                .with_effects(effects)
                .with_effects(lesson_effects()))
            }
        }

        // ============================================================
        // Practice answers
        // ============================================================

        (
            Step::Practice,
            Event::AnswerPractice {
                option_text,
                feedback,
            },
        ) if !state.practice_done => {
            let mut effects = vec![
                Effect::user(option_text),
                Effect::tutor(feedback, Tone::Practice),
            ];

            let next_index = state.practice_index + 1;
            if let Some(next_question) = PRACTICE_QUESTIONS.get(next_index) {
                effects.push(Effect::tutor(next_question.prompt, Tone::Practice));
                Ok(TransitionResult::new(LessonState {
                    practice_index: next_index,
                    ..*state
                })
                .with_effects(effects))
            } else {
                // Practice is terminal: no further step to chain into
                effects.push(Effect::tutor(PRACTICE_DONE, Tone::Practice));
                Ok(TransitionResult::new(LessonState {
                    practice_done: true,
                    ..*state
                })
                .with_effects(effects))
            }
        }

        // ============================================================
        // Free-form questions
        // ============================================================

        (step, Event::SubmitFreeform { text }) => {
            let message = text.trim();
            if message.is_empty() {
                return Err(TransitionError::EmptyInput);
            }
            if state.is_relay_pending() {
                return Err(TransitionError::RelayBusy);
            }

            Ok(TransitionResult::new(LessonState {
                relay: RelayStatus::Awaiting { tone: step.tone() },
                ..*state
            })
            .with_effect(Effect::user(message))
            .with_effect(Effect::AskTutor {
                message: message.to_string(),
                context: step.context_label(),
            }))
        }

        (_, Event::RelaySettled { reply }) => {
            let RelayStatus::Awaiting { tone } = state.relay else {
                return Err(TransitionError::InvalidTransition(
                    "Relay reply with no question pending".to_string(),
                ));
            };
            let text = if reply.trim().is_empty() {
                REPHRASE_FALLBACK.to_string()
            } else {
                reply
            };
            Ok(TransitionResult::new(LessonState {
                relay: RelayStatus::Idle,
                ..*state
            })
            .with_effect(Effect::tutor(text, tone)))
        }

        (_, Event::RelayFailed) => {
            if !state.is_relay_pending() {
                return Err(TransitionError::InvalidTransition(
                    "Relay failure with no question pending".to_string(),
                ));
            }
            Ok(TransitionResult::new(LessonState {
                relay: RelayStatus::Idle,
                ..*state
            })
            .with_effect(Effect::tutor(RELAY_FAILED_MESSAGE, Tone::Lesson)))
        }

        // ============================================================
        // Invalid Transitions
        // ============================================================
        (step, event) => Err(TransitionError::InvalidTransition(format!(
            "No transition from {step} with event {}",
            event.name()
        ))),
    }
}

// Helper functions

/// Lead-in, one line per lesson block, then the closing prompts
fn lesson_effects() -> Vec<Effect> {
    std::iter::once(Effect::tutor(LESSON_LEAD_IN, Tone::Lesson))
        .chain(
            LESSON_BLOCKS
                .iter()
                .map(|block| Effect::tutor(block.render(), Tone::Lesson)),
        )
        .chain(
            LESSON_CLOSERS
                .iter()
                .map(|line| Effect::tutor(*line, Tone::Lesson)),
        )
        .collect()
}

fn scripted_block(
    lead_in: &'static str,
    lines: &'static [&'static str],
    closer: &'static str,
    tone: Tone,
) -> Vec<Effect> {
    std::iter::once(lead_in)
        .chain(lines.iter().copied())
        .chain(std::iter::once(closer))
        .map(|line| Effect::tutor(line, tone))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_machine::state::Role;

    fn at(step: Step) -> LessonState {
        LessonState {
            step,
            ..LessonState::default()
        }
    }

    fn texts(effects: &[Effect]) -> Vec<&str> {
        effects.iter().filter_map(Effect::message_text).collect()
    }

    fn answer_first_option(state: &LessonState) -> TransitionResult {
        let question = state.current_diagnostic().unwrap();
        transition(
            state,
            Event::AnswerDiagnostic {
                option_id: question.options[0].id.to_string(),
                option_text: question.options[0].text.to_string(),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_start_diagnostic_emits_lead_in_and_first_prompt() {
        let result = transition(&LessonState::default(), Event::StartDiagnostic).unwrap();

        assert_eq!(result.new_state.step, Step::Diagnostic);
        assert_eq!(result.new_state.diagnostic_index, 0);
        assert_eq!(
            texts(&result.effects),
            vec![DIAGNOSTIC_LEAD_IN, DIAGNOSTIC_QUESTIONS[0].prompt]
        );
    }

    #[test]
    fn test_diagnostic_answer_appends_feedback_and_next_prompt() {
        let state = at(Step::Diagnostic);
        let result = transition(
            &state,
            Event::AnswerDiagnostic {
                option_id: "q1b".to_string(),
                option_text: "f(x) is close to 5 when x is close to 2".to_string(),
            },
        )
        .unwrap();

        assert_eq!(result.new_state.diagnostic_index, 1);
        assert_eq!(
            result.effects[0],
            Effect::user("f(x) is close to 5 when x is close to 2")
        );
        assert_eq!(
            texts(&result.effects)[1..],
            [
                "Correct. A limit describes what f(x) approaches as x gets close to 2.",
                DIAGNOSTIC_QUESTIONS[1].prompt,
            ]
        );
    }

    #[test]
    fn test_unknown_diagnostic_option_skips_feedback() {
        let result = transition(
            &at(Step::Diagnostic),
            Event::AnswerDiagnostic {
                option_id: "nope".to_string(),
                option_text: "Something else".to_string(),
            },
        )
        .unwrap();

        assert_eq!(
            texts(&result.effects),
            vec!["Something else", DIAGNOSTIC_QUESTIONS[1].prompt]
        );
    }

    #[test]
    fn test_last_diagnostic_answer_chains_into_lesson() {
        let state = LessonState {
            step: Step::Diagnostic,
            diagnostic_index: 4,
            ..LessonState::default()
        };
        let result = answer_first_option(&state);

        assert_eq!(result.new_state.step, Step::Lesson);
        let lines = texts(&result.effects);
        let done_at = lines.iter().position(|l| *l == DIAGNOSTIC_DONE).unwrap();
        assert_eq!(lines[done_at + 1], LESSON_LEAD_IN);
        assert_eq!(lines.last().copied(), Some(LESSON_CLOSERS[1]));
    }

    #[test]
    fn test_lesson_emits_one_line_per_block_in_order() {
        let result = transition(&LessonState::default(), Event::StartLesson).unwrap();

        let block_lines: Vec<&str> = texts(&result.effects)
            .into_iter()
            .filter(|l| l.contains(" — "))
            .collect();
        let expected: Vec<String> = LESSON_BLOCKS.iter().map(|b| b.render()).collect();
        assert_eq!(block_lines, expected);
        assert_eq!(result.effects.len(), 1 + LESSON_BLOCKS.len() + 2);
    }

    #[test]
    fn test_bridge_and_definition_lines_verbatim() {
        let bridge = transition(&at(Step::Lesson), Event::StartBridge).unwrap();
        let lines = texts(&bridge.effects);
        assert_eq!(lines.first().copied(), Some(BRIDGE_LEAD_IN));
        assert_eq!(&lines[1..=BRIDGE_LINES.len()], BRIDGE_LINES);
        assert_eq!(lines.last().copied(), Some(BRIDGE_CLOSER));

        let definition = transition(&at(Step::Bridge), Event::StartDefinition).unwrap();
        let lines = texts(&definition.effects);
        assert_eq!(&lines[1..=DEFINITION_LINES.len()], DEFINITION_LINES);
        assert!(definition
            .effects
            .iter()
            .all(|e| matches!(e, Effect::AppendMessage { tone: Some(Tone::Definition), .. })));
    }

    #[test]
    fn test_start_practice_resets_progress() {
        let state = LessonState {
            step: Step::Definition,
            practice_index: 3,
            practice_done: true,
            ..LessonState::default()
        };
        let result = transition(&state, Event::StartPractice).unwrap();

        assert_eq!(result.new_state.step, Step::Practice);
        assert_eq!(result.new_state.practice_index, 0);
        assert!(!result.new_state.practice_done);
        assert_eq!(
            texts(&result.effects),
            vec![PRACTICE_LEAD_IN, PRACTICE_QUESTIONS[0].prompt]
        );
    }

    #[test]
    fn test_last_practice_answer_completes_without_chaining() {
        let state = LessonState {
            step: Step::Practice,
            practice_index: 4,
            ..LessonState::default()
        };
        let result = transition(
            &state,
            Event::AnswerPractice {
                option_text: "3".to_string(),
                feedback: "Correct.".to_string(),
            },
        )
        .unwrap();

        assert_eq!(result.new_state.step, Step::Practice);
        assert!(result.new_state.practice_done);
        assert_eq!(texts(&result.effects), vec!["3", "Correct.", PRACTICE_DONE]);

        let again = transition(
            &result.new_state,
            Event::AnswerPractice {
                option_text: "3".to_string(),
                feedback: "Correct.".to_string(),
            },
        );
        assert!(matches!(again, Err(TransitionError::InvalidTransition(_))));
    }

    #[test]
    fn test_restarting_active_step_is_rejected() {
        let cases = [
            (Step::Diagnostic, Event::StartDiagnostic),
            (Step::Lesson, Event::StartLesson),
            (Step::Bridge, Event::StartBridge),
            (Step::Definition, Event::StartDefinition),
            (Step::Practice, Event::StartPractice),
        ];
        for (step, event) in cases {
            let result = transition(&at(step), event);
            assert!(
                matches!(result, Err(TransitionError::InvalidTransition(_))),
                "{step} accepted a restart"
            );
        }
    }

    #[test]
    fn test_skipping_ahead_is_rejected() {
        assert!(transition(&LessonState::default(), Event::StartPractice).is_err());
        assert!(transition(&at(Step::Lesson), Event::StartDefinition).is_err());
        assert!(transition(
            &LessonState::default(),
            Event::AnswerDiagnostic {
                option_id: "q1a".to_string(),
                option_text: "f(2) = 5".to_string(),
            }
        )
        .is_err());
    }

    #[test]
    fn test_freeform_marks_relay_pending() {
        let result = transition(
            &at(Step::Bridge),
            Event::SubmitFreeform {
                text: "  why secant?  ".to_string(),
            },
        )
        .unwrap();

        assert_eq!(
            result.new_state.relay,
            RelayStatus::Awaiting { tone: Tone::Bridge }
        );
        assert_eq!(
            result.effects,
            vec![
                Effect::user("why secant?"),
                Effect::AskTutor {
                    message: "why secant?".to_string(),
                    context: Step::Bridge.context_label(),
                },
            ]
        );
    }

    #[test]
    fn test_freeform_rejected_while_pending_or_blank() {
        let pending = LessonState {
            relay: RelayStatus::Awaiting { tone: Tone::Lesson },
            ..LessonState::default()
        };
        assert_eq!(
            transition(&pending, Event::SubmitFreeform { text: "hi".to_string() }).unwrap_err(),
            TransitionError::RelayBusy
        );
        assert_eq!(
            transition(
                &LessonState::default(),
                Event::SubmitFreeform { text: "   ".to_string() }
            )
            .unwrap_err(),
            TransitionError::EmptyInput
        );
    }

    #[test]
    fn test_relay_reply_uses_tone_captured_at_submission() {
        let state = LessonState {
            step: Step::Lesson,
            relay: RelayStatus::Awaiting {
                tone: Tone::Diagnostic,
            },
            ..LessonState::default()
        };
        let result = transition(
            &state,
            Event::RelaySettled {
                reply: "Think about nearby values.".to_string(),
            },
        )
        .unwrap();

        assert_eq!(result.new_state.relay, RelayStatus::Idle);
        assert_eq!(
            result.effects,
            vec![Effect::AppendMessage {
                role: Role::Tutor,
                text: "Think about nearby values.".to_string(),
                tone: Some(Tone::Diagnostic),
            }]
        );
    }

    #[test]
    fn test_blank_relay_reply_falls_back() {
        let state = LessonState {
            relay: RelayStatus::Awaiting { tone: Tone::Lesson },
            ..LessonState::default()
        };
        let result = transition(&state, Event::RelaySettled { reply: " ".to_string() }).unwrap();
        assert_eq!(texts(&result.effects), vec![REPHRASE_FALLBACK]);
    }

    #[test]
    fn test_relay_failure_releases_guard() {
        let state = LessonState {
            relay: RelayStatus::Awaiting { tone: Tone::Practice },
            ..at(Step::Practice)
        };
        let result = transition(&state, Event::RelayFailed).unwrap();
        assert!(!result.new_state.is_relay_pending());
        assert_eq!(result.effects, vec![Effect::tutor(RELAY_FAILED_MESSAGE, Tone::Lesson)]);
    }

    #[test]
    fn test_unsolicited_relay_reply_rejected() {
        let result = transition(
            &LessonState::default(),
            Event::RelaySettled {
                reply: "hello".to_string(),
            },
        );
        assert!(matches!(result, Err(TransitionError::InvalidTransition(_))));
        assert!(transition(&LessonState::default(), Event::RelayFailed).is_err());
    }
}
