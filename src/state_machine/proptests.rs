//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::{transition, Effect, Event, LessonState, RelayStatus, Step, Tone};
use crate::lesson::{DIAGNOSTIC_QUESTIONS, PRACTICE_QUESTIONS};
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn start_diagnostic() -> LessonState {
    transition(&LessonState::default(), Event::StartDiagnostic)
        .unwrap()
        .new_state
}

fn start_practice() -> LessonState {
    let state = LessonState {
        step: Step::Definition,
        ..LessonState::default()
    };
    transition(&state, Event::StartPractice).unwrap().new_state
}

/// Apply an event, treating rejected transitions as no-ops
fn apply(state: LessonState, event: Event) -> (LessonState, Vec<Effect>) {
    match transition(&state, event) {
        Ok(result) => (result.new_state, result.effects),
        Err(_) => (state, vec![]),
    }
}

fn is_valid_state(state: &LessonState) -> bool {
    state.diagnostic_index < DIAGNOSTIC_QUESTIONS.len()
        && state.practice_index < PRACTICE_QUESTIONS.len()
        && (!state.practice_done || state.step == Step::Practice)
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_option_pick() -> impl Strategy<Value = usize> {
    0usize..3
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        Just(Event::StartDiagnostic),
        Just(Event::StartLesson),
        Just(Event::StartBridge),
        Just(Event::StartDefinition),
        Just(Event::StartPractice),
        ("[a-z0-9]{2,4}", "[a-zA-Z ]{1,20}").prop_map(|(option_id, option_text)| {
            Event::AnswerDiagnostic {
                option_id,
                option_text,
            }
        }),
        ("[a-zA-Z ]{1,20}", "[a-zA-Z .]{1,40}").prop_map(|(option_text, feedback)| {
            Event::AnswerPractice {
                option_text,
                feedback,
            }
        }),
        "[a-zA-Z ?]{0,30}".prop_map(|text| Event::SubmitFreeform { text }),
        "[a-zA-Z ]{0,30}".prop_map(|reply| Event::RelaySettled { reply }),
        Just(Event::RelayFailed),
    ]
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Invariant 1: Indices stay in bounds and steps never move backwards
    #[test]
    fn prop_forward_only_and_in_bounds(events in proptest::collection::vec(arb_event(), 0..60)) {
        let mut state = LessonState::default();
        for event in events {
            let before = state.step;
            let (next, _) = apply(state, event);
            prop_assert!(next.step >= before, "moved back from {} to {}", before, next.step);
            prop_assert!(is_valid_state(&next), "Invalid state: {:?}", next);
            state = next;
        }
    }

    // Invariant 2: Lesson starts after exactly the fifth diagnostic answer
    #[test]
    fn prop_lesson_after_fifth_diagnostic_answer(picks in proptest::collection::vec(arb_option_pick(), 5)) {
        let mut state = start_diagnostic();
        let mut lesson_entries = 0;
        for (i, pick) in picks.into_iter().enumerate() {
            let question = state.current_diagnostic().unwrap();
            let option = &question.options[pick % question.options.len()];
            let (next, _) = apply(state, Event::AnswerDiagnostic {
                option_id: option.id.to_string(),
                option_text: option.text.to_string(),
            });
            if next.step == Step::Lesson && state.step == Step::Diagnostic {
                lesson_entries += 1;
                prop_assert_eq!(i, 4, "lesson started after answer {}", i + 1);
            } else {
                prop_assert_eq!(next.step, Step::Diagnostic);
            }
            state = next;
        }
        prop_assert_eq!(lesson_entries, 1);
        prop_assert_eq!(state.step, Step::Lesson);
    }

    // Invariant 3: Practice completes after exactly the fifth answer
    #[test]
    fn prop_practice_done_only_after_fifth(picks in proptest::collection::vec(arb_option_pick(), 5)) {
        let mut state = start_practice();
        for (i, pick) in picks.into_iter().enumerate() {
            prop_assert!(!state.practice_done);
            let question = state.current_practice().unwrap();
            let option = &question.options[pick % question.options.len()];
            let (next, effects) = apply(state, Event::AnswerPractice {
                option_text: option.text.to_string(),
                feedback: option.feedback.to_string(),
            });
            prop_assert_eq!(effects[1].message_text(), Some(option.feedback));
            prop_assert_eq!(next.practice_done, i == 4);
            state = next;
        }
        prop_assert!(state.current_practice().is_none());
    }

    // Invariant 4: At most one relay call is ever requested at a time
    #[test]
    fn prop_single_relay_call_in_flight(events in proptest::collection::vec(arb_event(), 0..60)) {
        let mut state = LessonState::default();
        let mut outstanding = 0u32;
        for event in events {
            let settles = matches!(event, Event::RelaySettled { .. } | Event::RelayFailed);
            let (next, effects) = apply(state, event);
            if settles && state.is_relay_pending() {
                outstanding -= 1;
            }
            let asks = effects.iter().filter(|e| matches!(e, Effect::AskTutor { .. })).count();
            outstanding += u32::try_from(asks).unwrap();
            prop_assert!(outstanding <= 1);
            prop_assert_eq!(outstanding == 1, next.is_relay_pending());
            state = next;
        }
    }

    // Invariant 5: Rejected submissions leave no trace
    #[test]
    fn prop_busy_submission_is_inert(text in "[a-zA-Z ]{1,30}", step_idx in 0usize..6) {
        let state = LessonState {
            step: Step::ALL[step_idx],
            relay: RelayStatus::Awaiting { tone: Tone::Lesson },
            ..LessonState::default()
        };
        let result = transition(&state, Event::SubmitFreeform { text });
        prop_assert!(result.is_err());
    }

    // Invariant 6: Free-form replies are tagged with the submitting step's tone
    #[test]
    fn prop_reply_tone_matches_step(step_idx in 0usize..6, reply in "[a-zA-Z]{1,20}") {
        let step = Step::ALL[step_idx];
        let state = LessonState { step, ..LessonState::default() };
        let asked = transition(&state, Event::SubmitFreeform { text: "why?".to_string() }).unwrap();
        let settled = transition(&asked.new_state, Event::RelaySettled { reply }).unwrap();
        let tone = match &settled.effects[0] {
            Effect::AppendMessage { tone, .. } => *tone,
            Effect::AskTutor { .. } => None,
        };
        prop_assert_eq!(tone, Some(step.tone()));
    }
}
