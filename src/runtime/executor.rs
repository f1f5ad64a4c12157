//! Lesson session runtime executor

use super::traits::TutorClient;
use super::transcript::{Message, Transcript};
use crate::lesson::GREETING;
use crate::llm::LlmMessage;
use crate::state_machine::{transition, Effect, Event, LessonState, Role, Tone, TransitionError};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};
use tokio::time::Instant;

/// Point-in-time copy of a session for rendering
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub id: String,
    pub state: LessonState,
    pub messages: Vec<Message>,
}

/// A free-form question the state machine asked the runtime to relay
#[derive(Debug)]
struct PendingAsk {
    message: String,
    context: &'static str,
    history: Vec<LlmMessage>,
}

#[derive(Debug)]
struct SessionInner {
    state: LessonState,
    transcript: Transcript,
    /// Last time the learner (or a relay reply) touched the session
    last_active: Instant,
}

/// Runs one learner's lesson: feeds events through the state machine,
/// applies the resulting effects, and performs the single relay call.
pub struct LessonRuntime {
    session_id: String,
    inner: Mutex<SessionInner>,
    tutor: Arc<dyn TutorClient>,
}

impl LessonRuntime {
    /// Fresh session at `intro` with the greeting already in the transcript
    pub fn new(session_id: impl Into<String>, tutor: Arc<dyn TutorClient>) -> Self {
        let mut inner = SessionInner {
            state: LessonState::default(),
            transcript: Transcript::default(),
            last_active: Instant::now(),
        };
        inner
            .transcript
            .push(Role::Tutor, GREETING.to_string(), Some(Tone::Lesson));

        Self {
            session_id: session_id.into(),
            inner: Mutex::new(inner),
            tutor,
        }
    }

    #[allow(dead_code)] // Used by tests
    pub fn id(&self) -> &str {
        &self.session_id
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let inner = self.lock().await;
        SessionSnapshot {
            id: self.session_id.clone(),
            state: inner.state,
            messages: inner.transcript.messages().to_vec(),
        }
    }

    /// Whether the session has been untouched for `ttl` with no reply pending
    pub async fn is_idle(&self, ttl: Duration) -> bool {
        let inner = self.inner.lock().await;
        !inner.state.is_relay_pending() && inner.last_active.elapsed() >= ttl
    }

    /// Lock the session and mark it active
    async fn lock(&self) -> MutexGuard<'_, SessionInner> {
        let mut inner = self.inner.lock().await;
        inner.last_active = Instant::now();
        inner
    }

    /// Apply a step-button event
    pub async fn dispatch(&self, event: Event) -> Result<(), TransitionError> {
        let mut inner = self.lock().await;
        self.apply_locked(&mut inner, event).map(|_| ())
    }

    /// Answer the current diagnostic question with one of its options
    pub async fn answer_diagnostic(&self, option_id: &str) -> Result<(), TransitionError> {
        let mut inner = self.lock().await;
        let option = inner
            .state
            .current_diagnostic()
            .and_then(|q| q.option(option_id))
            .ok_or_else(|| {
                TransitionError::InvalidTransition(format!(
                    "No diagnostic option {option_id} on offer"
                ))
            })?;
        let event = Event::AnswerDiagnostic {
            option_id: option.id.to_string(),
            option_text: option.text.to_string(),
        };
        self.apply_locked(&mut inner, event).map(|_| ())
    }

    /// Answer the current practice question with one of its options
    pub async fn answer_practice(&self, option_id: &str) -> Result<(), TransitionError> {
        let mut inner = self.lock().await;
        let option = inner
            .state
            .current_practice()
            .and_then(|q| q.option(option_id))
            .ok_or_else(|| {
                TransitionError::InvalidTransition(format!(
                    "No practice option {option_id} on offer"
                ))
            })?;
        let event = Event::AnswerPractice {
            option_text: option.text.to_string(),
            feedback: option.feedback.to_string(),
        };
        self.apply_locked(&mut inner, event).map(|_| ())
    }

    /// Submit a free-form question and wait for the tutor's reply.
    ///
    /// The relay call runs on its own task and settles the session even if
    /// the caller stops waiting, so the in-flight guard is always released.
    pub async fn submit_freeform(self: &Arc<Self>, text: String) -> Result<(), TransitionError> {
        let ask = {
            let mut inner = self.lock().await;
            self.apply_locked(&mut inner, Event::SubmitFreeform { text })?
        };
        let Some(ask) = ask else {
            return Ok(());
        };

        let runtime = Arc::clone(self);
        let settle = tokio::spawn(async move {
            let tutor = Arc::clone(&runtime.tutor);
            let request = tokio::spawn(async move {
                tutor.ask(&ask.message, ask.context, &ask.history).await
            });

            let event = match request.await {
                Ok(reply) => Event::RelaySettled { reply },
                Err(e) => {
                    tracing::error!(session_id = %runtime.session_id, error = %e, "Relay task failed");
                    Event::RelayFailed
                }
            };

            let mut inner = runtime.lock().await;
            if let Err(e) = runtime.apply_locked(&mut inner, event) {
                tracing::error!(session_id = %runtime.session_id, error = %e, "Failed to settle relay reply");
            }
        });

        if let Err(e) = settle.await {
            tracing::error!(session_id = %self.session_id, error = %e, "Relay settle task failed");
        }
        Ok(())
    }

    /// Run one transition and apply its effects while holding the lock
    fn apply_locked(
        &self,
        inner: &mut SessionInner,
        event: Event,
    ) -> Result<Option<PendingAsk>, TransitionError> {
        let event_name = event.name();
        let result = match transition(&inner.state, event) {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(
                    session_id = %self.session_id,
                    step = %inner.state.step,
                    event = event_name,
                    error = %e,
                    "Rejected transition"
                );
                return Err(e);
            }
        };

        if result.new_state.step != inner.state.step {
            tracing::info!(
                session_id = %self.session_id,
                from = %inner.state.step,
                to = %result.new_state.step,
                "Step changed"
            );
        }
        inner.state = result.new_state;

        let mut ask = None;
        for effect in result.effects {
            match effect {
                Effect::AppendMessage { role, text, tone } => {
                    inner.transcript.push(role, text, tone);
                }
                Effect::AskTutor { message, context } => {
                    // User turn was appended by the preceding effect
                    ask = Some(PendingAsk {
                        message,
                        context,
                        history: inner.transcript.to_llm_history(),
                    });
                }
            }
        }
        Ok(ask)
    }
}
