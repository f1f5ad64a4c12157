//! Mock implementations for testing
//!
//! These mocks enable runtime and relay testing without real I/O.

use super::traits::TutorClient;
use crate::llm::{LlmError, LlmMessage, LlmRequest, LlmResponse, LlmService};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::Notify;

// ============================================================================
// Mock LLM Service
// ============================================================================

/// Mock completion service that returns queued responses
#[derive(Default)]
pub struct MockLlmService {
    responses: Mutex<VecDeque<Result<LlmResponse, LlmError>>>,
    /// Record of all requests made
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlmService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response
    pub fn queue_response(&self, response: LlmResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: LlmError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmService for MockLlmService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::network("No mock response queued")))
    }

    fn model_id(&self) -> &str {
        "mock-model"
    }
}

// ============================================================================
// Mock Tutor
// ============================================================================

/// One recorded `TutorClient::ask` call
#[derive(Debug, Clone)]
pub struct TutorCall {
    pub message: String,
    pub context: String,
    pub history: Vec<LlmMessage>,
}

/// Tutor that answers from a reply queue and records every call
#[derive(Default)]
pub struct MockTutor {
    replies: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<TutorCall>>,
}

impl MockTutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_reply(&self, reply: impl Into<String>) {
        self.replies.lock().unwrap().push_back(reply.into());
    }

    pub fn recorded_calls(&self) -> Vec<TutorCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TutorClient for MockTutor {
    async fn ask(&self, message: &str, context: &str, history: &[LlmMessage]) -> String {
        self.calls.lock().unwrap().push(TutorCall {
            message: message.to_string(),
            context: context.to_string(),
            history: history.to_vec(),
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| "Mock tutor reply".to_string())
    }
}

/// Tutor that holds its reply until released, for in-flight tests
pub struct GatedTutor {
    reply: String,
    calls: AtomicUsize,
    /// Signalled when a call has started
    pub started: Notify,
    /// Notify once to let the pending call return
    pub release: Notify,
}

impl GatedTutor {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            calls: AtomicUsize::new(0),
            started: Notify::new(),
            release: Notify::new(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TutorClient for GatedTutor {
    async fn ask(&self, _message: &str, _context: &str, _history: &[LlmMessage]) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.started.notify_one();
        self.release.notified().await;
        self.reply.clone()
    }
}
