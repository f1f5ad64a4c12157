//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the session runtime with mock implementations.

use crate::llm::LlmMessage;
use crate::relay::TutorRelay;
use async_trait::async_trait;

/// Answers free-form questions on behalf of the tutor
#[async_trait]
pub trait TutorClient: Send + Sync {
    /// Ask a question; always resolves to a displayable reply
    async fn ask(&self, message: &str, context: &str, history: &[LlmMessage]) -> String;
}

// ============================================================================
// Production Adapters
// ============================================================================

#[async_trait]
impl TutorClient for TutorRelay {
    async fn ask(&self, message: &str, context: &str, history: &[LlmMessage]) -> String {
        TutorRelay::ask(self, message, context, history).await
    }
}
