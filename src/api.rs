//! HTTP API for the limits tutor

mod handlers;
mod types;

pub use handlers::create_router;

use crate::relay::TutorRelay;
use crate::runtime::{SessionLimits, SessionManager};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<TutorRelay>,
    pub sessions: Arc<SessionManager>,
}

impl AppState {
    /// Build the state and start the idle-session sweeper
    pub fn new(relay: Arc<TutorRelay>, limits: SessionLimits) -> Self {
        let sessions = Arc::new(SessionManager::new(relay.clone(), limits));
        sessions.start_idle_sweeper();
        Self { relay, sessions }
    }
}
