//! Runtime for executing lesson sessions
//!
//! Each session owns its lesson state and transcript; sessions never share
//! anything except the tutor client.

mod executor;
pub mod traits;
mod transcript;

#[cfg(test)]
pub mod testing;

pub use executor::{LessonRuntime, SessionSnapshot};
pub use traits::TutorClient;
pub use transcript::Message;

use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;

/// Bounds on the session registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    /// Sessions untouched this long are dropped
    pub idle_ttl: Duration,
    /// How often the registry is swept for idle sessions
    pub sweep_interval: Duration,
    /// Live sessions allowed at once
    pub max_sessions: usize,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            idle_ttl: Duration::from_secs(30 * 60),
            sweep_interval: Duration::from_secs(60),
            max_sessions: 1000,
        }
    }
}

/// Errors from the session registry
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Too many active sessions ({0}); try again later")]
    CapacityReached(usize),
}

/// Manager for all live lesson sessions
pub struct SessionManager {
    tutor: Arc<dyn TutorClient>,
    limits: SessionLimits,
    sessions: RwLock<HashMap<String, Arc<LessonRuntime>>>,
}

impl SessionManager {
    pub fn new(tutor: Arc<dyn TutorClient>, limits: SessionLimits) -> Self {
        Self {
            tutor,
            limits,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Start the background task that drops idle sessions.
    /// Stops on its own once the manager is dropped.
    pub fn start_idle_sweeper(self: &Arc<Self>) {
        let manager: Weak<Self> = Arc::downgrade(self);
        let period = self.limits.sweep_interval;

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // First tick completes immediately, skip it
            interval.tick().await;

            loop {
                interval.tick().await;
                let Some(manager) = manager.upgrade() else {
                    break;
                };
                let evicted = manager.evict_idle().await;
                if evicted > 0 {
                    let live = manager.live_count().await;
                    tracing::debug!(evicted, live, "Swept idle sessions");
                }
            }
            tracing::debug!("Idle session sweeper stopped");
        });
    }

    /// Start a new session at the intro step
    pub async fn create(&self) -> Result<Arc<LessonRuntime>, SessionError> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.limits.max_sessions {
            tracing::warn!(live = sessions.len(), "Session capacity reached");
            return Err(SessionError::CapacityReached(self.limits.max_sessions));
        }

        let id = uuid::Uuid::new_v4().to_string();
        let runtime = Arc::new(LessonRuntime::new(id.clone(), Arc::clone(&self.tutor)));
        sessions.insert(id.clone(), Arc::clone(&runtime));
        tracing::info!(session_id = %id, live = sessions.len(), "Created lesson session");
        Ok(runtime)
    }

    pub async fn get(&self, id: &str) -> Option<Arc<LessonRuntime>> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Drop a session. Returns false if it did not exist.
    pub async fn remove(&self, id: &str) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            tracing::info!(session_id = %id, "Removed lesson session");
        }
        removed
    }

    /// Drop every session idle past the TTL. Returns how many were dropped.
    pub async fn evict_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;

        let mut expired = Vec::new();
        for (id, runtime) in sessions.iter() {
            if runtime.is_idle(self.limits.idle_ttl).await {
                expired.push(id.clone());
            }
        }
        for id in &expired {
            sessions.remove(id);
            tracing::info!(session_id = %id, "Evicted idle lesson session");
        }

        expired.len()
    }

    pub async fn live_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
