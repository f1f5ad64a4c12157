//! Server configuration from environment variables

use crate::llm::OPENAI_CHAT_URL;
use crate::runtime::SessionLimits;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    /// Blank values count as missing
    pub openai_api_key: Option<String>,
    /// Full chat-completions URL
    pub openai_base_url: String,
    pub model: String,
    pub sessions: SessionLimits,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            port: non_blank("TUTOR_PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(DEFAULT_PORT),
            openai_api_key: non_blank("OPENAI_API_KEY"),
            openai_base_url: non_blank("OPENAI_BASE_URL")
                .unwrap_or_else(|| OPENAI_CHAT_URL.to_string()),
            model: non_blank("TUTOR_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            sessions: Self::session_limits(&non_blank),
        }
    }

    fn session_limits(non_blank: &impl Fn(&str) -> Option<String>) -> SessionLimits {
        let defaults = SessionLimits::default();
        SessionLimits {
            idle_ttl: non_blank("TUTOR_SESSION_TTL_SECS")
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map_or(defaults.idle_ttl, Duration::from_secs),
            max_sessions: non_blank("TUTOR_MAX_SESSIONS")
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|max| *max > 0)
                .unwrap_or(defaults.max_sessions),
            ..defaults
        }
    }
}
