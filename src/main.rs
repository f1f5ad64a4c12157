//! Limits tutor - scripted calculus lesson with an LLM-backed tutor
//!
//! A Rust backend driving a fixed limits-to-derivatives lesson through a
//! pure state machine, with free-form questions relayed to a chat model.

mod api;
mod config;
mod lesson;
mod llm;
mod relay;
mod runtime;
mod state_machine;

use api::{create_router, AppState};
use config::Config;
use llm::{LlmService, LoggingService, OpenAIService};
use relay::{RelayConfig, TutorRelay};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "limits_tutor=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = Config::from_env();

    // Initialize the completion service
    let llm: Option<Arc<dyn LlmService>> = match &config.openai_api_key {
        Some(key) => {
            let service = OpenAIService::new(key, &config.model, &config.openai_base_url)?;
            let service: Arc<dyn LlmService> = Arc::new(LoggingService::new(Arc::new(service)));
            Some(service)
        }
        None => None,
    };

    let relay = Arc::new(TutorRelay::new(llm, RelayConfig::default()));
    if relay.is_configured() {
        tracing::info!(
            model = %config.model,
            url = %config.openai_base_url,
            "Tutor relay configured"
        );
    } else {
        tracing::warn!("No OpenAI API key configured. Set OPENAI_API_KEY.");
    }
    tracing::info!(
        idle_ttl_secs = config.sessions.idle_ttl.as_secs(),
        max_sessions = config.sessions.max_sessions,
        "Session limits"
    );
    let state = AppState::new(relay, config.sessions);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Limits tutor listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
