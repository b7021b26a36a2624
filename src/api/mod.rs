//! HTTP surface: the evaluation endpoint and the dashboard page.

mod handlers;
pub mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::backends::openai::OpenAICompatible;
use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::evaluator::{ModelDispatcher, RubricEvaluator};

pub use handlers::{handle_evaluate, handle_health, handle_index};

/// Judge calls run colder than the compared models.
const JUDGE_TEMPERATURE: f32 = 0.1;

/// Shared state for the evaluation server.
#[derive(Clone)]
pub struct ServerState {
    pub dispatcher: Arc<ModelDispatcher>,
}

impl ServerState {
    /// Builds providers for every catalog entry plus the judge, all on the
    /// same host.
    pub fn from_config(config: &ArenaConfig, api_key: String) -> Result<Self, ArenaError> {
        let judge_model = config
            .judge_model
            .clone()
            .or_else(|| config.models.first().map(|m| m.id.clone()))
            .ok_or_else(|| ArenaError::ConfigError("No models configured".to_string()))?;

        let base = OpenAICompatible::new(
            api_key,
            config.base_url.clone(),
            judge_model,
            Some(config.max_tokens),
            Some(config.temperature),
            config.timeout_seconds,
            None,
        );

        let providers = config
            .models
            .iter()
            .map(|entry| {
                let provider: Box<dyn crate::chat::ChatProvider> =
                    Box::new(base.for_model(entry.id.as_str()));
                (entry.clone(), provider)
            })
            .collect();

        let rubric = RubricEvaluator::new(Box::new(base.with_temperature(JUDGE_TEMPERATURE)));

        Ok(Self {
            dispatcher: Arc::new(ModelDispatcher::new(providers, rubric)),
        })
    }
}

/// Builds the application router.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(handle_index))
        .route("/health", get(handle_health))
        .route("/api/evaluate", post(handle_evaluate))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds and serves until the process is stopped.
pub async fn serve(state: ServerState, addr: SocketAddr) -> Result<(), ArenaError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ArenaError::Generic(format!("Failed to bind {addr}: {e}")))?;
    log::info!("Listening on http://{addr}");
    axum::serve(listener, router(state))
        .await
        .map_err(|e| ArenaError::Generic(e.to_string()))
}
