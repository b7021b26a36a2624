use axum::extract::State;
use axum::response::Html;
use axum::Json;
use chrono::Utc;
use uuid::Uuid;

use super::helpers::{bad_request, ApiResult};
use crate::api::types::{EvaluateRequest, HealthResponse};
use crate::api::ServerState;
use crate::evaluator::ModelResult;

static DASHBOARD: &str = include_str!("../dashboard.html");

/// `POST /api/evaluate` — fan the prompt out and return one result per model.
pub async fn handle_evaluate(
    State(state): State<ServerState>,
    Json(req): Json<EvaluateRequest>,
) -> ApiResult<Json<Vec<ModelResult>>> {
    let prompt = req.prompt.trim();
    if prompt.is_empty() {
        return Err(bad_request("Prompt is required"));
    }

    let eval_id = Uuid::new_v4();
    log::info!(
        "Evaluation {eval_id}: dispatching to {} models",
        state.dispatcher.model_count()
    );
    let results = state.dispatcher.evaluate(prompt).await;
    log::info!(
        "Evaluation {eval_id}: {} succeeded, {} failed",
        results.iter().filter(|r| r.error.is_none()).count(),
        results.iter().filter(|r| r.error.is_some()).count()
    );

    Ok(Json(results))
}

/// `GET /` — the dashboard page.
pub async fn handle_index() -> Html<&'static str> {
    Html(DASHBOARD)
}

/// `GET /health` — liveness probe.
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        time: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::http::StatusCode;

    use super::*;
    use crate::catalog::ModelEntry;
    use crate::chat::{ChatMessage, ChatProvider, ChatResponse};
    use crate::error::ArenaError;
    use crate::evaluator::{ModelDispatcher, RubricEvaluator};

    #[derive(Debug)]
    struct Reply(&'static str);

    impl std::fmt::Display for Reply {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    impl ChatResponse for Reply {
        fn text(&self) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    struct Stub(Result<&'static str, &'static str>);

    #[async_trait]
    impl ChatProvider for Stub {
        async fn chat(
            &self,
            _messages: &[ChatMessage],
        ) -> Result<Box<dyn ChatResponse>, ArenaError> {
            match self.0 {
                Ok(text) => Ok(Box::new(Reply(text))),
                Err(message) => Err(ArenaError::HttpError(message.to_string())),
            }
        }
    }

    fn state() -> ServerState {
        let providers: Vec<(ModelEntry, Box<dyn ChatProvider>)> = vec![
            (ModelEntry::new("up", "Up", 0.001), Box::new(Stub(Ok("4")))),
            (ModelEntry::new("down", "Down", 0.001), Box::new(Stub(Err("boom")))),
        ];
        let rubric = RubricEvaluator::new(Box::new(Stub(Ok("{\"accuracy\": 50, \"relevancy\": 50}"))));
        ServerState {
            dispatcher: Arc::new(ModelDispatcher::new(providers, rubric)),
        }
    }

    #[tokio::test]
    async fn empty_prompt_is_rejected() {
        let err = handle_evaluate(
            State(state()),
            Json(EvaluateRequest {
                prompt: "   ".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn evaluate_returns_one_result_per_model() {
        let Json(results) = handle_evaluate(
            State(state()),
            Json(EvaluateRequest {
                prompt: "What is 2 + 2?".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].model, "up");
        assert_eq!(results[0].metrics.accuracy, 1.0);
        assert!(results[1].error.is_some());
    }

    #[test]
    fn dashboard_page_is_embedded() {
        assert!(DASHBOARD.contains("<html"));
        assert!(DASHBOARD.contains("/api/evaluate"));
    }
}
