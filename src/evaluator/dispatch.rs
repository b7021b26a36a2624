use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;

use crate::catalog::ModelEntry;
use crate::chat::{ChatMessage, ChatProvider, ChatResponse};
use crate::error::ArenaError;

use super::classifier::classify;
use super::rubric::RubricEvaluator;
use super::types::{ModelMetrics, ModelResult, PromptAnalysis};

/// Runs one prompt against every configured model concurrently and scores
/// each reply.
pub struct ModelDispatcher {
    providers: Vec<(ModelEntry, Box<dyn ChatProvider>)>,
    rubric: RubricEvaluator,
}

impl ModelDispatcher {
    pub fn new(providers: Vec<(ModelEntry, Box<dyn ChatProvider>)>, rubric: RubricEvaluator) -> Self {
        Self { providers, rubric }
    }

    pub fn model_count(&self) -> usize {
        self.providers.len()
    }

    /// Evaluates a prompt against the whole comparison set.
    ///
    /// Always yields exactly one result per configured model; a failed call
    /// becomes an inline error string on that model's result and never
    /// affects the others.
    pub async fn evaluate(&self, prompt: &str) -> Vec<ModelResult> {
        let analysis = classify(prompt);
        log::debug!("Prompt classified as {analysis:?}");

        let messages = Arc::new(vec![ChatMessage::user().content(prompt).build()]);
        let calls = self.providers.iter().map(|(entry, provider)| {
            let messages = messages.clone();
            async move {
                let start = Instant::now();
                let outcome = provider.chat(&messages).await;
                (entry, outcome, start.elapsed().as_millis())
            }
        });
        let outcomes = join_all(calls).await;

        // Scoring runs concurrently too: each subjective response costs one
        // judge call.
        let scored = outcomes.into_iter().map(|(entry, outcome, elapsed)| {
            let analysis = &analysis;
            async move {
                match outcome {
                    Ok(reply) => self.score_reply(entry, reply, elapsed, analysis, prompt).await,
                    Err(err) => failed_result(entry, elapsed, err),
                }
            }
        });
        join_all(scored).await
    }

    async fn score_reply(
        &self,
        entry: &ModelEntry,
        reply: Box<dyn ChatResponse>,
        elapsed: u128,
        analysis: &PromptAnalysis,
        prompt: &str,
    ) -> ModelResult {
        let text = reply.text().unwrap_or_default();
        let token_count = reply
            .usage()
            .map(|u| u.total_tokens)
            .unwrap_or_else(|| estimate_tokens(&text));
        let scores = self.rubric.score(analysis, prompt, &text).await;
        ModelResult {
            model: entry.id.clone(),
            response: Some(text),
            metrics: ModelMetrics {
                accuracy: scores.accuracy,
                relevancy: scores.relevancy,
                response_time: elapsed,
                cost: entry.cost(token_count),
                token_count,
            },
            error: None,
        }
    }
}

fn failed_result(entry: &ModelEntry, elapsed: u128, err: ArenaError) -> ModelResult {
    log::warn!("Error from model {}: {err}", entry.id);
    ModelResult {
        model: entry.id.clone(),
        response: None,
        metrics: ModelMetrics {
            accuracy: 0.0,
            relevancy: 0.0,
            response_time: elapsed,
            cost: 0.0,
            token_count: 0,
        },
        error: Some(err.to_string()),
    }
}

/// Rough token estimate for hosts that omit the usage block.
fn estimate_tokens(text: &str) -> u32 {
    (text.len() / 4) as u32
}
