//! Model Arena compares hosted chat models on a single prompt.
//!
//! A prompt is classified as objective (arithmetic, letter counts, word
//! counts, all with mechanically computable answers) or subjective, fanned
//! out to every model in the catalog concurrently, and each response is
//! scored either against the computed ground truth or by an LLM judge. The
//! `api` feature adds the axum server and the dashboard UI on top.
//!
//! ```no_run
//! use modelarena::backends::openai::OpenAICompatible;
//! use modelarena::catalog::default_catalog;
//! use modelarena::evaluator::{ModelDispatcher, RubricEvaluator};
//! use modelarena::ChatProvider;
//!
//! # async fn run() {
//! let base = OpenAICompatible::new(
//!     std::env::var("OPENAI_API_KEY").unwrap_or_default(),
//!     "https://api.openai.com/v1",
//!     "gpt-4o-mini",
//!     Some(1024),
//!     Some(0.7),
//!     Some(60),
//!     None,
//! );
//! let providers = default_catalog()
//!     .into_iter()
//!     .map(|entry| {
//!         let provider: Box<dyn ChatProvider> = Box::new(base.for_model(entry.id.as_str()));
//!         (entry, provider)
//!     })
//!     .collect();
//! let rubric = RubricEvaluator::new(Box::new(base.clone()));
//! let dispatcher = ModelDispatcher::new(providers, rubric);
//!
//! for result in dispatcher.evaluate("How many r's are in strawberry?").await {
//!     println!("{}: {:?}", result.model, result.metrics);
//! }
//! # }
//! ```

pub mod backends;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod error;
pub mod evaluator;

#[cfg(feature = "api")]
pub mod api;

pub use catalog::ModelEntry;
pub use chat::{ChatMessage, ChatProvider, ChatResponse, ChatRole, Usage};
pub use error::ArenaError;
pub use evaluator::{
    classify, ModelDispatcher, ModelMetrics, ModelResult, PromptAnalysis, RubricEvaluator,
    RubricScores,
};
