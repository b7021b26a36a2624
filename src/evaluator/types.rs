use serde::{Deserialize, Serialize};

/// Scoring function applied to a model's response text for objective prompts.
pub type ScoringFn = dyn Fn(&str) -> f64 + Send + Sync;

/// Classification of a prompt by the prompt classifier.
pub enum PromptAnalysis {
    /// The correct answer is mechanically computable from the prompt itself.
    Objective {
        /// The ground-truth numeric answer.
        expected: f64,
        /// Checks a model's response against the ground truth.
        score: Box<ScoringFn>,
    },
    /// No template matched; the response is scored by a judge model.
    Subjective,
}

impl PromptAnalysis {
    pub fn is_objective(&self) -> bool {
        matches!(self, PromptAnalysis::Objective { .. })
    }
}

impl std::fmt::Debug for PromptAnalysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PromptAnalysis::Objective { expected, .. } => f
                .debug_struct("Objective")
                .field("expected", expected)
                .finish_non_exhaustive(),
            PromptAnalysis::Subjective => write!(f, "Subjective"),
        }
    }
}

/// Per-model quality and resource metrics for one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetrics {
    /// Correctness in [0, 1].
    pub accuracy: f64,
    /// Relevance to the prompt in [0, 1].
    pub relevancy: f64,
    /// Wall-clock latency of the model call in milliseconds.
    pub response_time: u128,
    /// Flat cost of the call in USD.
    pub cost: f64,
    /// Total tokens consumed by the call.
    pub token_count: u32,
}

/// Outcome of evaluating one model against the submitted prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelResult {
    /// Model identifier.
    pub model: String,
    /// Response text, absent when the call failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    pub metrics: ModelMetrics,
    /// Error string for a failed call, absent on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
