mod classifier;
mod dispatch;
mod rubric;
mod types;

pub use classifier::{classify, extract_number};
pub use dispatch::ModelDispatcher;
pub use rubric::{RubricEvaluator, RubricScores};
pub use types::{ModelMetrics, ModelResult, PromptAnalysis, ScoringFn};
