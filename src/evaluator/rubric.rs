//! Rubric scoring.
//!
//! Objective prompts are scored locally with the classifier's ground truth.
//! Subjective prompts cost one extra chat call to a judge model, which is
//! asked for JSON accuracy/relevancy scores on a 0-100 scale. A judge that
//! fails to answer, or answers with anything unparsable, yields the neutral
//! 0.5/0.5 default rather than failing the evaluation.

use serde::{Deserialize, Serialize};

use crate::chat::{ChatMessage, ChatProvider};
use crate::error::ArenaError;

use super::types::PromptAnalysis;

/// Accuracy/relevancy pair, always within [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RubricScores {
    pub accuracy: f64,
    pub relevancy: f64,
}

impl RubricScores {
    /// Fallback when the judge cannot produce a verdict.
    pub const NEUTRAL: RubricScores = RubricScores {
        accuracy: 0.5,
        relevancy: 0.5,
    };

    fn binary(score: f64) -> Self {
        Self {
            accuracy: score,
            relevancy: score,
        }
    }
}

/// Raw verdict as the judge model reports it, on a 0-100 scale.
#[derive(Debug, Deserialize)]
struct JudgeVerdict {
    accuracy: f64,
    relevancy: f64,
}

/// Scores a model response, either directly or by asking a judge model.
pub struct RubricEvaluator {
    judge: Box<dyn ChatProvider>,
}

impl RubricEvaluator {
    pub fn new(judge: Box<dyn ChatProvider>) -> Self {
        Self { judge }
    }

    /// Scores `response` to `prompt` according to its classification.
    pub async fn score(
        &self,
        analysis: &PromptAnalysis,
        prompt: &str,
        response: &str,
    ) -> RubricScores {
        match analysis {
            PromptAnalysis::Objective { score, .. } => RubricScores::binary(score(response)),
            PromptAnalysis::Subjective => match self.ask_judge(prompt, response).await {
                Ok(scores) => scores,
                Err(err) => {
                    log::warn!("Judge fallback to neutral scores: {err}");
                    RubricScores::NEUTRAL
                }
            },
        }
    }

    async fn ask_judge(&self, prompt: &str, response: &str) -> Result<RubricScores, ArenaError> {
        let instruction = format!(
            "You are grading a model's answer.\n\n\
             ## Prompt\n{prompt}\n\n\
             ## Answer\n{response}\n\n\
             Rate the answer for accuracy and relevancy on a 0-100 scale.\n\
             Reply with only a JSON object: {{\"accuracy\": <0-100>, \"relevancy\": <0-100>}}"
        );
        let messages = [ChatMessage::user().content(instruction).build()];
        let reply = self.judge.chat(&messages).await?;
        let text = reply
            .text()
            .ok_or_else(|| ArenaError::ProviderError("Empty judge response".to_string()))?;
        let raw = first_json_object(&text).ok_or_else(|| ArenaError::ResponseFormatError {
            message: "No JSON object in judge response".to_string(),
            raw_response: text.clone(),
        })?;
        let verdict: JudgeVerdict = serde_json::from_str(raw)?;
        Ok(RubricScores {
            accuracy: normalize(verdict.accuracy),
            relevancy: normalize(verdict.relevancy),
        })
    }
}

/// Maps a 0-100 judge score into [0, 1].
fn normalize(score: f64) -> f64 {
    if score.is_nan() {
        return 0.5;
    }
    (score / 100.0).clamp(0.0, 1.0)
}

/// Returns the first balanced `{...}` object found in `text`.
fn first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}
