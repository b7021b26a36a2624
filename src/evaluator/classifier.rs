//! Prompt classification.
//!
//! A prompt is objective when its correct answer can be computed from the
//! prompt text alone. Three templates are recognized: letter counts, word
//! counts, and two-operand arithmetic. Everything else is subjective and is
//! scored by the judge model.

use std::sync::OnceLock;

use regex::Regex;

use super::types::PromptAnalysis;

/// Tolerance for arithmetic answers.
const ARITHMETIC_TOLERANCE: f64 = 0.01;

static LETTER_COUNT: OnceLock<Regex> = OnceLock::new();
static WORD_COUNT: OnceLock<Regex> = OnceLock::new();
static ARITHMETIC: OnceLock<Regex> = OnceLock::new();
static NUMBER: OnceLock<Regex> = OnceLock::new();

fn letter_count_re() -> &'static Regex {
    LETTER_COUNT.get_or_init(|| {
        Regex::new(
            r#"(?i)how many (?:times does the letter\s+['"]?([a-z])['"]?\s+appear|['"]?([a-z])['"]?'s(?:\s+are(?:\s+there)?)?)\s+in\s+(?:the word\s+)?['"]?([a-z]+)['"]?"#,
        )
        .expect("letter count regex")
    })
}

fn word_count_re() -> &'static Regex {
    WORD_COUNT.get_or_init(|| {
        Regex::new(r#"(?i)how many words are (?:there )?in\s+(.+)"#).expect("word count regex")
    })
}

fn arithmetic_re() -> &'static Regex {
    ARITHMETIC.get_or_init(|| {
        // Anchored at the end so longer expressions ("2 + 2 + 2") fall
        // through to subjective scoring instead of grading against a
        // truncated ground truth.
        Regex::new(
            r"(?i)(?:what is|what's|calculate|compute)\s+(-?\d+(?:\.\d+)?)\s*([-+*/x×])\s*(-?\d+(?:\.\d+)?)\s*[?.!]?\s*$",
        )
        .expect("arithmetic regex")
    })
}

fn number_re() -> &'static Regex {
    NUMBER.get_or_init(|| Regex::new(r"-?\d+(?:\.\d+)?").expect("number regex"))
}

/// Extracts the first numeric token from a model's response text.
pub fn extract_number(text: &str) -> Option<f64> {
    number_re().find(text)?.as_str().parse().ok()
}

/// Classifies a prompt, computing the ground truth for objective templates.
pub fn classify(prompt: &str) -> PromptAnalysis {
    if let Some(expected) = match_letter_count(prompt) {
        return exact_match(expected);
    }
    if let Some(expected) = match_word_count(prompt) {
        return exact_match(expected);
    }
    if let Some(expected) = match_arithmetic(prompt) {
        return PromptAnalysis::Objective {
            expected,
            score: Box::new(move |response| match extract_number(response) {
                Some(answer) if (answer - expected).abs() <= ARITHMETIC_TOLERANCE => 1.0,
                _ => 0.0,
            }),
        };
    }
    PromptAnalysis::Subjective
}

fn exact_match(expected: f64) -> PromptAnalysis {
    PromptAnalysis::Objective {
        expected,
        score: Box::new(move |response| match extract_number(response) {
            Some(answer) if answer == expected => 1.0,
            _ => 0.0,
        }),
    }
}

fn match_letter_count(prompt: &str) -> Option<f64> {
    let caps = letter_count_re().captures(prompt)?;
    let letter = caps
        .get(1)
        .or_else(|| caps.get(2))?
        .as_str()
        .to_lowercase()
        .chars()
        .next()?;
    let word = caps.get(3)?.as_str().to_lowercase();
    Some(word.chars().filter(|c| *c == letter).count() as f64)
}

fn match_word_count(prompt: &str) -> Option<f64> {
    let caps = word_count_re().captures(prompt)?;
    let target = caps
        .get(1)?
        .as_str()
        .trim()
        .trim_end_matches(['?', '.', '!'])
        .trim_matches(['"', '\'', ':']);
    let count = target.split_whitespace().count();
    if count == 0 {
        return None;
    }
    Some(count as f64)
}

fn match_arithmetic(prompt: &str) -> Option<f64> {
    let caps = arithmetic_re().captures(prompt)?;
    let lhs: f64 = caps.get(1)?.as_str().parse().ok()?;
    let op = caps.get(2)?.as_str();
    let rhs: f64 = caps.get(3)?.as_str().parse().ok()?;
    match op {
        "+" => Some(lhs + rhs),
        "-" => Some(lhs - rhs),
        "*" | "x" | "×" => Some(lhs * rhs),
        // A zero divisor has no computable answer; let the prompt fall
        // through to subjective scoring.
        "/" if rhs != 0.0 => Some(lhs / rhs),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn expect_objective(prompt: &str) -> (f64, Box<super::super::types::ScoringFn>) {
        match classify(prompt) {
            PromptAnalysis::Objective { expected, score } => (expected, score),
            PromptAnalysis::Subjective => panic!("expected objective: {prompt}"),
        }
    }

    #[rstest]
    #[case("What is 15 * 24?", 360.0)]
    #[case("what's 100 - 42", 58.0)]
    #[case("Calculate 7 + 3", 10.0)]
    #[case("compute 10 / 4", 2.5)]
    #[case("What is 3 x 5?", 15.0)]
    fn arithmetic_ground_truth(#[case] prompt: &str, #[case] answer: f64) {
        let (expected, _) = expect_objective(prompt);
        assert_eq!(expected, answer);
    }

    #[test]
    fn arithmetic_scores_within_tolerance_only() {
        let (_, score) = expect_objective("compute 10 / 3");
        assert_eq!(score("The answer is 3.333"), 1.0);
        assert_eq!(score("3.34"), 1.0);
        assert_eq!(score("3.35"), 0.0);
        assert_eq!(score("roughly 3"), 0.0);
        assert_eq!(score("no idea"), 0.0);
    }

    #[test]
    fn division_by_zero_is_subjective() {
        assert!(!classify("What is 5 / 0?").is_objective());
    }

    #[rstest]
    #[case("What is 2 + 2 + 2?")]
    #[case("calculate 1 + 2 * 3")]
    fn chained_expressions_are_subjective(#[case] prompt: &str) {
        assert!(!classify(prompt).is_objective());
    }

    #[rstest]
    #[case("How many times does the letter 'r' appear in 'strawberry'?", 3.0)]
    #[case("How many r's are in strawberry?", 3.0)]
    #[case("how many times does the letter S appear in Mississippi", 4.0)]
    fn letter_count_ground_truth(#[case] prompt: &str, #[case] answer: f64) {
        let (expected, _) = expect_objective(prompt);
        assert_eq!(expected, answer);
    }

    #[test]
    fn letter_count_is_binary_exact_match() {
        let (_, score) = expect_objective("How many r's are in strawberry?");
        assert_eq!(score("There are 3 r's."), 1.0);
        assert_eq!(score("2"), 0.0);
        assert_eq!(score("several"), 0.0);
    }

    #[test]
    fn word_count_ground_truth() {
        let (expected, score) =
            expect_objective("How many words are in \"the quick brown fox jumps\"?");
        assert_eq!(expected, 5.0);
        assert_eq!(score("5 words"), 1.0);
        assert_eq!(score("I count 4."), 0.0);
    }

    #[rstest]
    #[case("Explain the theory of relativity")]
    #[case("Write a haiku about autumn")]
    #[case("What is the capital of France?")]
    fn unmatched_prompts_are_subjective(#[case] prompt: &str) {
        assert!(!classify(prompt).is_objective());
    }

    #[rstest]
    #[case("The answer is 42.", Some(42.0))]
    #[case("-3.5 degrees", Some(-3.5))]
    #[case("no numbers here", None)]
    fn number_extraction(#[case] text: &str, #[case] expected: Option<f64>) {
        assert_eq!(extract_number(text), expected);
    }
}
