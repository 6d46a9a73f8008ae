//! Typed-answer comparison and near-miss feedback

use strsim::{jaro_winkler, levenshtein, normalized_levenshtein};

/// Similarity at or above which a wrong answer is reported as a near miss
const NEAR_MISS_THRESHOLD: f64 = 0.5;

/// Result of comparing a typed answer with the stored form
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub is_correct: bool,
    pub similarity_score: f64,
    pub feedback: String,
}

/// Trim outer whitespace and lowercase; inner whitespace is kept as typed.
fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Case-insensitive equality ignoring leading/trailing whitespace only
pub fn answers_match(user_input: &str, expected: &str) -> bool {
    normalize(user_input) == normalize(expected)
}

/// Check a typed answer. Correctness is exact after normalization; the
/// similarity score only shapes the feedback text.
pub fn check_match(user_input: &str, expected: &str) -> MatchResult {
    if answers_match(user_input, expected) {
        return MatchResult {
            is_correct: true,
            similarity_score: 1.0,
            feedback: "Correct!".to_string(),
        };
    }

    let input_normalized = normalize(user_input);
    let expected_normalized = normalize(expected);

    let levenshtein_sim = normalized_levenshtein(&input_normalized, &expected_normalized);
    let jaro_sim = jaro_winkler(&input_normalized, &expected_normalized);
    // Jaro-Winkler weighs typos near the end of a word more gently
    let similarity = levenshtein_sim * 0.4 + jaro_sim * 0.6;

    let feedback = if similarity >= NEAR_MISS_THRESHOLD {
        let distance = levenshtein(&input_normalized, &expected_normalized);
        format!("Almost! {} characters off. Expected: '{}'", distance, expected)
    } else {
        format!("Incorrect. Expected: '{}'", expected)
    };

    MatchResult {
        is_correct: false,
        similarity_score: similarity,
        feedback,
    }
}
