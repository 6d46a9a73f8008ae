//! Progress tracking - per-session score and stored learning totals

use std::fmt;

use serde::{Deserialize, Serialize};

/// Running score of one practice session
///
/// Only [`SessionStats::record`] mutates the counters, so
/// `total == correct + incorrect` holds at every point. Serialize-only for
/// the same reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    correct: u32,
    incorrect: u32,
    total: u32,
}

impl SessionStats {
    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Count one answered question.
    pub fn record(&mut self, is_correct: bool) {
        self.total += 1;
        if is_correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
    }

    pub fn accuracy_percent(&self) -> f64 {
        if self.total > 0 {
            (self.correct as f64 / self.total as f64) * 100.0
        } else {
            0.0
        }
    }
}

impl fmt::Display for SessionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Correct: {} | Incorrect: {} | Accuracy: {:.1}%",
            self.correct,
            self.incorrect,
            self.accuracy_percent()
        )
    }
}

/// Stored words of one kind and how many have been practiced at least once
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindProgress {
    pub total: u64,
    pub learned: u64,
}

/// Learning totals across the whole word store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub verbs: KindProgress,
    pub nouns: KindProgress,
}
