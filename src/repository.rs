//! Word repository abstraction and an in-memory implementation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::RepositoryError;
use crate::words::{Word, WordKind};

/// Source of word lists and sink for learned-word increments.
#[async_trait]
pub trait WordRepository: Send + Sync {
    /// Human-readable backend name (e.g. "sqlite").
    fn name(&self) -> &str;

    /// Fetch every stored word of `kind`.
    async fn fetch_words(&self, kind: WordKind) -> Result<Vec<Word>, RepositoryError>;

    /// Record that the word identified by `key` was practiced once more.
    async fn report_progress(&self, kind: WordKind, key: &str) -> Result<(), RepositoryError>;
}

/// In-process repository backed by a vector of words.
///
/// Failure switches let callers simulate an unreachable store for either
/// operation independently.
#[derive(Default)]
pub struct MemoryRepository {
    words: Vec<Word>,
    learned: Mutex<HashMap<(WordKind, String), u32>>,
    report_calls: AtomicU32,
    fail_fetch: AtomicBool,
    fail_reports: AtomicBool,
}

impl MemoryRepository {
    pub fn new(words: Vec<Word>) -> Self {
        Self {
            words,
            ..Default::default()
        }
    }

    /// Make every subsequent `fetch_words` fail with `Unavailable`.
    pub fn set_fetch_failure(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::Relaxed);
    }

    /// Make every subsequent `report_progress` fail with `Unavailable`.
    pub fn set_report_failure(&self, fail: bool) {
        self.fail_reports.store(fail, Ordering::Relaxed);
    }

    /// Number of `report_progress` calls, failed ones included.
    pub fn report_calls(&self) -> u32 {
        self.report_calls.load(Ordering::Relaxed)
    }

    /// Successful reports recorded for `key`.
    pub fn learned_count(&self, kind: WordKind, key: &str) -> u32 {
        self.learned
            .lock()
            .map(|m| m.get(&(kind, key.to_string())).copied().unwrap_or(0))
            .unwrap_or(0)
    }
}

#[async_trait]
impl WordRepository for MemoryRepository {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch_words(&self, kind: WordKind) -> Result<Vec<Word>, RepositoryError> {
        if self.fail_fetch.load(Ordering::Relaxed) {
            return Err(RepositoryError::Unavailable("memory store offline".into()));
        }
        Ok(self
            .words
            .iter()
            .filter(|w| w.kind() == kind)
            .cloned()
            .collect())
    }

    async fn report_progress(&self, kind: WordKind, key: &str) -> Result<(), RepositoryError> {
        self.report_calls.fetch_add(1, Ordering::Relaxed);
        if self.fail_reports.load(Ordering::Relaxed) {
            return Err(RepositoryError::Unavailable("memory store offline".into()));
        }
        let mut learned = self
            .learned
            .lock()
            .map_err(|e| RepositoryError::Unavailable(e.to_string()))?;
        *learned.entry((kind, key.to_string())).or_insert(0) += 1;
        Ok(())
    }
}
