//! Error types for the drill engine and word repositories.

use thiserror::Error;

use crate::questions::Mode;
use crate::session::SessionState;
use crate::words::WordKind;

/// Failures raised by a word repository or the import pipeline.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The backing store could not be reached.
    #[error("word repository unavailable: {0}")]
    Unavailable(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel error: {0}")]
    Excel(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A word was submitted with a blank required field.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// An import file lacks a column the word kind needs.
    #[error("missing required '{0}' column in file header")]
    MissingColumn(&'static str),

    #[error("unsupported file format: .{0}")]
    UnsupportedFormat(String),

    #[error("invalid article '{0}' (expected der, die or das)")]
    InvalidArticle(String),

    /// A blocking storage task panicked or was cancelled.
    #[error("storage task failed: {0}")]
    Task(String),
}

/// Failures raised by the practice session engine.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The pool holds no words, so there is nothing to practice.
    #[error("no {0}s available, add some words first")]
    EmptyPool(WordKind),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Conjugation drills only make sense for verbs.
    #[error("{mode} mode is not available for {kind}s")]
    IncompatibleMode { mode: Mode, kind: WordKind },

    #[error("expected a {expected} pool, found {found} entries")]
    PoolKindMismatch { expected: WordKind, found: WordKind },

    /// The operation is not valid in the current state of the session.
    #[error("cannot {operation} while session is {state}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },

    /// The answer shape does not fit the active question.
    #[error("answer does not fit a {0} question")]
    AnswerKind(Mode),

    #[error("option {index} is out of range ({len} options)")]
    OptionOutOfRange { index: usize, len: usize },

    #[error("only flashcards can be revealed")]
    NotFlashcard,
}
