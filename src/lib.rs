//! Vokabel Core - German verb and noun drill engine
//!
//! Provides the practice session state machine, question generation for
//! flashcard, multiple-choice, typing and conjugation drills, and a SQLite
//! word store with CSV/Excel import.

pub mod config;
pub mod db;
pub mod error;
pub mod fuzzy;
pub mod import;
pub mod progress;
pub mod questions;
pub mod repository;
pub mod session;
pub mod words;

pub use config::{load_config, DrillConfig};
pub use db::SqliteRepository;
pub use error::{RepositoryError, SessionError};
pub use fuzzy::{answers_match, check_match, MatchResult};
pub use progress::{KindProgress, ProgressSummary, SessionStats};
pub use questions::{Answer, AnswerOutcome, Direction, Mode, Question, Side, Tense};
pub use repository::{MemoryRepository, WordRepository};
pub use session::{ActiveQuestion, PracticeSession, SessionSettings, SessionState};
pub use words::{Article, Noun, Verb, Word, WordKind, WordPool};
