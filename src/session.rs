//! Practice session engine.
//!
//! A [`PracticeSession`] owns the word pool, the session settings, the
//! question on screen and the running score. Hosts drive it through
//! `load_pool` → `start_session` → (`next_question` → `submit_answer`)* →
//! `end_session`. Progress reports go to the [`WordRepository`] as detached
//! tasks and never hold up the quiz.

use std::fmt;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::SessionError;
use crate::progress::SessionStats;
use crate::questions::{Answer, AnswerOutcome, Direction, Mode, Question, Side, DEFAULT_CHOICES};
use crate::repository::WordRepository;
use crate::words::{Word, WordKind, WordPool};

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    PoolLoaded,
    InRound,
    AwaitingAnswer,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionState::Idle => "idle",
            SessionState::PoolLoaded => "waiting to start",
            SessionState::InRound => "between questions",
            SessionState::AwaitingAnswer => "awaiting an answer",
        };
        f.write_str(s)
    }
}

/// Configuration fixed at `start_session`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub kind: WordKind,
    pub mode: Mode,
    pub direction: Direction,
}

/// The current word together with the question built from it
#[derive(Debug, Clone)]
pub struct ActiveQuestion {
    word: Word,
    side: Side,
    question: Question,
}

impl ActiveQuestion {
    pub fn word(&self) -> &Word {
        &self.word
    }

    /// Direction this particular question was resolved to
    pub fn side(&self) -> Side {
        self.side
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn prompt(&self) -> String {
        self.question.prompt()
    }
}

/// Single-writer practice session over one word pool.
pub struct PracticeSession<R = StdRng> {
    repository: Arc<dyn WordRepository>,
    rng: R,
    choices: usize,
    state: SessionState,
    pool: Option<WordPool>,
    settings: Option<SessionSettings>,
    active: Option<ActiveQuestion>,
    revealed: bool,
    stats: SessionStats,
    reports: Vec<JoinHandle<()>>,
}

impl PracticeSession<StdRng> {
    /// Session drawing randomness from OS entropy.
    pub fn new(repository: Arc<dyn WordRepository>) -> Self {
        Self::with_rng(repository, StdRng::from_entropy())
    }

    /// Session with reproducible word order, directions and option order.
    pub fn seeded(repository: Arc<dyn WordRepository>, seed: u64) -> Self {
        Self::with_rng(repository, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> PracticeSession<R> {
    pub fn with_rng(repository: Arc<dyn WordRepository>, rng: R) -> Self {
        Self {
            repository,
            rng,
            choices: DEFAULT_CHOICES,
            state: SessionState::Idle,
            pool: None,
            settings: None,
            active: None,
            revealed: false,
            stats: SessionStats::default(),
            reports: Vec::new(),
        }
    }

    /// Number of options offered in multiple-choice mode (at least 2).
    pub fn with_choices(mut self, choices: usize) -> Self {
        self.choices = choices.max(2);
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Score of the running session, or of the last one until the next start.
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn pool(&self) -> Option<&WordPool> {
        self.pool.as_ref()
    }

    pub fn settings(&self) -> Option<SessionSettings> {
        self.settings
    }

    pub fn active_question(&self) -> Option<&ActiveQuestion> {
        self.active.as_ref()
    }

    fn expect_state(
        &self,
        operation: &'static str,
        allowed: &[SessionState],
    ) -> Result<(), SessionError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(SessionError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }

    /// Fetch every word of `kind` from the repository and hold it as the pool.
    pub async fn load_pool(&mut self, kind: WordKind) -> Result<&WordPool, SessionError> {
        self.expect_state("load a pool", &[SessionState::Idle, SessionState::PoolLoaded])?;

        let words = self.repository.fetch_words(kind).await?;
        if words.is_empty() {
            warn!(%kind, repository = self.repository.name(), "word pool is empty");
            return Err(SessionError::EmptyPool(kind));
        }
        let pool = WordPool::new(kind, words)?;
        info!(%kind, words = pool.len(), repository = self.repository.name(), "pool loaded");

        self.state = SessionState::PoolLoaded;
        Ok(self.pool.insert(pool))
    }

    /// Hold a pool supplied by the host instead of fetching one.
    pub fn use_pool(&mut self, pool: WordPool) -> Result<(), SessionError> {
        self.expect_state("load a pool", &[SessionState::Idle, SessionState::PoolLoaded])?;
        self.pool = Some(pool);
        self.state = SessionState::PoolLoaded;
        Ok(())
    }

    /// Fix kind, mode and direction for the session and reset the score.
    pub fn start_session(
        &mut self,
        kind: WordKind,
        mode: Mode,
        direction: Direction,
    ) -> Result<(), SessionError> {
        self.expect_state("start a session", &[SessionState::PoolLoaded])?;
        let pool = self.pool.as_ref().ok_or(SessionError::EmptyPool(kind))?;

        if pool.kind() != kind {
            return Err(SessionError::PoolKindMismatch {
                expected: kind,
                found: pool.kind(),
            });
        }
        if pool.is_empty() {
            return Err(SessionError::EmptyPool(kind));
        }
        if !mode.supports(kind) {
            return Err(SessionError::IncompatibleMode { mode, kind });
        }

        self.stats = SessionStats::default();
        self.settings = Some(SessionSettings {
            kind,
            mode,
            direction,
        });
        self.active = None;
        self.state = SessionState::InRound;
        info!(%kind, %mode, ?direction, words = pool.len(), "session started");
        Ok(())
    }

    /// Draw a word (with replacement) and build the next question.
    pub fn next_question(&mut self) -> Result<&ActiveQuestion, SessionError> {
        self.expect_state("ask a question", &[SessionState::InRound])?;
        let (Some(pool), Some(settings)) = (self.pool.as_ref(), self.settings) else {
            return Err(SessionError::InvalidState {
                operation: "ask a question",
                state: self.state,
            });
        };

        let index = self.rng.gen_range(0..pool.len());
        let side = settings.direction.resolve(&mut self.rng);
        let question = settings
            .mode
            .build(pool, index, side, self.choices, &mut self.rng)?;
        let word = pool
            .get(index)
            .cloned()
            .ok_or(SessionError::EmptyPool(settings.kind))?;

        self.revealed = false;
        self.state = SessionState::AwaitingAnswer;
        Ok(self.active.insert(ActiveQuestion {
            word,
            side,
            question,
        }))
    }

    /// Show the back of the current flashcard. Self-assessment is only
    /// accepted once the card has been revealed.
    pub fn reveal(&mut self) -> Result<&str, SessionError> {
        self.expect_state("reveal a card", &[SessionState::AwaitingAnswer])?;
        match self.active.as_ref().map(|a| &a.question) {
            Some(Question::Flashcard(card)) => {
                self.revealed = true;
                Ok(card.back())
            }
            _ => Err(SessionError::NotFlashcard),
        }
    }

    /// Score the answer to the current question.
    ///
    /// Accepted once per question. The progress report is spawned and left
    /// running; its outcome is only logged.
    pub fn submit_answer(&mut self, answer: Answer) -> Result<AnswerOutcome, SessionError> {
        self.expect_state("submit an answer", &[SessionState::AwaitingAnswer])?;
        let (Some(active), Some(settings)) = (self.active.as_ref(), self.settings) else {
            return Err(SessionError::InvalidState {
                operation: "submit an answer",
                state: self.state,
            });
        };

        if matches!(active.question, Question::Flashcard(_)) && !self.revealed {
            return Err(SessionError::InvalidState {
                operation: "self-assess an unrevealed card",
                state: self.state,
            });
        }
        let outcome = active.question.check(&answer)?;
        let key = active.word.key().to_string();

        self.stats.record(outcome.correct);
        self.state = SessionState::InRound;
        debug!(word = %key, correct = outcome.correct, stats = %self.stats, "answer scored");

        self.spawn_report(settings.kind, key);
        Ok(outcome)
    }

    fn spawn_report(&mut self, kind: WordKind, key: String) {
        let Ok(handle) = Handle::try_current() else {
            warn!(%kind, word = %key, "no async runtime, progress report skipped");
            return;
        };

        self.reports.retain(|task| !task.is_finished());
        let repository = Arc::clone(&self.repository);
        let task = handle.spawn(async move {
            match repository.report_progress(kind, &key).await {
                Ok(()) => debug!(%kind, word = %key, "progress reported"),
                Err(e) => warn!(%kind, word = %key, error = %e, "failed to report progress"),
            }
        });
        self.reports.push(task);
    }

    /// Wait for outstanding progress reports, e.g. before the host exits.
    pub async fn flush_reports(&mut self) {
        for task in self.reports.drain(..) {
            if let Err(e) = task.await {
                warn!(error = %e, "progress report task failed");
            }
        }
    }

    /// Drop the pool and the current question. Stats stay readable.
    pub fn end_session(&mut self) {
        if let Some(settings) = self.settings.take() {
            info!(kind = %settings.kind, mode = %settings.mode, stats = %self.stats, "session ended");
        }
        self.pool = None;
        self.active = None;
        self.revealed = false;
        self.state = SessionState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;
    use crate::error::RepositoryError;
    use crate::questions::Tense;
    use crate::repository::MemoryRepository;
    use crate::words::{Article, Noun, Verb};

    fn gehen() -> Verb {
        Verb::new("gehen", "ging", "ist gegangen", "to go")
    }

    fn session_with(words: Vec<Word>, seed: u64) -> (Arc<MemoryRepository>, PracticeSession) {
        let repo = Arc::new(MemoryRepository::new(words));
        let session = PracticeSession::seeded(repo.clone(), seed);
        (repo, session)
    }

    fn verb_pool() -> Vec<Word> {
        vec![
            gehen().into(),
            Verb::new("sehen", "sah", "hat gesehen", "to see").into(),
            Verb::new("essen", "aß", "hat gegessen", "to eat").into(),
            Verb::new("fahren", "fuhr", "ist gefahren", "to drive").into(),
            Verb::new("lesen", "las", "hat gelesen", "to read").into(),
        ]
    }

    #[tokio::test]
    async fn typing_german_to_english() {
        let (repo, mut session) = session_with(vec![gehen().into()], 1);
        session.load_pool(WordKind::Verb).await.unwrap();
        session
            .start_session(WordKind::Verb, Mode::Typing, Direction::DeToEn)
            .unwrap();

        let active = session.next_question().unwrap();
        assert!(active.prompt().contains("gehen"));
        assert_eq!(active.side(), Side::DeToEn);

        let outcome = session.submit_answer(Answer::Text("to go".into())).unwrap();
        assert!(outcome.correct);
        let stats = session.stats();
        assert_eq!((stats.correct(), stats.incorrect(), stats.total()), (1, 0, 1));

        session.flush_reports().await;
        assert_eq!(repo.learned_count(WordKind::Verb, "gehen"), 1);
    }

    #[tokio::test]
    async fn typing_english_to_german_ignores_case() {
        let (_repo, mut session) = session_with(vec![gehen().into()], 2);
        session.load_pool(WordKind::Verb).await.unwrap();
        session
            .start_session(WordKind::Verb, Mode::Typing, Direction::EnToDe)
            .unwrap();

        session.next_question().unwrap();
        assert!(session.submit_answer(Answer::Text("gehen".into())).unwrap().correct);
        session.next_question().unwrap();
        assert!(session.submit_answer(Answer::Text("Gehen".into())).unwrap().correct);
        session.next_question().unwrap();
        assert!(session.submit_answer(Answer::Text(" gehen ".into())).unwrap().correct);
        assert_eq!(session.stats().total(), 3);
    }

    #[tokio::test]
    async fn empty_repository_is_rejected_on_load() {
        let (_repo, mut session) = session_with(vec![], 3);
        let err = session.load_pool(WordKind::Noun).await.unwrap_err();
        assert!(matches!(err, SessionError::EmptyPool(WordKind::Noun)));
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn empty_pool_is_rejected_on_start() {
        let (_repo, mut session) = session_with(vec![], 3);
        session.use_pool(WordPool::verbs(vec![])).unwrap();
        let err = session
            .start_session(WordKind::Verb, Mode::Flashcard, Direction::DeToEn)
            .unwrap_err();
        assert!(matches!(err, SessionError::EmptyPool(WordKind::Verb)));
        assert_eq!(session.state(), SessionState::PoolLoaded);
    }

    #[tokio::test]
    async fn unavailable_repository_propagates() {
        let (repo, mut session) = session_with(verb_pool(), 4);
        repo.set_fetch_failure(true);
        let err = session.load_pool(WordKind::Verb).await.unwrap_err();
        assert!(matches!(
            err,
            SessionError::Repository(RepositoryError::Unavailable(_))
        ));
    }

    #[test]
    fn conjugation_for_nouns_is_a_configuration_error() {
        let (_repo, mut session) = session_with(vec![], 5);
        session
            .use_pool(WordPool::nouns(vec![Noun::new(
                Article::Der,
                "Tisch",
                "Tische",
                "table",
            )]))
            .unwrap();
        let err = session
            .start_session(WordKind::Noun, Mode::Conjugation, Direction::DeToEn)
            .unwrap_err();
        assert!(matches!(
            err,
            SessionError::IncompatibleMode {
                mode: Mode::Conjugation,
                kind: WordKind::Noun
            }
        ));
    }

    #[test]
    fn pool_kind_must_match_session_kind() {
        let (_repo, mut session) = session_with(vec![], 5);
        session.use_pool(WordPool::verbs(vec![gehen()])).unwrap();
        let err = session
            .start_session(WordKind::Noun, Mode::Typing, Direction::DeToEn)
            .unwrap_err();
        assert!(matches!(err, SessionError::PoolKindMismatch { .. }));
    }

    #[tokio::test]
    async fn multiple_choice_with_two_words_offers_two_options() {
        let (_repo, mut session) = session_with(
            vec![
                gehen().into(),
                Verb::new("sehen", "sah", "hat gesehen", "to see").into(),
            ],
            6,
        );
        session.load_pool(WordKind::Verb).await.unwrap();
        session
            .start_session(WordKind::Verb, Mode::MultipleChoice, Direction::Random)
            .unwrap();

        for _ in 0..20 {
            let active = session.next_question().unwrap();
            let Question::MultipleChoice(mc) = active.question() else {
                panic!("expected multiple choice");
            };
            assert_eq!(mc.options.len(), 2);
            let correct = mc.correct_index();
            assert!(session.submit_answer(Answer::Choice(correct)).unwrap().correct);
        }
        assert_eq!(session.stats().correct(), 20);
    }

    #[tokio::test]
    async fn multiple_choice_option_count_follows_pool_size() {
        let (_repo, mut session) = session_with(verb_pool(), 7);
        session.load_pool(WordKind::Verb).await.unwrap();
        session
            .start_session(WordKind::Verb, Mode::MultipleChoice, Direction::DeToEn)
            .unwrap();

        for _ in 0..20 {
            let active = session.next_question().unwrap();
            let expected = active.word().english().to_string();
            let Question::MultipleChoice(mc) = active.question() else {
                panic!("expected multiple choice");
            };
            assert_eq!(mc.options.len(), 4);
            assert_eq!(mc.options.iter().filter(|o| **o == expected).count(), 1);
            let wrong = (mc.correct_index() + 1) % mc.options.len();
            assert!(!session.submit_answer(Answer::Choice(wrong)).unwrap().correct);
        }
    }

    #[tokio::test]
    async fn each_submission_counts_exactly_once() {
        let (_repo, mut session) = session_with(verb_pool(), 8);
        session.load_pool(WordKind::Verb).await.unwrap();
        session
            .start_session(WordKind::Verb, Mode::Typing, Direction::Random)
            .unwrap();

        for round in 1..=30u32 {
            let active = session.next_question().unwrap();
            let answer = if round % 3 == 0 {
                "falsch".to_string()
            } else {
                match active.question() {
                    Question::Typing(t) => t.expected().to_string(),
                    other => panic!("unexpected question {other:?}"),
                }
            };
            session.submit_answer(Answer::Text(answer)).unwrap();

            let stats = session.stats();
            assert_eq!(stats.total(), round);
            assert_eq!(stats.total(), stats.correct() + stats.incorrect());

            let err = session.submit_answer(Answer::Text("again".into())).unwrap_err();
            assert!(matches!(err, SessionError::InvalidState { .. }));
            assert_eq!(session.stats().total(), round);
        }
        assert_eq!(session.stats().incorrect(), 10);
    }

    #[tokio::test]
    async fn conjugation_reports_per_tense_breakdown() {
        let (_repo, mut session) = session_with(vec![gehen().into()], 9);
        session.load_pool(WordKind::Verb).await.unwrap();
        session
            .start_session(WordKind::Verb, Mode::Conjugation, Direction::DeToEn)
            .unwrap();

        let mut saw_mixed = false;
        for _ in 0..40 {
            let active = session.next_question().unwrap();
            let Question::Conjugation(c) = active.question() else {
                panic!("expected conjugation");
            };
            let tenses = c.tenses.clone();
            let answer = BTreeMap::from([
                (Tense::Praeteritum, "Ging ".to_string()),
                (Tense::Perfekt, "hat gegangen".to_string()),
            ]);
            let outcome = session.submit_answer(Answer::Conjugation(answer)).unwrap();
            let per_tense = outcome.per_tense.unwrap();
            assert_eq!(per_tense.len(), tenses.len());
            assert_eq!(outcome.correct, tenses == vec![Tense::Praeteritum]);
            if tenses.len() == 2 {
                assert!(per_tense[&Tense::Praeteritum]);
                assert!(!per_tense[&Tense::Perfekt]);
                saw_mixed = true;
            }
        }
        assert!(saw_mixed);
    }

    #[tokio::test]
    async fn flashcard_reveal_then_self_assess() {
        let (_repo, mut session) = session_with(vec![gehen().into()], 10);
        session.load_pool(WordKind::Verb).await.unwrap();
        session
            .start_session(WordKind::Verb, Mode::Flashcard, Direction::DeToEn)
            .unwrap();

        assert!(session.reveal().is_err());
        let active = session.next_question().unwrap();
        let Question::Flashcard(card) = active.question() else {
            panic!("expected flashcard");
        };
        assert_eq!(card.front, "gehen");
        assert_eq!(card.hint, "(Präteritum: ging, Perfekt: ist gegangen)");
        assert_eq!(session.reveal().unwrap(), "to go");

        let outcome = session.submit_answer(Answer::Recall(false)).unwrap();
        assert!(!outcome.correct);
        assert_eq!(session.stats().incorrect(), 1);
    }

    #[tokio::test]
    async fn flashcard_must_be_revealed_before_self_assessment() {
        let (repo, mut session) = session_with(verb_pool(), 16);
        session.load_pool(WordKind::Verb).await.unwrap();
        session
            .start_session(WordKind::Verb, Mode::Flashcard, Direction::DeToEn)
            .unwrap();

        for _ in 0..3 {
            session.next_question().unwrap();
            let err = session.submit_answer(Answer::Recall(true)).unwrap_err();
            assert!(matches!(err, SessionError::InvalidState { .. }));
            assert_eq!(session.state(), SessionState::AwaitingAnswer);
            assert_eq!(session.stats().total(), 0);

            session.reveal().unwrap();
            assert!(session.submit_answer(Answer::Recall(true)).unwrap().correct);
        }
        assert_eq!(session.stats().correct(), 3);

        // the flag does not carry over to the next card
        session.next_question().unwrap();
        assert!(session.submit_answer(Answer::Recall(false)).is_err());

        session.flush_reports().await;
        assert_eq!(repo.report_calls(), 3);
    }

    #[tokio::test]
    async fn random_direction_resolves_per_question() {
        let (_repo, mut session) = session_with(verb_pool(), 5);
        session.load_pool(WordKind::Verb).await.unwrap();
        session
            .start_session(WordKind::Verb, Mode::MultipleChoice, Direction::Random)
            .unwrap();

        let (mut de_to_en, mut en_to_de) = (0, 0);
        for _ in 0..50 {
            let active = session.next_question().unwrap();
            let word = active.word().clone();
            let side = active.side();
            let Question::MultipleChoice(mc) = active.question() else {
                panic!("expected multiple choice");
            };
            match side {
                Side::DeToEn => {
                    de_to_en += 1;
                    assert_eq!(mc.correct_answer(), word.english());
                }
                Side::EnToDe => {
                    en_to_de += 1;
                    assert_eq!(mc.correct_answer(), word.german());
                }
            }
            let correct = mc.correct_index();
            session.submit_answer(Answer::Choice(correct)).unwrap();
            assert_eq!(session.settings().unwrap().direction, Direction::Random);
        }
        assert!(de_to_en > 0 && en_to_de > 0, "de={de_to_en} en={en_to_de}");
        assert_eq!(session.stats().correct(), 50);
    }

    #[tokio::test]
    async fn mismatched_answer_leaves_question_open() {
        let (_repo, mut session) = session_with(vec![gehen().into()], 11);
        session.load_pool(WordKind::Verb).await.unwrap();
        session
            .start_session(WordKind::Verb, Mode::Typing, Direction::DeToEn)
            .unwrap();
        session.next_question().unwrap();

        assert!(session.submit_answer(Answer::Recall(true)).is_err());
        assert_eq!(session.state(), SessionState::AwaitingAnswer);
        assert_eq!(session.stats().total(), 0);
        assert!(session.submit_answer(Answer::Text("to go".into())).is_ok());
    }

    #[tokio::test]
    async fn failed_report_does_not_block_the_round() {
        let (repo, mut session) = session_with(verb_pool(), 12);
        repo.set_report_failure(true);
        session.load_pool(WordKind::Verb).await.unwrap();
        session
            .start_session(WordKind::Verb, Mode::Flashcard, Direction::EnToDe)
            .unwrap();

        session.next_question().unwrap();
        session.reveal().unwrap();
        assert!(session.submit_answer(Answer::Recall(true)).unwrap().correct);
        session.next_question().unwrap();

        session.flush_reports().await;
        assert_eq!(repo.report_calls(), 1);
        assert_eq!(session.stats().correct(), 1);
    }

    /// Repository whose reports never complete.
    struct StalledRepository {
        words: Vec<Word>,
        gate: Notify,
    }

    #[async_trait]
    impl WordRepository for StalledRepository {
        fn name(&self) -> &str {
            "stalled"
        }

        async fn fetch_words(&self, _kind: WordKind) -> Result<Vec<Word>, RepositoryError> {
            Ok(self.words.clone())
        }

        async fn report_progress(&self, _kind: WordKind, _key: &str) -> Result<(), RepositoryError> {
            self.gate.notified().await;
            Ok(())
        }
    }

    #[tokio::test]
    async fn slow_reports_do_not_stall_questions() {
        let repo = Arc::new(StalledRepository {
            words: verb_pool(),
            gate: Notify::new(),
        });
        let mut session = PracticeSession::seeded(repo, 13);
        session.load_pool(WordKind::Verb).await.unwrap();
        session
            .start_session(WordKind::Verb, Mode::Flashcard, Direction::DeToEn)
            .unwrap();

        for _ in 0..5 {
            session.next_question().unwrap();
            session.reveal().unwrap();
            session.submit_answer(Answer::Recall(true)).unwrap();
        }
        assert_eq!(session.stats().total(), 5);
    }

    #[test]
    fn submit_without_runtime_still_scores() {
        let (repo, mut session) = session_with(vec![], 14);
        session.use_pool(WordPool::verbs(vec![gehen()])).unwrap();
        session
            .start_session(WordKind::Verb, Mode::Typing, Direction::DeToEn)
            .unwrap();
        session.next_question().unwrap();
        assert!(session.submit_answer(Answer::Text("to go".into())).unwrap().correct);
        assert_eq!(repo.report_calls(), 0);
    }

    #[tokio::test]
    async fn stats_survive_end_until_next_start() {
        let (_repo, mut session) = session_with(vec![gehen().into()], 15);
        session.load_pool(WordKind::Verb).await.unwrap();
        session
            .start_session(WordKind::Verb, Mode::Typing, Direction::DeToEn)
            .unwrap();
        session.next_question().unwrap();
        session.submit_answer(Answer::Text("to walk".into())).unwrap();

        session.end_session();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.pool().is_none());
        assert!(session.active_question().is_none());
        assert_eq!(session.stats().incorrect(), 1);
        assert!(session.next_question().is_err());

        session.load_pool(WordKind::Verb).await.unwrap();
        session
            .start_session(WordKind::Verb, Mode::Typing, Direction::DeToEn)
            .unwrap();
        assert_eq!(session.stats().total(), 0);
    }

    #[tokio::test]
    async fn same_seed_gives_same_questions() {
        let words = verb_pool();
        let mut prompts = Vec::new();
        for _ in 0..2 {
            let (_repo, mut session) = session_with(words.clone(), 99);
            session.load_pool(WordKind::Verb).await.unwrap();
            session
                .start_session(WordKind::Verb, Mode::MultipleChoice, Direction::Random)
                .unwrap();
            let mut run = Vec::new();
            for _ in 0..10 {
                let active = session.next_question().unwrap();
                run.push(format!("{:?}", active.question()));
                session.submit_answer(Answer::Choice(0)).unwrap();
            }
            prompts.push(run);
        }
        assert_eq!(prompts[0], prompts[1]);
    }
}
