//! End-to-end drill over a SQLite word store.

use std::sync::Arc;

use tempfile::TempDir;

use vokabel_core::{
    Answer, Direction, Mode, PracticeSession, Question, SessionError, SqliteRepository,
    WordKind, WordRepository,
};

fn store_with_verbs() -> (TempDir, Arc<SqliteRepository>) {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("verbs.csv");
    std::fs::write(
        &csv,
        "infinitiv,präteritum,perfekt,english\n\
         gehen,ging,ist gegangen,to go\n\
         sehen,sah,hat gesehen,to see\n\
         essen,aß,hat gegessen,to eat\n",
    )
    .unwrap();
    let repo = SqliteRepository::open(dir.path().join("vokabel.db")).unwrap();
    (dir, Arc::new(repo))
}

#[tokio::test]
async fn imported_words_can_be_drilled_and_progress_is_stored() {
    let (dir, repo) = store_with_verbs();
    let inserted = repo
        .import_file(&dir.path().join("verbs.csv"), WordKind::Verb)
        .await
        .unwrap();
    assert_eq!(inserted, 3);

    let mut session = PracticeSession::seeded(repo.clone(), 2024);
    session.load_pool(WordKind::Verb).await.unwrap();
    session
        .start_session(WordKind::Verb, Mode::Typing, Direction::Random)
        .unwrap();

    for _ in 0..6 {
        let active = session.next_question().unwrap();
        let Question::Typing(typing) = active.question() else {
            panic!("expected typing question");
        };
        let answer = format!("  {}  ", typing.expected().to_uppercase());
        assert!(session.submit_answer(Answer::Text(answer)).unwrap().correct);
    }
    session.end_session();
    session.flush_reports().await;

    let stats = session.stats();
    assert_eq!((stats.correct(), stats.incorrect(), stats.total()), (6, 0, 6));

    let progress = repo.progress().await.unwrap();
    assert_eq!(progress.verbs.total, 3);
    assert!(progress.verbs.learned >= 1);

    let mut reported = 0;
    for word in repo.fetch_words(WordKind::Verb).await.unwrap() {
        reported += repo
            .learned_count(WordKind::Verb, word.key())
            .await
            .unwrap()
            .unwrap_or(0);
    }
    assert_eq!(reported, 6);
}

#[tokio::test]
async fn empty_store_cannot_start_a_session() {
    let (_dir, repo) = store_with_verbs();
    let mut session = PracticeSession::seeded(repo, 1);
    let err = session.load_pool(WordKind::Noun).await.unwrap_err();
    assert!(matches!(err, SessionError::EmptyPool(WordKind::Noun)));
}

#[tokio::test]
async fn reimport_does_not_duplicate_words() {
    let (dir, repo) = store_with_verbs();
    let csv = dir.path().join("verbs.csv");
    repo.import_file(&csv, WordKind::Verb).await.unwrap();
    assert_eq!(repo.import_file(&csv, WordKind::Verb).await.unwrap(), 0);
    assert_eq!(repo.fetch_words(WordKind::Verb).await.unwrap().len(), 3);
}

#[tokio::test]
async fn bundled_demo_lists_import_cleanly() {
    let dir = TempDir::new().unwrap();
    let repo = SqliteRepository::open(dir.path().join("vokabel.db")).unwrap();
    let demos = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("demos");

    let verbs = repo
        .import_file(&demos.join("verbs.csv"), WordKind::Verb)
        .await
        .unwrap();
    let nouns = repo
        .import_file(&demos.join("nouns.csv"), WordKind::Noun)
        .await
        .unwrap();
    assert_eq!((verbs, nouns), (6, 5));

    let progress = repo.progress().await.unwrap();
    assert_eq!((progress.verbs.total, progress.nouns.total), (6, 5));
    assert_eq!((progress.verbs.learned, progress.nouns.learned), (0, 0));
}
