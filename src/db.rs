//! SQLite storage for verbs and nouns, exposed as a [`WordRepository`]

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, Result as SqliteResult};
use tracing::{debug, info, warn};

use crate::error::RepositoryError;
use crate::import::parse_file;
use crate::progress::{KindProgress, ProgressSummary};
use crate::repository::WordRepository;
use crate::words::{Noun, Verb, Word, WordKind};

/// Initialize database with schema
pub fn init_database(db_path: &Path) -> SqliteResult<Connection> {
    let conn = Connection::open(db_path)?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS verbs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            infinitive TEXT NOT NULL UNIQUE,
            praeteritum TEXT NOT NULL,
            perfekt TEXT NOT NULL,
            english TEXT NOT NULL,
            learned_count INTEGER NOT NULL DEFAULT 0,
            last_practiced TEXT,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS nouns (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            article TEXT NOT NULL,
            noun TEXT NOT NULL UNIQUE,
            plural TEXT NOT NULL,
            english TEXT NOT NULL,
            learned_count INTEGER NOT NULL DEFAULT 0,
            last_practiced TEXT,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    Ok(conn)
}

fn require(value: &str, field: &'static str) -> Result<(), RepositoryError> {
    if value.trim().is_empty() {
        Err(RepositoryError::MissingField(field))
    } else {
        Ok(())
    }
}

/// Reject verbs with a blank required field
pub fn validate_verb(verb: &Verb) -> Result<(), RepositoryError> {
    require(&verb.infinitive, "infinitive")?;
    require(&verb.praeteritum, "präteritum")?;
    require(&verb.perfekt, "perfekt")?;
    require(&verb.english, "english")
}

/// Reject nouns with a blank required field
pub fn validate_noun(noun: &Noun) -> Result<(), RepositoryError> {
    require(&noun.noun, "noun")?;
    require(&noun.plural, "plural")?;
    require(&noun.english, "english")
}

/// Add a single verb, returning its row id
pub fn add_verb(conn: &Connection, verb: &Verb) -> Result<i64, RepositoryError> {
    validate_verb(verb)?;
    conn.execute(
        "INSERT INTO verbs (infinitive, praeteritum, perfekt, english) VALUES (?1, ?2, ?3, ?4)",
        params![verb.infinitive.trim(), verb.praeteritum.trim(), verb.perfekt.trim(), verb.english.trim()],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Add a single noun, returning its row id
pub fn add_noun(conn: &Connection, noun: &Noun) -> Result<i64, RepositoryError> {
    validate_noun(noun)?;
    conn.execute(
        "INSERT INTO nouns (article, noun, plural, english) VALUES (?1, ?2, ?3, ?4)",
        params![noun.article.as_str(), noun.noun.trim(), noun.plural.trim(), noun.english.trim()],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Bulk insert imported words; entries whose key already exists are skipped
pub fn load_words(conn: &Connection, words: &[Word]) -> SqliteResult<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut count = 0;
    for word in words {
        count += match word {
            Word::Verb(v) => tx.execute(
                "INSERT OR IGNORE INTO verbs (infinitive, praeteritum, perfekt, english) VALUES (?1, ?2, ?3, ?4)",
                params![v.infinitive, v.praeteritum, v.perfekt, v.english],
            )?,
            Word::Noun(n) => tx.execute(
                "INSERT OR IGNORE INTO nouns (article, noun, plural, english) VALUES (?1, ?2, ?3, ?4)",
                params![n.article.as_str(), n.noun, n.plural, n.english],
            )?,
        };
    }
    tx.commit()?;
    Ok(count)
}

/// All words of one kind, in insertion order
pub fn get_words(conn: &Connection, kind: WordKind) -> Result<Vec<Word>, RepositoryError> {
    match kind {
        WordKind::Verb => {
            let mut stmt = conn.prepare(
                "SELECT infinitive, praeteritum, perfekt, english FROM verbs ORDER BY id",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(Word::Verb(Verb {
                    infinitive: row.get(0)?,
                    praeteritum: row.get(1)?,
                    perfekt: row.get(2)?,
                    english: row.get(3)?,
                }))
            })?;
            Ok(rows.collect::<SqliteResult<Vec<_>>>()?)
        }
        WordKind::Noun => {
            let mut stmt =
                conn.prepare("SELECT article, noun, plural, english FROM nouns ORDER BY id")?;
            let rows = stmt.query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?;
            let mut nouns = Vec::new();
            for row in rows {
                let (article, noun, plural, english) = row?;
                nouns.push(Word::Noun(Noun {
                    article: article.parse()?,
                    noun,
                    plural,
                    english,
                }));
            }
            Ok(nouns)
        }
    }
}

/// Bump learned_count for a word; unknown keys change nothing
pub fn increment_learned(conn: &Connection, kind: WordKind, key: &str) -> SqliteResult<usize> {
    let now = Utc::now().to_rfc3339();
    let sql = match kind {
        WordKind::Verb => {
            "UPDATE verbs SET learned_count = learned_count + 1, last_practiced = ?2 WHERE infinitive = ?1"
        }
        WordKind::Noun => {
            "UPDATE nouns SET learned_count = learned_count + 1, last_practiced = ?2 WHERE noun = ?1"
        }
    };
    conn.execute(sql, params![key, now])
}

/// Current learned_count of a word, if it exists
pub fn get_learned_count(conn: &Connection, kind: WordKind, key: &str) -> SqliteResult<Option<i64>> {
    let sql = match kind {
        WordKind::Verb => "SELECT learned_count FROM verbs WHERE infinitive = ?1",
        WordKind::Noun => "SELECT learned_count FROM nouns WHERE noun = ?1",
    };
    match conn.query_row(sql, params![key], |row| row.get(0)) {
        Ok(count) => Ok(Some(count)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

fn kind_progress(conn: &Connection, table: &str) -> SqliteResult<KindProgress> {
    let query = format!(
        "SELECT COUNT(*), COALESCE(SUM(CASE WHEN learned_count > 0 THEN 1 ELSE 0 END), 0) FROM {}",
        table
    );
    conn.query_row(&query, [], |row| {
        Ok(KindProgress {
            total: row.get::<_, i64>(0)? as u64,
            learned: row.get::<_, i64>(1)? as u64,
        })
    })
}

/// Totals and practiced counts for both word kinds
pub fn get_progress(conn: &Connection) -> SqliteResult<ProgressSummary> {
    Ok(ProgressSummary {
        verbs: kind_progress(conn, "verbs")?,
        nouns: kind_progress(conn, "nouns")?,
    })
}

/// Word repository over a SQLite file.
///
/// Each call opens its own connection on the blocking thread pool, so the
/// repository can be shared freely between tasks.
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    db_path: PathBuf,
}

impl SqliteRepository {
    /// Open (and create if needed) the database at `db_path`.
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let db_path = db_path.into();
        init_database(&db_path)
            .map_err(|e| RepositoryError::Unavailable(format!("{}: {}", db_path.display(), e)))?;
        debug!(path = %db_path.display(), "database ready");
        Ok(Self { db_path })
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    async fn with_connection<T, F>(&self, f: F) -> Result<T, RepositoryError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, RepositoryError> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        tokio::task::spawn_blocking(move || {
            let conn = Connection::open(&db_path).map_err(|e| {
                RepositoryError::Unavailable(format!("{}: {}", db_path.display(), e))
            })?;
            f(&conn)
        })
        .await
        .map_err(|e| RepositoryError::Task(e.to_string()))?
    }

    pub async fn add_verb(&self, verb: Verb) -> Result<i64, RepositoryError> {
        self.with_connection(move |conn| add_verb(conn, &verb)).await
    }

    pub async fn add_noun(&self, noun: Noun) -> Result<i64, RepositoryError> {
        self.with_connection(move |conn| add_noun(conn, &noun)).await
    }

    pub async fn progress(&self) -> Result<ProgressSummary, RepositoryError> {
        self.with_connection(|conn| Ok(get_progress(conn)?)).await
    }

    pub async fn learned_count(&self, kind: WordKind, key: &str) -> Result<Option<i64>, RepositoryError> {
        let key = key.to_string();
        self.with_connection(move |conn| Ok(get_learned_count(conn, kind, &key)?))
            .await
    }

    /// Import a CSV or Excel word list, returning how many new words were stored.
    pub async fn import_file(&self, file_path: &Path, kind: WordKind) -> Result<usize, RepositoryError> {
        let file_path = file_path.to_path_buf();
        let path_for_log = file_path.display().to_string();
        let inserted = self
            .with_connection(move |conn| {
                let words = parse_file(&file_path, kind)?;
                Ok(load_words(conn, &words)?)
            })
            .await?;
        info!(file = %path_for_log, %kind, inserted, "word list imported");
        Ok(inserted)
    }
}

#[async_trait]
impl WordRepository for SqliteRepository {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn fetch_words(&self, kind: WordKind) -> Result<Vec<Word>, RepositoryError> {
        self.with_connection(move |conn| get_words(conn, kind)).await
    }

    async fn report_progress(&self, kind: WordKind, key: &str) -> Result<(), RepositoryError> {
        let key = key.to_string();
        let updated = self
            .with_connection({
                let key = key.clone();
                move |conn| Ok(increment_learned(conn, kind, &key)?)
            })
            .await?;
        if updated == 0 {
            warn!(%kind, word = %key, "progress reported for unknown word");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::Article;
    use tempfile::TempDir;

    fn repository() -> (TempDir, SqliteRepository) {
        let dir = TempDir::new().unwrap();
        let repo = SqliteRepository::open(dir.path().join("vokabel.db")).unwrap();
        (dir, repo)
    }

    #[tokio::test]
    async fn added_words_are_fetched_in_order() {
        let (_dir, repo) = repository();
        repo.add_verb(Verb::new("gehen", "ging", "ist gegangen", "to go"))
            .await
            .unwrap();
        repo.add_verb(Verb::new("sehen", "sah", "hat gesehen", "to see"))
            .await
            .unwrap();
        repo.add_noun(Noun::new(Article::Die, "Frau", "Frauen", "woman"))
            .await
            .unwrap();

        let verbs = repo.fetch_words(WordKind::Verb).await.unwrap();
        let keys: Vec<&str> = verbs.iter().map(Word::key).collect();
        assert_eq!(keys, vec!["gehen", "sehen"]);

        let nouns = repo.fetch_words(WordKind::Noun).await.unwrap();
        assert_eq!(nouns[0].german(), "die Frau");
    }

    #[tokio::test]
    async fn blank_fields_are_rejected() {
        let (_dir, repo) = repository();
        let err = repo
            .add_verb(Verb::new("gehen", "  ", "ist gegangen", "to go"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::MissingField("präteritum")));
    }

    #[tokio::test]
    async fn duplicate_key_is_a_database_error() {
        let (_dir, repo) = repository();
        let noun = Noun::new(Article::Der, "Mann", "Männer", "man");
        repo.add_noun(noun.clone()).await.unwrap();
        assert!(matches!(
            repo.add_noun(noun).await,
            Err(RepositoryError::Database(_))
        ));
    }

    #[tokio::test]
    async fn reports_update_learned_progress() {
        let (_dir, repo) = repository();
        repo.add_verb(Verb::new("gehen", "ging", "ist gegangen", "to go"))
            .await
            .unwrap();
        repo.add_verb(Verb::new("sehen", "sah", "hat gesehen", "to see"))
            .await
            .unwrap();

        repo.report_progress(WordKind::Verb, "gehen").await.unwrap();
        repo.report_progress(WordKind::Verb, "gehen").await.unwrap();
        repo.report_progress(WordKind::Verb, "laufen").await.unwrap();

        assert_eq!(repo.learned_count(WordKind::Verb, "gehen").await.unwrap(), Some(2));
        assert_eq!(repo.learned_count(WordKind::Verb, "laufen").await.unwrap(), None);

        let progress = repo.progress().await.unwrap();
        assert_eq!(progress.verbs, KindProgress { total: 2, learned: 1 });
        assert_eq!(progress.nouns, KindProgress { total: 0, learned: 0 });
    }

    #[tokio::test]
    async fn missing_directory_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let err = SqliteRepository::open(dir.path().join("nope").join("vokabel.db")).unwrap_err();
        assert!(matches!(err, RepositoryError::Unavailable(_)));
    }

    #[test]
    fn bulk_load_skips_existing_keys() {
        let dir = TempDir::new().unwrap();
        let conn = init_database(&dir.path().join("bulk.db")).unwrap();
        let words = vec![
            Word::from(Noun::new(Article::Das, "Haus", "Häuser", "house")),
            Word::from(Noun::new(Article::Das, "Haus", "Häuser", "house")),
            Word::from(Noun::new(Article::Der, "Tisch", "Tische", "table")),
        ];
        assert_eq!(load_words(&conn, &words).unwrap(), 2);
        assert_eq!(get_words(&conn, WordKind::Noun).unwrap().len(), 2);
    }
}
