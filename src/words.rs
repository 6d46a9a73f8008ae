//! Vocabulary entries: German verbs and nouns

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RepositoryError, SessionError};

/// Which kind of word a pool or repository call is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordKind {
    Verb,
    Noun,
}

impl WordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WordKind::Verb => "verb",
            WordKind::Noun => "noun",
        }
    }
}

impl fmt::Display for WordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grammatical gender marker of a noun
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Article {
    Der,
    Die,
    Das,
}

impl Article {
    pub fn as_str(&self) -> &'static str {
        match self {
            Article::Der => "der",
            Article::Die => "die",
            Article::Das => "das",
        }
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Article {
    type Err = RepositoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "der" => Ok(Article::Der),
            "die" => Ok(Article::Die),
            "das" => Ok(Article::Das),
            other => Err(RepositoryError::InvalidArticle(other.to_string())),
        }
    }
}

/// A German verb with its principal parts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verb {
    pub infinitive: String,
    #[serde(rename = "präteritum")]
    pub praeteritum: String,
    pub perfekt: String,
    pub english: String,
}

impl Verb {
    pub fn new(infinitive: &str, praeteritum: &str, perfekt: &str, english: &str) -> Self {
        Self {
            infinitive: infinitive.to_string(),
            praeteritum: praeteritum.to_string(),
            perfekt: perfekt.to_string(),
            english: english.to_string(),
        }
    }
}

/// A German noun with article and plural
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Noun {
    pub article: Article,
    pub noun: String,
    pub plural: String,
    pub english: String,
}

impl Noun {
    pub fn new(article: Article, noun: &str, plural: &str, english: &str) -> Self {
        Self {
            article,
            noun: noun.to_string(),
            plural: plural.to_string(),
            english: english.to_string(),
        }
    }
}

/// Either kind of vocabulary entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Word {
    Verb(Verb),
    Noun(Noun),
}

impl Word {
    pub fn kind(&self) -> WordKind {
        match self {
            Word::Verb(_) => WordKind::Verb,
            Word::Noun(_) => WordKind::Noun,
        }
    }

    /// Unique key used when reporting progress: infinitive or bare noun
    pub fn key(&self) -> &str {
        match self {
            Word::Verb(v) => &v.infinitive,
            Word::Noun(n) => &n.noun,
        }
    }

    /// The German side as shown to the learner ("gehen", "der Mann")
    pub fn german(&self) -> String {
        match self {
            Word::Verb(v) => v.infinitive.clone(),
            Word::Noun(n) => format!("{} {}", n.article, n.noun),
        }
    }

    pub fn english(&self) -> &str {
        match self {
            Word::Verb(v) => &v.english,
            Word::Noun(n) => &n.english,
        }
    }

    pub fn as_verb(&self) -> Option<&Verb> {
        match self {
            Word::Verb(v) => Some(v),
            Word::Noun(_) => None,
        }
    }
}

impl From<Verb> for Word {
    fn from(verb: Verb) -> Self {
        Word::Verb(verb)
    }
}

impl From<Noun> for Word {
    fn from(noun: Noun) -> Self {
        Word::Noun(noun)
    }
}

/// Read-only, single-kind set of words drilled in one session
#[derive(Debug, Clone)]
pub struct WordPool {
    kind: WordKind,
    words: Vec<Word>,
}

impl WordPool {
    /// Build a pool, rejecting entries whose kind differs from `kind`.
    pub fn new(kind: WordKind, words: Vec<Word>) -> Result<Self, SessionError> {
        if let Some(stray) = words.iter().find(|w| w.kind() != kind) {
            return Err(SessionError::PoolKindMismatch {
                expected: kind,
                found: stray.kind(),
            });
        }
        Ok(Self { kind, words })
    }

    pub fn verbs(verbs: Vec<Verb>) -> Self {
        Self {
            kind: WordKind::Verb,
            words: verbs.into_iter().map(Word::Verb).collect(),
        }
    }

    pub fn nouns(nouns: Vec<Noun>) -> Self {
        Self {
            kind: WordKind::Noun,
            words: nouns.into_iter().map(Word::Noun).collect(),
        }
    }

    pub fn kind(&self) -> WordKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Word> {
        self.words.get(index)
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }
}
