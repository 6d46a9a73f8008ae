//! Question construction and answer checking for each practice mode

use std::collections::BTreeMap;
use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SessionError;
use crate::fuzzy::check_match;
use crate::words::{Verb, Word, WordKind, WordPool};

/// Option count of a multiple-choice question when nothing else is configured
pub const DEFAULT_CHOICES: usize = 4;

/// Practice mode chosen for a whole session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Flashcard,
    MultipleChoice,
    Typing,
    Conjugation,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Flashcard => "flashcard",
            Mode::MultipleChoice => "multiple choice",
            Mode::Typing => "typing",
            Mode::Conjugation => "conjugation",
        }
    }

    /// Conjugation is the only mode restricted to one word kind.
    pub fn supports(&self, kind: WordKind) -> bool {
        !matches!((self, kind), (Mode::Conjugation, WordKind::Noun))
    }

    /// Build the question for `pool[index]` in this mode.
    pub fn build<R: Rng + ?Sized>(
        &self,
        pool: &WordPool,
        index: usize,
        direction: Side,
        choices: usize,
        rng: &mut R,
    ) -> Result<Question, SessionError> {
        let word = pool
            .get(index)
            .ok_or(SessionError::EmptyPool(pool.kind()))?;

        let question = match self {
            Mode::Flashcard => Question::Flashcard(Flashcard {
                front: front_side(word, direction),
                hint: hint_for(word, direction),
                back: back_side(word, direction),
            }),
            Mode::MultipleChoice => {
                let correct = back_side(word, direction);
                let distractors = pick_distractors(
                    pool,
                    index,
                    direction,
                    &correct,
                    choices.saturating_sub(1),
                    rng,
                );
                let mut options = Vec::with_capacity(distractors.len() + 1);
                options.push(correct.clone());
                options.extend(distractors);
                options.shuffle(rng);
                let correct_index = options
                    .iter()
                    .position(|o| *o == correct)
                    .unwrap_or_default();
                Question::MultipleChoice(MultipleChoice {
                    prompt: choice_prompt(word, direction),
                    options,
                    correct_index,
                })
            }
            Mode::Typing => Question::Typing(Typing {
                prompt: typing_prompt(word, direction),
                expected: back_side(word, direction),
            }),
            Mode::Conjugation => {
                let verb = word.as_verb().ok_or(SessionError::IncompatibleMode {
                    mode: Mode::Conjugation,
                    kind: word.kind(),
                })?;
                let tenses = choose_tenses(rng);
                Question::Conjugation(Conjugation {
                    infinitive: verb.infinitive.clone(),
                    english: verb.english.clone(),
                    expected: tenses
                        .iter()
                        .map(|t| (*t, t.form(verb).to_string()))
                        .collect(),
                    tenses,
                })
            }
        };

        debug!(mode = %self, word = word.key(), ?direction, "built question");
        Ok(question)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configured quiz direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    DeToEn,
    EnToDe,
    Random,
}

impl Direction {
    /// Effective direction for one question; `Random` flips a fair coin.
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> Side {
        match self {
            Direction::DeToEn => Side::DeToEn,
            Direction::EnToDe => Side::EnToDe,
            Direction::Random => {
                if rng.gen_bool(0.5) {
                    Side::DeToEn
                } else {
                    Side::EnToDe
                }
            }
        }
    }
}

/// Direction a single question is asked in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    DeToEn,
    EnToDe,
}

/// Verb tenses drilled in conjugation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tense {
    #[serde(rename = "präteritum")]
    Praeteritum,
    Perfekt,
}

impl Tense {
    pub const ALL: [Tense; 2] = [Tense::Praeteritum, Tense::Perfekt];

    pub fn form<'a>(&self, verb: &'a Verb) -> &'a str {
        match self {
            Tense::Praeteritum => &verb.praeteritum,
            Tense::Perfekt => &verb.perfekt,
        }
    }
}

impl fmt::Display for Tense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tense::Praeteritum => f.write_str("Präteritum"),
            Tense::Perfekt => f.write_str("Perfekt"),
        }
    }
}

/// The question currently on screen, one variant per mode
#[derive(Debug, Clone, PartialEq)]
pub enum Question {
    Flashcard(Flashcard),
    MultipleChoice(MultipleChoice),
    Typing(Typing),
    Conjugation(Conjugation),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Flashcard {
    pub front: String,
    pub hint: String,
    back: String,
}

impl Flashcard {
    pub fn back(&self) -> &str {
        &self.back
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultipleChoice {
    pub prompt: String,
    pub options: Vec<String>,
    correct_index: usize,
}

impl MultipleChoice {
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    pub fn correct_answer(&self) -> &str {
        &self.options[self.correct_index]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Typing {
    pub prompt: String,
    expected: String,
}

impl Typing {
    pub fn expected(&self) -> &str {
        &self.expected
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conjugation {
    pub infinitive: String,
    pub english: String,
    pub tenses: Vec<Tense>,
    expected: BTreeMap<Tense, String>,
}

impl Conjugation {
    pub fn prompt(&self) -> String {
        format!("Conjugate: {} ({})", self.infinitive, self.english)
    }

    pub fn expected(&self, tense: Tense) -> Option<&str> {
        self.expected.get(&tense).map(String::as_str)
    }
}

/// What the learner handed in for the active question
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// Flashcard self-assessment after revealing the back
    Recall(bool),
    /// Index into the multiple-choice options
    Choice(usize),
    Text(String),
    /// One typed form per asked tense; missing tenses count as wrong
    Conjugation(BTreeMap<Tense, String>),
}

/// Scored result of one submitted answer
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub per_tense: Option<BTreeMap<Tense, bool>>,
    pub expected: String,
    pub feedback: String,
}

impl Question {
    pub fn mode(&self) -> Mode {
        match self {
            Question::Flashcard(_) => Mode::Flashcard,
            Question::MultipleChoice(_) => Mode::MultipleChoice,
            Question::Typing(_) => Mode::Typing,
            Question::Conjugation(_) => Mode::Conjugation,
        }
    }

    /// The text shown to the learner
    pub fn prompt(&self) -> String {
        match self {
            Question::Flashcard(card) => card.front.clone(),
            Question::MultipleChoice(mc) => mc.prompt.clone(),
            Question::Typing(t) => t.prompt.clone(),
            Question::Conjugation(c) => c.prompt(),
        }
    }

    /// Score an answer against this question. Pure: no bookkeeping happens here.
    pub fn check(&self, answer: &Answer) -> Result<AnswerOutcome, SessionError> {
        match (self, answer) {
            (Question::Flashcard(card), Answer::Recall(knew_it)) => Ok(AnswerOutcome {
                correct: *knew_it,
                per_tense: None,
                expected: card.back.clone(),
                feedback: verdict_text(*knew_it).to_string(),
            }),
            (Question::MultipleChoice(mc), Answer::Choice(index)) => {
                let selected = mc.options.get(*index).ok_or(SessionError::OptionOutOfRange {
                    index: *index,
                    len: mc.options.len(),
                })?;
                let expected = mc.correct_answer().to_string();
                let correct = *selected == expected;
                let feedback = if correct {
                    verdict_text(true).to_string()
                } else {
                    format!("Incorrect. Expected: '{}'", expected)
                };
                Ok(AnswerOutcome {
                    correct,
                    per_tense: None,
                    expected,
                    feedback,
                })
            }
            (Question::Typing(t), Answer::Text(input)) => {
                let result = check_match(input, &t.expected);
                Ok(AnswerOutcome {
                    correct: result.is_correct,
                    per_tense: None,
                    expected: t.expected.clone(),
                    feedback: result.feedback,
                })
            }
            (Question::Conjugation(c), Answer::Conjugation(inputs)) => {
                let mut per_tense = BTreeMap::new();
                let mut lines = Vec::with_capacity(c.tenses.len());
                for tense in &c.tenses {
                    let expected = c.expected(*tense).unwrap_or_default();
                    let input = inputs.get(tense).map(String::as_str).unwrap_or_default();
                    let result = check_match(input, expected);
                    lines.push(if result.is_correct {
                        format!("✓ {}: Correct!", tense)
                    } else {
                        format!("✗ {}: {}", tense, result.feedback)
                    });
                    per_tense.insert(*tense, result.is_correct);
                }
                let correct = per_tense.values().all(|ok| *ok);
                let expected = c
                    .tenses
                    .iter()
                    .map(|t| format!("{}: {}", t, c.expected(*t).unwrap_or_default()))
                    .collect::<Vec<_>>()
                    .join(", ");
                Ok(AnswerOutcome {
                    correct,
                    per_tense: Some(per_tense),
                    expected,
                    feedback: lines.join("\n"),
                })
            }
            (question, _) => Err(SessionError::AnswerKind(question.mode())),
        }
    }
}

fn verdict_text(correct: bool) -> &'static str {
    if correct {
        "Correct!"
    } else {
        "Incorrect"
    }
}

/// The given side of a word
fn front_side(word: &Word, direction: Side) -> String {
    match direction {
        Side::DeToEn => word.german(),
        Side::EnToDe => word.english().to_string(),
    }
}

/// The side the learner has to produce
fn back_side(word: &Word, direction: Side) -> String {
    match direction {
        Side::DeToEn => word.english().to_string(),
        Side::EnToDe => word.german(),
    }
}

fn hint_for(word: &Word, direction: Side) -> String {
    match (word, direction) {
        (Word::Verb(v), Side::DeToEn) => {
            format!("(Präteritum: {}, Perfekt: {})", v.praeteritum, v.perfekt)
        }
        (Word::Verb(_), Side::EnToDe) => "(German infinitive)".to_string(),
        (Word::Noun(n), Side::DeToEn) => format!("(Plural: {})", n.plural),
        (Word::Noun(_), Side::EnToDe) => "(German noun with article)".to_string(),
    }
}

fn choice_prompt(word: &Word, direction: Side) -> String {
    match direction {
        Side::DeToEn => format!("What does '{}' mean?", word.german()),
        Side::EnToDe => format!("How do you say '{}' in German?", word.english()),
    }
}

fn typing_prompt(word: &Word, direction: Side) -> String {
    match direction {
        Side::DeToEn => format!("Type the English translation of: {}", word.german()),
        Side::EnToDe => format!("Type the German translation of: {}", word.english()),
    }
}

/// Collect up to `wanted` distinct wrong options from the rest of the pool.
///
/// Candidates are visited once each in random order, so the loop always ends
/// even when many words share the same translation.
pub fn pick_distractors<R: Rng + ?Sized>(
    pool: &WordPool,
    current: usize,
    direction: Side,
    correct: &str,
    wanted: usize,
    rng: &mut R,
) -> Vec<String> {
    let mut candidates: Vec<usize> = (0..pool.len()).filter(|&i| i != current).collect();
    candidates.shuffle(rng);

    let mut chosen: Vec<String> = Vec::with_capacity(wanted);
    for index in candidates {
        if chosen.len() >= wanted {
            break;
        }
        let Some(word) = pool.get(index) else { continue };
        let value = back_side(word, direction);
        if value != correct && !chosen.contains(&value) {
            chosen.push(value);
        }
    }
    chosen
}

/// Half the time a single random tense, otherwise both
fn choose_tenses<R: Rng + ?Sized>(rng: &mut R) -> Vec<Tense> {
    if rng.gen_bool(0.5) {
        let tense = if rng.gen_bool(0.5) {
            Tense::Praeteritum
        } else {
            Tense::Perfekt
        };
        vec![tense]
    } else {
        Tense::ALL.to_vec()
    }
}
