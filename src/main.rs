//! vokabel CLI: terminal host for the German drill engine.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use vokabel_core::config::DEFAULT_LOG_DIRECTIVE;
use vokabel_core::{
    load_config, Answer, Article, Direction, DrillConfig, Mode, Noun, PracticeSession, Question,
    SessionError, SqliteRepository, Verb, WordKind,
};

#[derive(Parser)]
#[command(name = "vokabel", version, about = "German verb and noun drills")]
struct Cli {
    /// Config file path (default: ./vokabel.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive practice session
    Practice {
        /// Word kind to drill
        #[arg(long, value_enum)]
        kind: KindArg,

        /// Quiz mode
        #[arg(long, value_enum, default_value = "flashcard")]
        mode: ModeArg,

        /// Quiz direction (default from config)
        #[arg(long, value_enum)]
        direction: Option<DirectionArg>,

        /// Stop after this many questions
        #[arg(long)]
        rounds: Option<u32>,
    },

    /// Import a CSV or Excel word list (samples in demos/)
    Import {
        /// Path to .csv or .xlsx file
        file: PathBuf,

        #[arg(long, value_enum)]
        kind: KindArg,
    },

    /// Add a single verb
    AddVerb {
        #[arg(long)]
        infinitive: String,
        #[arg(long)]
        praeteritum: String,
        #[arg(long)]
        perfekt: String,
        #[arg(long)]
        english: String,
    },

    /// Add a single noun
    AddNoun {
        /// der, die or das
        #[arg(long)]
        article: String,
        #[arg(long)]
        noun: String,
        #[arg(long)]
        plural: String,
        #[arg(long)]
        english: String,
    },

    /// Show how many stored words have been practiced
    Progress {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Verb,
    Noun,
}

impl From<KindArg> for WordKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Verb => WordKind::Verb,
            KindArg::Noun => WordKind::Noun,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Flashcard,
    MultipleChoice,
    Typing,
    Conjugation,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Flashcard => Mode::Flashcard,
            ModeArg::MultipleChoice => Mode::MultipleChoice,
            ModeArg::Typing => Mode::Typing,
            ModeArg::Conjugation => Mode::Conjugation,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    DeToEn,
    EnToDe,
    Random,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::DeToEn => Direction::DeToEn,
            DirectionArg::EnToDe => Direction::EnToDe,
            DirectionArg::Random => Direction::Random,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(DEFAULT_LOG_DIRECTIVE.parse().expect("valid directive")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let repo = SqliteRepository::open(&config.database)
        .with_context(|| format!("failed to open {}", config.database.display()))?;

    match cli.command {
        Commands::Practice {
            kind,
            mode,
            direction,
            rounds,
        } => {
            let direction = direction.map(Direction::from).unwrap_or(config.default_direction);
            practice(&config, repo, kind.into(), mode.into(), direction, rounds).await
        }
        Commands::Import { file, kind } => {
            let inserted = repo.import_file(&file, kind.into()).await?;
            println!("Imported {} new {}s from {}", inserted, WordKind::from(kind), file.display());
            Ok(())
        }
        Commands::AddVerb {
            infinitive,
            praeteritum,
            perfekt,
            english,
        } => {
            repo.add_verb(Verb::new(&infinitive, &praeteritum, &perfekt, &english))
                .await?;
            println!("Verb added successfully!");
            Ok(())
        }
        Commands::AddNoun {
            article,
            noun,
            plural,
            english,
        } => {
            let article: Article = article.parse()?;
            repo.add_noun(Noun::new(article, &noun, &plural, &english))
                .await?;
            println!("Noun added successfully!");
            Ok(())
        }
        Commands::Progress { json } => {
            let progress = repo.progress().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&progress)?);
            } else {
                println!("Verbs: {} of {} practiced", progress.verbs.learned, progress.verbs.total);
                println!("Nouns: {} of {} practiced", progress.nouns.learned, progress.nouns.total);
            }
            Ok(())
        }
    }
}

type InputLines = Lines<BufReader<Stdin>>;

/// Read one line; `None` when the learner quits (`:q`) or input ends.
async fn read_answer(lines: &mut InputLines, label: &str) -> Result<Option<String>> {
    if !label.is_empty() {
        println!("{label}");
    }
    match lines.next_line().await.context("failed to read input")? {
        Some(line) if line.trim() == ":q" => Ok(None),
        Some(line) => Ok(Some(line)),
        None => Ok(None),
    }
}

async fn practice(
    config: &DrillConfig,
    repo: SqliteRepository,
    kind: WordKind,
    mode: Mode,
    direction: Direction,
    rounds: Option<u32>,
) -> Result<()> {
    let repo = Arc::new(repo);
    let session = match config.seed {
        Some(seed) => PracticeSession::seeded(repo, seed),
        None => PracticeSession::new(repo),
    };
    let mut session = session.with_choices(config.choices);

    match session.load_pool(kind).await {
        Ok(_) => {}
        Err(SessionError::EmptyPool(kind)) => {
            println!("No {kind}s available! Please add some words first (vokabel import / add-{kind}).");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }
    session.start_session(kind, mode, direction)?;
    println!("Practicing {kind}s in {mode} mode. Type :q to stop.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut asked = 0;

    'rounds: while rounds.map_or(true, |limit| asked < limit) {
        let question = session.next_question()?.question().clone();
        asked += 1;

        let answer = match &question {
            Question::Flashcard(card) => {
                println!("{}\n{}", card.front, card.hint);
                if read_answer(&mut lines, "[Enter] to reveal").await?.is_none() {
                    break 'rounds;
                }
                println!("→ {}", session.reveal()?);
                loop {
                    match read_answer(&mut lines, "Did you get it right? [y/n]").await? {
                        None => break 'rounds,
                        Some(s) if s.trim().eq_ignore_ascii_case("y") => break Answer::Recall(true),
                        Some(s) if s.trim().eq_ignore_ascii_case("n") => break Answer::Recall(false),
                        Some(_) => continue,
                    }
                }
            }
            Question::MultipleChoice(mc) => {
                println!("{}", mc.prompt);
                for (i, option) in mc.options.iter().enumerate() {
                    println!("  {}) {}", i + 1, option);
                }
                loop {
                    let Some(input) = read_answer(&mut lines, "Your choice:").await? else {
                        break 'rounds;
                    };
                    match input.trim().parse::<usize>() {
                        Ok(n) if (1..=mc.options.len()).contains(&n) => break Answer::Choice(n - 1),
                        _ => println!("Enter a number between 1 and {}", mc.options.len()),
                    }
                }
            }
            Question::Typing(t) => {
                let Some(input) = read_answer(&mut lines, &t.prompt).await? else {
                    break 'rounds;
                };
                Answer::Text(input)
            }
            Question::Conjugation(c) => {
                println!("{}", c.prompt());
                let mut forms = std::collections::BTreeMap::new();
                for tense in &c.tenses {
                    let Some(input) = read_answer(&mut lines, &format!("{tense}:")).await? else {
                        break 'rounds;
                    };
                    forms.insert(*tense, input);
                }
                Answer::Conjugation(forms)
            }
        };

        let outcome = session.submit_answer(answer)?;
        println!("{}", outcome.feedback);
        println!("{}\n", session.stats());
    }

    session.end_session();
    session.flush_reports().await;
    println!("Session summary: {}", session.stats());
    Ok(())
}
