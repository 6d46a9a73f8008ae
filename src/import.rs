//! Word list import from CSV and Excel files

use std::io::Read;
use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use csv::ReaderBuilder;
use tracing::warn;

use crate::db::{validate_noun, validate_verb};
use crate::error::RepositoryError;
use crate::words::{Noun, Verb, Word, WordKind};

/// Parse a CSV or Excel file by extension
pub fn parse_file(file_path: &Path, kind: WordKind) -> Result<Vec<Word>, RepositoryError> {
    let extension = file_path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "xlsx" => parse_excel(file_path, kind),
        "csv" => parse_csv(file_path, kind),
        _ => Err(RepositoryError::UnsupportedFormat(extension)),
    }
}

type ColumnAliases = [(&'static str, &'static [&'static str]); 4];

/// Accepted header spellings for each required verb column, in field order
const VERB_COLUMNS: ColumnAliases = [
    ("infinitive", &["infinitiv", "infinitive"]),
    ("präteritum", &["präteritum", "prateritum", "praeteritum", "preterite"]),
    ("perfekt", &["perfekt", "perfect"]),
    ("english", &["english", "meaning", "translation"]),
];

const NOUN_COLUMNS: ColumnAliases = [
    ("article", &["article", "artikel"]),
    ("noun", &["nomen", "noun", "word"]),
    ("plural", &["plural"]),
    ("english", &["english", "meaning", "translation"]),
];

fn column_aliases(kind: WordKind) -> &'static ColumnAliases {
    match kind {
        WordKind::Verb => &VERB_COLUMNS,
        WordKind::Noun => &NOUN_COLUMNS,
    }
}

/// Column index of each required field, in the order of `column_aliases`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping([usize; 4]);

/// Detect column indices from header names
pub fn detect_columns(headers: &[String], kind: WordKind) -> Result<ColumnMapping, RepositoryError> {
    let mut indices = [0usize; 4];
    for (slot, &(field, aliases)) in column_aliases(kind).iter().enumerate() {
        indices[slot] = headers
            .iter()
            .position(|h| aliases.contains(&h.trim().to_lowercase().as_str()))
            .ok_or(RepositoryError::MissingColumn(field))?;
    }
    Ok(ColumnMapping(indices))
}

/// Turn one data row into a word. Blank rows yield `None`.
fn row_to_word(
    cells: &[String],
    mapping: ColumnMapping,
    kind: WordKind,
) -> Result<Option<Word>, RepositoryError> {
    if cells.iter().all(|c| c.trim().is_empty()) {
        return Ok(None);
    }
    let [a, b, c, d] = mapping.0.map(|i| cells.get(i).map(|s| s.trim()).unwrap_or(""));

    let word = match kind {
        WordKind::Verb => {
            let verb = Verb::new(a, b, c, d);
            validate_verb(&verb)?;
            Word::Verb(verb)
        }
        WordKind::Noun => {
            let noun = Noun::new(a.parse()?, b, c, d);
            validate_noun(&noun)?;
            Word::Noun(noun)
        }
    };
    Ok(Some(word))
}

/// Convert all data rows, skipping (and logging) rows that are incomplete
fn collect_words<I>(rows: I, mapping: ColumnMapping, kind: WordKind) -> Vec<Word>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut words = Vec::new();
    for (line, cells) in rows.into_iter().enumerate() {
        match row_to_word(&cells, mapping, kind) {
            Ok(Some(word)) => words.push(word),
            Ok(None) => {}
            // +2: one for the header, one for 1-based numbering
            Err(e) => warn!(row = line + 2, %kind, error = %e, "skipping import row"),
        }
    }
    words
}

/// Parse CSV data from any reader
pub fn parse_csv_reader<R: Read>(reader: R, kind: WordKind) -> Result<Vec<Word>, RepositoryError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
    let mapping = detect_columns(&headers, kind)?;

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }
    Ok(collect_words(rows, mapping, kind))
}

/// Parse a CSV word list
pub fn parse_csv(file_path: &Path, kind: WordKind) -> Result<Vec<Word>, RepositoryError> {
    let file = std::fs::File::open(file_path)?;
    parse_csv_reader(file, kind)
}

/// Parse the first sheet of an Excel workbook
pub fn parse_excel(file_path: &Path, kind: WordKind) -> Result<Vec<Word>, RepositoryError> {
    let mut workbook: Xlsx<_> = open_workbook(file_path)
        .map_err(|e| RepositoryError::Excel(format!("failed to open workbook: {}", e)))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| RepositoryError::Excel("no sheets found".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| RepositoryError::Excel(format!("failed to read sheet: {}", e)))?;

    let mut rows = range.rows().map(|row| row.iter().map(get_cell_string).collect::<Vec<_>>());
    let headers = rows
        .next()
        .ok_or_else(|| RepositoryError::Excel("empty sheet, no header row".to_string()))?;
    let mapping = detect_columns(&headers, kind)?;

    Ok(collect_words(rows, mapping, kind))
}

/// Helper to extract string from Excel cell
fn get_cell_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(_) | Data::Empty => String::new(),
    }
}
