//! Question-bank loading and normalization.
//!
//! The source is a tabular CSV whose column names vary by stray whitespace and
//! embedded newlines, and whose bytes may not be valid UTF-8 (the survey sheet
//! is exported with a Latin-1-compatible encoding). Loading happens in three
//! deterministic steps: decode bytes, map mangled headers onto the canonical
//! schema, then run a pure per-row defaulting pass so every row becomes a
//! usable record. Missing fields are not errors; missing columns are.

use std::fs;
use std::path::Path;

use encoding_rs::WINDOWS_1252;

use prakriti_core::model::{Answer, Dosha, QuestionBank, QuestionId, QuestionRecord};

use crate::error::BankLoadError;

/// Placeholder for rows whose question text is absent in the source.
pub const QUESTION_PLACEHOLDER: &str = "Question missing – please verify source.";

//
// ─── HEADER NORMALIZATION ──────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Serial,
    Dosha,
    Question,
    Expected,
    Weight,
}

/// Collapses runs of whitespace (including newlines) to single spaces.
fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn canonical_column(raw: &str) -> Option<Column> {
    let collapsed = collapse_whitespace(raw);
    if collapsed.eq_ignore_ascii_case("Sl. No.") {
        Some(Column::Serial)
    } else if collapsed.eq_ignore_ascii_case("Dosha dominance") {
        Some(Column::Dosha)
    } else if collapsed.eq_ignore_ascii_case("Question/statement") {
        Some(Column::Question)
    } else if collapsed.eq_ignore_ascii_case("Is your answer the following?") {
        Some(Column::Expected)
    } else if collapsed.to_ascii_lowercase().starts_with("scores to be allotted") {
        Some(Column::Weight)
    } else {
        // Unrecognized columns (e.g. Guna) carry no scoring information.
        None
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct ColumnMap {
    serial: Option<usize>,
    dosha: Option<usize>,
    question: Option<usize>,
    expected: Option<usize>,
    weight: Option<usize>,
}

impl ColumnMap {
    fn from_headers<'a>(headers: impl Iterator<Item = &'a str>) -> Result<Self, BankLoadError> {
        let mut map = Self::default();
        for (index, header) in headers.enumerate() {
            match canonical_column(header) {
                Some(Column::Serial) => map.serial = Some(index),
                Some(Column::Dosha) => map.dosha = Some(index),
                Some(Column::Question) => map.question = Some(index),
                Some(Column::Expected) => map.expected = Some(index),
                Some(Column::Weight) => map.weight = Some(index),
                None => {}
            }
        }

        if map.dosha.is_none() {
            return Err(BankLoadError::MissingColumn("Dosha dominance"));
        }
        if map.question.is_none() {
            return Err(BankLoadError::MissingColumn("Question/statement"));
        }
        if map.expected.is_none() {
            return Err(BankLoadError::MissingColumn("Is your answer the following?"));
        }
        if map.weight.is_none() {
            return Err(BankLoadError::MissingColumn("Scores to be allotted"));
        }

        Ok(map)
    }
}

//
// ─── ROW NORMALIZATION ─────────────────────────────────────────────────────────
//

fn field<'a>(record: &'a csv::StringRecord, index: Option<usize>) -> Option<&'a str> {
    let value = record.get(index?)?.trim();
    (!value.is_empty()).then_some(value)
}

/// Pure defaulting pass for one row. `ordinal` is the zero-based row number,
/// used as the fallback identity when the serial cell is absent or junk.
///
/// Defaults: text → placeholder, expected → Yes, dosha → Kapha, weight → 0.
/// Unrecognized expected/dosha labels are treated like missing values so the
/// pass stays total.
fn normalize_row(
    map: ColumnMap,
    record: &csv::StringRecord,
    ordinal: usize,
) -> Result<QuestionRecord, BankLoadError> {
    let id = field(record, map.serial)
        .and_then(|raw| raw.parse::<QuestionId>().ok())
        .unwrap_or_else(|| QuestionId::new(ordinal as u64 + 1));

    let text = field(record, map.question).unwrap_or(QUESTION_PLACEHOLDER);

    let expected = field(record, map.expected)
        .and_then(Answer::from_label)
        .unwrap_or(Answer::Yes);

    let dosha = field(record, map.dosha)
        .and_then(Dosha::from_label)
        .unwrap_or(Dosha::Kapha);

    let weight = field(record, map.weight)
        .and_then(|raw| raw.parse::<f64>().ok())
        .filter(|value| value.is_finite() && *value >= 0.0)
        .unwrap_or(0.0);

    Ok(QuestionRecord::new(id, text, expected, dosha, weight)?)
}

//
// ─── LOADING ───────────────────────────────────────────────────────────────────
//

/// Loads and normalizes the question bank from a file.
///
/// # Errors
///
/// Returns `BankLoadError` when the file cannot be read, is not a parseable
/// table, or lacks a required column.
pub fn load_bank(path: impl AsRef<Path>) -> Result<QuestionBank, BankLoadError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| BankLoadError::Unreadable {
        path: path.display().to_string(),
        source,
    })?;
    load_bank_from_bytes(&bytes)
}

/// Loads and normalizes the question bank from raw source bytes.
///
/// Two invocations on the same bytes produce identical banks.
///
/// # Errors
///
/// Returns `BankLoadError` when the table cannot be parsed or lacks a
/// required column.
pub fn load_bank_from_bytes(bytes: &[u8]) -> Result<QuestionBank, BankLoadError> {
    // Latin-1-compatible decoding; every byte maps to a character.
    let (text, _, _) = WINDOWS_1252.decode(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let map = ColumnMap::from_headers(headers.iter())?;

    let mut records = Vec::new();
    for (ordinal, row) in reader.records().enumerate() {
        let row = row?;
        records.push(normalize_row(map, &row, ordinal)?);
    }

    tracing::debug!(questions = records.len(), "question bank normalized");
    Ok(QuestionBank::from_records(records))
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
