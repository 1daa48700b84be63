use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Answer, Dosha, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Errors that can occur when constructing questions.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuestionError {
    #[error("question weight must be a finite, non-negative number, got {0}")]
    InvalidWeight(f64),
}

//
// ─── QUESTION RECORD ───────────────────────────────────────────────────────────
//

/// One scored questionnaire entry. Immutable after construction.
///
/// A record contributes `weight * intensity/5` to its dosha when answered with
/// the expected answer, and nothing otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    id: QuestionId,
    text: String,
    expected: Answer,
    dosha: Dosha,
    weight: f64,
}

impl QuestionRecord {
    /// Builds a validated record.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::InvalidWeight` when the weight is negative,
    /// NaN, or infinite. A weight of zero is valid and simply contributes
    /// nothing.
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        expected: Answer,
        dosha: Dosha,
        weight: f64,
    ) -> Result<Self, QuestionError> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(QuestionError::InvalidWeight(weight));
        }

        Ok(Self {
            id,
            text: text.into(),
            expected,
            dosha,
            weight,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The answer that grants this question's score.
    #[must_use]
    pub fn expected(&self) -> Answer {
        self.expected
    }

    /// The category this question scores toward.
    #[must_use]
    pub fn dosha(&self) -> Dosha {
        self.dosha
    }

    /// Raw score granted at full intensity.
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

//
// ─── QUESTION BANK ─────────────────────────────────────────────────────────────
//

/// Ordered, read-only sequence of questions, indexed `0..len()`.
///
/// Built once at load time and shared between sessions; nothing mutates it
/// afterwards, so it is safe behind an `Arc` for concurrent readers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuestionBank {
    records: Vec<QuestionRecord>,
}

impl QuestionBank {
    #[must_use]
    pub fn from_records(records: Vec<QuestionRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&QuestionRecord> {
        self.records.get(index)
    }

    #[must_use]
    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    /// Maximum raw score attainable for a category: the sum of its questions'
    /// weights, each answered as expected at full intensity.
    #[must_use]
    pub fn attainable(&self, dosha: Dosha) -> f64 {
        self.records
            .iter()
            .filter(|record| record.dosha() == dosha)
            .map(QuestionRecord::weight)
            .sum()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
