//! Weighted score accumulation.
//!
//! A submitted answer contributes `weight * intensity/5` to the question's
//! dosha when it matches the expected answer, and nothing otherwise. The
//! intensity rating is only collected for matching answers; a rating passed
//! alongside a non-matching answer is ignored rather than rejected.

use crate::model::{Answer, DoshaScores, Intensity, QuestionRecord};

/// Running per-category totals for one assessment session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreAccumulator {
    totals: DoshaScores,
}

impl ScoreAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn totals(&self) -> DoshaScores {
        self.totals
    }

    /// Applies one answered question and returns the contribution added.
    ///
    /// Only the record's own category can change; a non-matching answer (or a
    /// matching one with no rating) leaves every total untouched.
    pub fn apply(
        &mut self,
        record: &QuestionRecord,
        given: Answer,
        intensity: Option<Intensity>,
    ) -> f64 {
        let contribution = contribution(record, given, intensity);
        if contribution > 0.0 {
            self.totals.add(record.dosha(), contribution);
        }
        contribution
    }

    /// Resets every total back to zero.
    pub fn reset(&mut self) {
        self.totals = DoshaScores::zero();
    }
}

fn contribution(record: &QuestionRecord, given: Answer, intensity: Option<Intensity>) -> f64 {
    if given != record.expected() {
        return 0.0;
    }
    match intensity {
        Some(rating) => record.weight() * rating.factor(),
        None => 0.0,
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
