//! Final result computation: cap-normalized percentages and the dominant
//! category.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Dosha, DoshaScores, QuestionBank};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Errors from result summarization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SummaryError {
    /// Caps are fixed constants, so this is an invariant check rather than an
    /// expected runtime path.
    #[error("score cap for {0} is zero")]
    ZeroCap(Dosha),
}

//
// ─── SCORE CAPS ────────────────────────────────────────────────────────────────
//

/// Maximum attainable raw score per category, used to normalize totals to a
/// percentage. The constants come from the source survey's scoring sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreCaps {
    vata: f64,
    pitta: f64,
    kapha: f64,
}

impl Default for ScoreCaps {
    fn default() -> Self {
        Self {
            vata: 960.0,
            pitta: 600.0,
            kapha: 1440.0,
        }
    }
}

impl ScoreCaps {
    #[must_use]
    pub fn get(&self, dosha: Dosha) -> f64 {
        match dosha {
            Dosha::Vata => self.vata,
            Dosha::Pitta => self.pitta,
            Dosha::Kapha => self.kapha,
        }
    }

    /// Unrounded percentage of a category's cap, for live progress displays.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::ZeroCap` when the category's cap is zero.
    pub fn percentage(&self, dosha: Dosha, total: f64) -> Result<f64, SummaryError> {
        let cap = self.get(dosha);
        if cap == 0.0 {
            return Err(SummaryError::ZeroCap(dosha));
        }
        Ok(total / cap * 100.0)
    }

    /// Categories whose true attainable maximum in `bank` exceeds the cap,
    /// paired with that attainable sum.
    ///
    /// If a cap understates the attainable maximum, percentages can exceed
    /// 100. The reported scoring semantics stay untouched; callers log this.
    #[must_use]
    pub fn exceeded_by(&self, bank: &QuestionBank) -> Vec<(Dosha, f64)> {
        Dosha::ALL
            .into_iter()
            .filter_map(|dosha| {
                let attainable = bank.attainable(dosha);
                (attainable > self.get(dosha)).then_some((dosha, attainable))
            })
            .collect()
    }
}

//
// ─── RESULT SUMMARY ────────────────────────────────────────────────────────────
//

/// Derived view of a finished assessment: 2-decimal percentages per category
/// and the dominant category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResultSummary {
    percentages: DoshaScores,
    dominant: Dosha,
}

impl ResultSummary {
    #[must_use]
    pub fn percentages(&self) -> DoshaScores {
        self.percentages
    }

    /// The category with the highest percentage. Ties resolve to the first
    /// maximal category in `Dosha::ALL` order, so an all-zero result is Vata.
    #[must_use]
    pub fn dominant(&self) -> Dosha {
        self.dominant
    }
}

/// Converts accumulated totals into the final percentage breakdown.
///
/// # Errors
///
/// Returns `SummaryError::ZeroCap` when any category's cap is zero.
pub fn summarize(totals: &DoshaScores, caps: &ScoreCaps) -> Result<ResultSummary, SummaryError> {
    let mut percentages = DoshaScores::zero();
    for dosha in Dosha::ALL {
        percentages.set(dosha, round2(caps.percentage(dosha, totals.get(dosha))?));
    }

    let mut dominant = Dosha::ALL[0];
    for dosha in Dosha::ALL {
        if percentages.get(dosha) > percentages.get(dominant) {
            dominant = dosha;
        }
    }

    Ok(ResultSummary {
        percentages,
        dominant,
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Answer, QuestionId, QuestionRecord};

    #[test]
    fn percentages_are_rounded_to_two_decimals() {
        let mut totals = DoshaScores::zero();
        totals.add(Dosha::Vata, 320.0);

        let summary = summarize(&totals, &ScoreCaps::default()).unwrap();
        // 320 / 960 * 100 = 33.333...
        assert_eq!(summary.percentages().get(Dosha::Vata), 33.33);
    }

    #[test]
    fn full_cap_reads_one_hundred() {
        let mut totals = DoshaScores::zero();
        totals.add(Dosha::Pitta, 600.0);

        let summary = summarize(&totals, &ScoreCaps::default()).unwrap();
        assert_eq!(summary.percentages().get(Dosha::Pitta), 100.0);
        assert_eq!(summary.dominant(), Dosha::Pitta);
    }

    #[test]
    fn all_zero_totals_tie_break_to_vata() {
        let totals = DoshaScores::zero();
        for _ in 0..3 {
            let summary = summarize(&totals, &ScoreCaps::default()).unwrap();
            assert_eq!(summary.dominant(), Dosha::Vata);
        }
    }

    #[test]
    fn equal_percentages_pick_the_earliest_category() {
        let mut totals = DoshaScores::zero();
        // 50% for Pitta and Kapha, nothing for Vata.
        totals.add(Dosha::Pitta, 300.0);
        totals.add(Dosha::Kapha, 720.0);

        let summary = summarize(&totals, &ScoreCaps::default()).unwrap();
        assert_eq!(summary.dominant(), Dosha::Pitta);
    }

    #[test]
    fn percentages_grow_with_totals() {
        let caps = ScoreCaps::default();
        let mut previous = 0.0;
        for total in [0.0, 100.0, 480.0, 960.0] {
            let mut totals = DoshaScores::zero();
            totals.add(Dosha::Vata, total);
            let pct = summarize(&totals, &caps).unwrap().percentages().get(Dosha::Vata);
            assert!(pct >= previous);
            previous = pct;
        }
    }

    #[test]
    fn zero_cap_is_reported_not_divided() {
        let caps = ScoreCaps {
            vata: 0.0,
            ..ScoreCaps::default()
        };
        let err = summarize(&DoshaScores::zero(), &caps).unwrap_err();
        assert_eq!(err, SummaryError::ZeroCap(Dosha::Vata));
    }

    #[test]
    fn exceeded_by_flags_underestimating_caps() {
        let record =
            QuestionRecord::new(QuestionId::new(1), "Q", Answer::Yes, Dosha::Pitta, 700.0)
                .unwrap();
        let bank = QuestionBank::from_records(vec![record]);

        let violations = ScoreCaps::default().exceeded_by(&bank);
        assert_eq!(violations, vec![(Dosha::Pitta, 700.0)]);
    }

    #[test]
    fn exceeded_by_is_quiet_when_caps_hold() {
        let record =
            QuestionRecord::new(QuestionId::new(1), "Q", Answer::Yes, Dosha::Pitta, 600.0)
                .unwrap();
        let bank = QuestionBank::from_records(vec![record]);

        assert!(ScoreCaps::default().exceeded_by(&bank).is_empty());
    }
}
