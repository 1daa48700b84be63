use serde::{Deserialize, Serialize};
use std::fmt;

//
// ─── DOSHA ─────────────────────────────────────────────────────────────────────
//

/// The three constitutional categories scored by the questionnaire.
///
/// The variants carry no behavioral meaning beyond identity; the declaration
/// order is load-bearing: `Dosha::ALL` defines the tie-break order for
/// dominant-category selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dosha {
    Vata,
    Pitta,
    Kapha,
}

impl Dosha {
    /// All categories in the fixed enumeration order used for tie-breaking.
    pub const ALL: [Dosha; 3] = [Dosha::Vata, Dosha::Pitta, Dosha::Kapha];

    /// Human-readable label, matching the source data's category values.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Dosha::Vata => "Vata",
            Dosha::Pitta => "Pitta",
            Dosha::Kapha => "Kapha",
        }
    }

    /// Parses a source label, tolerating surrounding whitespace and case.
    ///
    /// Returns `None` for labels that match no category; callers decide how
    /// to default (the bank loader falls back to `Kapha`).
    #[must_use]
    pub fn from_label(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        Self::ALL
            .into_iter()
            .find(|dosha| trimmed.eq_ignore_ascii_case(dosha.label()))
    }
}

impl fmt::Display for Dosha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//
// ─── DOSHA SCORES ──────────────────────────────────────────────────────────────
//

/// Per-category numeric map, used for accumulated totals and for percentages.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DoshaScores {
    vata: f64,
    pitta: f64,
    kapha: f64,
}

impl DoshaScores {
    /// A zeroed score map.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, dosha: Dosha) -> f64 {
        match dosha {
            Dosha::Vata => self.vata,
            Dosha::Pitta => self.pitta,
            Dosha::Kapha => self.kapha,
        }
    }

    /// Adds `amount` to a single category's value.
    pub fn add(&mut self, dosha: Dosha, amount: f64) {
        match dosha {
            Dosha::Vata => self.vata += amount,
            Dosha::Pitta => self.pitta += amount,
            Dosha::Kapha => self.kapha += amount,
        }
    }

    /// Overwrites a single category's value.
    pub fn set(&mut self, dosha: Dosha, value: f64) {
        match dosha {
            Dosha::Vata => self.vata = value,
            Dosha::Pitta => self.pitta = value,
            Dosha::Kapha => self.kapha = value,
        }
    }

    /// Entries in the fixed enumeration order.
    #[must_use]
    pub fn entries(&self) -> [(Dosha, f64); 3] {
        [
            (Dosha::Vata, self.vata),
            (Dosha::Pitta, self.pitta),
            (Dosha::Kapha, self.kapha),
        ]
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
