use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Errors for out-of-range intensity ratings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IntensityError {
    #[error("intensity must be between 1 and 5, got {0}")]
    OutOfRange(u8),
}

//
// ─── ANSWER ────────────────────────────────────────────────────────────────────
//

/// A Yes/No response to a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Answer::Yes => "Yes",
            Answer::No => "No",
        }
    }

    /// Parses a source label, tolerating surrounding whitespace and case.
    ///
    /// Returns `None` for anything that is neither Yes nor No; the bank loader
    /// treats those like missing values and defaults to `Yes`.
    #[must_use]
    pub fn from_label(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("yes") {
            Some(Answer::Yes)
        } else if trimmed.eq_ignore_ascii_case("no") {
            Some(Answer::No)
        } else {
            None
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//
// ─── INTENSITY ─────────────────────────────────────────────────────────────────
//

/// Strength rating (1 = mild, 5 = very strong) scaling a matched question's
/// weight contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Intensity(u8);

impl Intensity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Validates and wraps a raw rating.
    ///
    /// # Errors
    ///
    /// Returns `IntensityError::OutOfRange` when the value is not in 1..=5.
    pub fn new(value: u8) -> Result<Self, IntensityError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(IntensityError::OutOfRange(value))
        }
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// The fraction of a question's weight this rating contributes.
    #[must_use]
    pub fn factor(self) -> f64 {
        f64::from(self.0) / f64::from(Self::MAX)
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_labels_parse_leniently() {
        assert_eq!(Answer::from_label("Yes"), Some(Answer::Yes));
        assert_eq!(Answer::from_label(" no \n"), Some(Answer::No));
        assert_eq!(Answer::from_label("YES"), Some(Answer::Yes));
        assert_eq!(Answer::from_label("maybe"), None);
    }

    #[test]
    fn intensity_accepts_the_full_scale() {
        for value in 1..=5 {
            let intensity = Intensity::new(value).unwrap();
            assert_eq!(intensity.value(), value);
        }
    }

    #[test]
    fn intensity_rejects_out_of_range_values() {
        let err = Intensity::new(0).unwrap_err();
        assert!(matches!(err, IntensityError::OutOfRange(0)));
        let err = Intensity::new(6).unwrap_err();
        assert!(matches!(err, IntensityError::OutOfRange(6)));
    }

    #[test]
    fn factor_scales_linearly() {
        assert_eq!(Intensity::new(5).unwrap().factor(), 1.0);
        assert_eq!(Intensity::new(1).unwrap().factor(), 0.2);
        assert_eq!(Intensity::new(3).unwrap().factor(), 0.6);
    }
}
