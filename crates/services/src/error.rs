//! Shared error types for the services crate.

use thiserror::Error;

use prakriti_core::model::{IntensityError, QuestionError};
use prakriti_core::summary::SummaryError;

/// Errors emitted while loading the question bank.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankLoadError {
    #[error("failed to read question source {path}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("question source is not a parseable table")]
    Malformed(#[from] csv::Error),
    #[error("question source is missing required column {0:?}")]
    MissingColumn(&'static str),
    #[error(transparent)]
    Question(#[from] QuestionError),
}

/// Errors emitted by the assessment session state machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("assessment already completed")]
    Completed,
    #[error("assessment still in progress")]
    InProgress,
    #[error("an intensity rating is required when the answer matches the expected one")]
    MissingIntensity,
    #[error(transparent)]
    Intensity(#[from] IntensityError),
    #[error(transparent)]
    Summary(#[from] SummaryError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Load(#[from] BankLoadError),
}
