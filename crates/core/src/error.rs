use thiserror::Error;

use crate::model::{IntensityError, QuestionError};
use crate::summary::SummaryError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Intensity(#[from] IntensityError),
    #[error(transparent)]
    Summary(#[from] SummaryError),
}
