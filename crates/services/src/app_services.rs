//! Composition root: loads the question bank once and wires up the services
//! the interactive surface consumes.

use std::path::Path;
use std::sync::Arc;

use prakriti_core::model::QuestionBank;
use prakriti_core::summary::ScoreCaps;

use crate::error::AppServicesError;
use crate::session_service::AssessmentService;

#[derive(Debug)]
pub struct AppServices {
    assessment: Arc<AssessmentService>,
}

impl AppServices {
    /// Loads the question bank from `source` and builds the assessment
    /// service around it.
    ///
    /// The caps are checked against the bank's true attainable maxima; a cap
    /// that understates its maximum is logged, never corrected, so reported
    /// percentages keep the source survey's semantics.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Load` when the source cannot be read or
    /// parsed; the core cannot proceed without a bank.
    pub fn init(source: impl AsRef<Path>) -> Result<Self, AppServicesError> {
        let bank = Arc::new(crate::bank_loader::load_bank(source)?);
        Ok(Self::from_bank(bank))
    }

    /// Builds services around an already-loaded bank (used by tests).
    #[must_use]
    pub fn from_bank(bank: Arc<QuestionBank>) -> Self {
        let caps = ScoreCaps::default();
        for (dosha, attainable) in caps.exceeded_by(&bank) {
            tracing::warn!(
                %dosha,
                attainable,
                cap = caps.get(dosha),
                "score cap understates the attainable maximum; percentages may exceed 100"
            );
        }
        tracing::info!(questions = bank.len(), "question bank ready");

        Self {
            assessment: Arc::new(AssessmentService::new(bank).with_caps(caps)),
        }
    }

    #[must_use]
    pub fn assessment(&self) -> Arc<AssessmentService> {
        Arc::clone(&self.assessment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prakriti_core::model::{Answer, Dosha, QuestionId, QuestionRecord};

    #[test]
    fn builds_a_working_service_from_a_bank() {
        let record =
            QuestionRecord::new(QuestionId::new(1), "Q", Answer::Yes, Dosha::Vata, 60.0).unwrap();
        let services = AppServices::from_bank(Arc::new(QuestionBank::from_records(vec![record])));

        let session = services.assessment().start_session();
        assert_eq!(session.total_questions(), 1);
    }

    #[test]
    fn init_fails_for_a_missing_source() {
        let err = AppServices::init("no/such/file.csv").unwrap_err();
        assert!(matches!(err, AppServicesError::Load(_)));
    }
}
