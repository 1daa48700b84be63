use std::sync::Arc;

use services::AssessmentService;

/// Shared services handed to views by the composition root (`crates/app`).
#[derive(Clone)]
pub struct AppContext {
    assessment: Arc<AssessmentService>,
}

impl AppContext {
    #[must_use]
    pub fn new(assessment: Arc<AssessmentService>) -> Self {
        Self { assessment }
    }

    #[must_use]
    pub fn assessment(&self) -> Arc<AssessmentService> {
        Arc::clone(&self.assessment)
    }
}
