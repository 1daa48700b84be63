use prakriti_core::model::{Answer, DoshaScores, Intensity};
use prakriti_core::summary::ResultSummary;
use services::{AssessmentService, AssessmentSession, SessionError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssessmentOutcome {
    Continue,
    Completed,
}

/// View-model around one assessment session.
///
/// Keeps the session itself out of the view tree and translates the raw
/// slider value into a validated intensity only when the chosen answer makes
/// the rating meaningful.
pub struct AssessmentVm {
    session: AssessmentSession,
}

impl AssessmentVm {
    #[must_use]
    pub fn new(session: AssessmentSession) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn start(service: &AssessmentService) -> Self {
        Self::new(service.start_session())
    }

    #[must_use]
    pub fn question_text(&self) -> Option<&str> {
        self.session.current_question().map(|record| record.text())
    }

    /// Whether the rating slider applies to the given answer for the current
    /// question.
    #[must_use]
    pub fn rating_applies(&self, answer: Answer) -> bool {
        self.session
            .current_question()
            .is_some_and(|record| record.expected() == answer)
    }

    /// Number of questions already answered.
    #[must_use]
    pub fn position(&self) -> usize {
        self.session.position()
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.session.total_questions()
    }

    /// Whole-number percent completed, for the progress bar label.
    #[must_use]
    pub fn progress_percent(&self) -> u32 {
        (self.session.progress() * 100.0) as u32
    }

    /// Unrounded live percentages for the running bar chart.
    #[must_use]
    pub fn live_percentages(&self) -> DoshaScores {
        self.session.live_percentages().unwrap_or_default()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.session.is_complete()
    }

    /// Submits the current selection, attaching the rating only when the
    /// answer matches the expected one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` for an out-of-range rating or a submit against
    /// a completed session.
    pub fn submit(&mut self, answer: Answer, rating: u8) -> Result<AssessmentOutcome, SessionError> {
        let intensity = if self.rating_applies(answer) {
            Some(Intensity::new(rating)?)
        } else {
            None
        };

        let outcome = self.session.submit(answer, intensity)?;
        Ok(if outcome.is_complete {
            AssessmentOutcome::Completed
        } else {
            AssessmentOutcome::Continue
        })
    }

    #[must_use]
    pub fn summary(&self) -> Option<ResultSummary> {
        self.session.summary().ok()
    }

    pub fn restart(&mut self) {
        self.session.restart();
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
