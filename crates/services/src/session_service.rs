use chrono::{DateTime, Utc};
use std::sync::Arc;

use prakriti_core::Clock;
use prakriti_core::model::{Answer, DoshaScores, Intensity, QuestionBank, QuestionRecord};
use prakriti_core::scoring::ScoreAccumulator;
use prakriti_core::summary::{ResultSummary, ScoreCaps, summarize};

use crate::error::SessionError;
use crate::randomizer::Shuffler;

//
// ─── OUTCOME ───────────────────────────────────────────────────────────────────
//

/// Result of submitting a single answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubmitOutcome {
    /// Raw score added to the question's category (zero for non-matching
    /// answers).
    pub contribution: f64,
    pub is_complete: bool,
}

/// Lifecycle of a session. A freshly created session is already `InProgress`
/// (or `Complete` when the bank is empty); only `restart` re-enters
/// `InProgress` after completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    InProgress,
    Complete,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory assessment run over a shared question bank.
///
/// Owns its presentation order, running totals, and position; the bank itself
/// is shared read-only state. Each interactive user drives exactly one
/// session, strictly sequentially.
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    bank: Arc<QuestionBank>,
    caps: ScoreCaps,
    shuffler: Shuffler,
    order: Vec<usize>,
    scores: ScoreAccumulator,
    position: usize,
    clock: Clock,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl AssessmentSession {
    /// Starts a session: fresh permutation, zeroed totals, position 0.
    ///
    /// An empty bank goes straight to `Complete`.
    #[must_use]
    pub fn begin(
        bank: Arc<QuestionBank>,
        caps: ScoreCaps,
        mut shuffler: Shuffler,
        clock: Clock,
    ) -> Self {
        let order = shuffler.permutation(bank.len());
        let now = clock.now();
        let completed_at = bank.is_empty().then_some(now);

        Self {
            bank,
            caps,
            shuffler,
            order,
            scores: ScoreAccumulator::new(),
            position: 0,
            clock,
            started_at: now,
            completed_at,
        }
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        if self.is_complete() {
            SessionStatus::Complete
        } else {
            SessionStatus::InProgress
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.position >= self.bank.len()
    }

    /// Number of questions in this session.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.bank.len()
    }

    /// Number of questions already answered.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Fraction of the session completed, in `0.0..=1.0`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.bank.is_empty() {
            1.0
        } else {
            self.position as f64 / self.bank.len() as f64
        }
    }

    /// The question at the current position, through the presentation order.
    #[must_use]
    pub fn current_question(&self) -> Option<&QuestionRecord> {
        let index = *self.order.get(self.position)?;
        self.bank.get(index)
    }

    /// The shuffled index sequence for this run.
    #[must_use]
    pub fn presentation_order(&self) -> &[usize] {
        &self.order
    }

    #[must_use]
    pub fn totals(&self) -> DoshaScores {
        self.scores.totals()
    }

    #[must_use]
    pub fn caps(&self) -> ScoreCaps {
        self.caps
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Unrounded per-category percentages of the caps, for live displays.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Summary` when a cap is zero.
    pub fn live_percentages(&self) -> Result<DoshaScores, SessionError> {
        let totals = self.scores.totals();
        let mut percentages = DoshaScores::zero();
        for (dosha, total) in totals.entries() {
            percentages.set(dosha, self.caps.percentage(dosha, total)?);
        }
        Ok(percentages)
    }

    /// Applies an answer to the current question and advances.
    ///
    /// An intensity rating is required exactly when the answer matches the
    /// question's expected answer; a rating supplied alongside a non-matching
    /// answer is ignored. Nothing is mutated on rejection.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` when the session is finished and
    /// `SessionError::MissingIntensity` when a required rating is absent.
    pub fn submit(
        &mut self,
        answer: Answer,
        intensity: Option<Intensity>,
    ) -> Result<SubmitOutcome, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }

        let bank = Arc::clone(&self.bank);
        let Some(record) = self.order.get(self.position).and_then(|&i| bank.get(i)) else {
            return Err(SessionError::Completed);
        };

        if answer == record.expected() && intensity.is_none() {
            return Err(SessionError::MissingIntensity);
        }

        let contribution = self.scores.apply(record, answer, intensity);

        self.position += 1;
        let is_complete = self.position >= self.bank.len();
        if is_complete {
            self.completed_at = Some(self.clock.now());
        }

        Ok(SubmitOutcome {
            contribution,
            is_complete,
        })
    }

    /// Final percentage breakdown. Read-only; only available once complete.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InProgress` before completion and
    /// `SessionError::Summary` when a cap is zero.
    pub fn summary(&self) -> Result<ResultSummary, SessionError> {
        if !self.is_complete() {
            return Err(SessionError::InProgress);
        }
        Ok(summarize(&self.scores.totals(), &self.caps)?)
    }

    /// Resets the session from any state: totals zeroed, position 0, fresh
    /// permutation.
    pub fn restart(&mut self) {
        self.scores.reset();
        self.position = 0;
        self.order = self.shuffler.permutation(self.bank.len());
        self.started_at = self.clock.now();
        self.completed_at = self.bank.is_empty().then(|| self.clock.now());
    }
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Session factory over the process-wide question bank.
///
/// The bank is loaded once and shared read-only; every session gets its own
/// state and presentation order, so independent sessions never share mutable
/// state.
#[derive(Debug, Clone)]
pub struct AssessmentService {
    bank: Arc<QuestionBank>,
    caps: ScoreCaps,
    clock: Clock,
}

impl AssessmentService {
    #[must_use]
    pub fn new(bank: Arc<QuestionBank>) -> Self {
        Self {
            bank,
            caps: ScoreCaps::default(),
            clock: Clock::default(),
        }
    }

    #[must_use]
    pub fn with_caps(mut self, caps: ScoreCaps) -> Self {
        self.caps = caps;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn bank(&self) -> Arc<QuestionBank> {
        Arc::clone(&self.bank)
    }

    #[must_use]
    pub fn caps(&self) -> ScoreCaps {
        self.caps
    }

    /// Starts a session with thread-local randomness.
    #[must_use]
    pub fn start_session(&self) -> AssessmentSession {
        self.start_session_with(Shuffler::default())
    }

    /// Starts a session with an explicit shuffler (seeded in tests).
    #[must_use]
    pub fn start_session_with(&self, shuffler: Shuffler) -> AssessmentSession {
        AssessmentSession::begin(Arc::clone(&self.bank), self.caps, shuffler, self.clock)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use prakriti_core::model::{Dosha, QuestionId};
    use prakriti_core::time::fixed_now;

    fn record(id: u64, dosha: Dosha, expected: Answer, weight: f64) -> QuestionRecord {
        QuestionRecord::new(QuestionId::new(id), format!("Q{id}"), expected, dosha, weight)
            .unwrap()
    }

    fn service(records: Vec<QuestionRecord>) -> AssessmentService {
        AssessmentService::new(Arc::new(QuestionBank::from_records(records)))
            .with_clock(Clock::fixed(fixed_now()))
    }

    fn session(records: Vec<QuestionRecord>) -> AssessmentSession {
        service(records).start_session_with(Shuffler::seeded(42))
    }

    fn rating(value: u8) -> Option<Intensity> {
        Some(Intensity::new(value).unwrap())
    }

    fn assert_is_permutation(order: &[usize], n: usize) {
        let mut seen = vec![false; n];
        assert_eq!(order.len(), n);
        for &index in order {
            assert!(!seen[index]);
            seen[index] = true;
        }
    }

    #[test]
    fn completes_after_exactly_n_submits() {
        let mut session = session(vec![
            record(1, Dosha::Vata, Answer::Yes, 40.0),
            record(2, Dosha::Pitta, Answer::Yes, 40.0),
            record(3, Dosha::Kapha, Answer::Yes, 40.0),
        ]);

        for expected_position in 1..=3 {
            assert_eq!(session.status(), SessionStatus::InProgress);
            let outcome = session.submit(Answer::Yes, rating(3)).unwrap();
            assert_eq!(session.position(), expected_position);
            assert_eq!(outcome.is_complete, expected_position == 3);
        }

        assert_eq!(session.status(), SessionStatus::Complete);
        assert_eq!(session.completed_at(), Some(fixed_now()));
    }

    #[test]
    fn submit_after_completion_is_rejected_without_mutation() {
        let mut session = session(vec![record(1, Dosha::Pitta, Answer::Yes, 600.0)]);
        session.submit(Answer::Yes, rating(5)).unwrap();

        let totals = session.totals();
        let err = session.submit(Answer::Yes, rating(5)).unwrap_err();
        assert_eq!(err, SessionError::Completed);
        assert_eq!(session.totals(), totals);
        assert_eq!(session.position(), 1);
    }

    #[test]
    fn matching_answer_without_rating_is_rejected_without_mutation() {
        let mut session = session(vec![record(1, Dosha::Vata, Answer::Yes, 100.0)]);

        let err = session.submit(Answer::Yes, None).unwrap_err();
        assert_eq!(err, SessionError::MissingIntensity);
        assert_eq!(session.position(), 0);
        assert_eq!(session.totals(), DoshaScores::zero());
        assert_eq!(session.status(), SessionStatus::InProgress);
    }

    #[test]
    fn rating_alongside_a_non_matching_answer_is_ignored() {
        let mut session = session(vec![record(1, Dosha::Vata, Answer::Yes, 100.0)]);

        let outcome = session.submit(Answer::No, rating(5)).unwrap();
        assert_eq!(outcome.contribution, 0.0);
        assert_eq!(session.totals(), DoshaScores::zero());
        assert!(outcome.is_complete);
    }

    #[test]
    fn summary_is_unavailable_while_in_progress() {
        let session = session(vec![record(1, Dosha::Vata, Answer::Yes, 100.0)]);
        assert_eq!(session.summary().unwrap_err(), SessionError::InProgress);
    }

    #[test]
    fn restart_resets_everything_from_any_state() {
        let mut session = session(vec![
            record(1, Dosha::Vata, Answer::Yes, 40.0),
            record(2, Dosha::Pitta, Answer::Yes, 40.0),
        ]);
        session.submit(Answer::Yes, rating(5)).unwrap();
        session.submit(Answer::Yes, rating(5)).unwrap();
        assert!(session.is_complete());

        session.restart();

        assert_eq!(session.status(), SessionStatus::InProgress);
        assert_eq!(session.position(), 0);
        assert_eq!(session.totals(), DoshaScores::zero());
        assert_eq!(session.completed_at(), None);
        assert_is_permutation(session.presentation_order(), 2);
    }

    #[test]
    fn empty_bank_starts_complete_with_vata_dominant() {
        let mut session = session(Vec::new());

        assert_eq!(session.status(), SessionStatus::Complete);
        assert_eq!(session.progress(), 1.0);
        assert_eq!(session.submit(Answer::Yes, rating(3)).unwrap_err(), SessionError::Completed);

        let summary = session.summary().unwrap();
        assert_eq!(summary.dominant(), Dosha::Vata);
        assert_eq!(summary.percentages(), DoshaScores::zero());
    }

    #[test]
    fn matched_full_intensity_single_question_scores_the_full_cap() {
        let mut session = session(vec![record(1, Dosha::Pitta, Answer::Yes, 600.0)]);

        let outcome = session.submit(Answer::Yes, rating(5)).unwrap();
        assert_eq!(outcome.contribution, 600.0);
        assert_eq!(session.totals().get(Dosha::Pitta), 600.0);
        assert!(session.is_complete());

        let summary = session.summary().unwrap();
        assert_eq!(summary.percentages().get(Dosha::Pitta), 100.0);
        assert_eq!(summary.dominant(), Dosha::Pitta);
    }

    #[test]
    fn non_matching_answer_leaves_percentages_at_zero() {
        let mut session = session(vec![record(1, Dosha::Pitta, Answer::Yes, 600.0)]);

        session.submit(Answer::No, None).unwrap();
        assert!(session.is_complete());

        let summary = session.summary().unwrap();
        assert_eq!(summary.percentages().get(Dosha::Pitta), 0.0);
    }

    #[test]
    fn two_vata_questions_at_full_intensity_reach_the_vata_cap() {
        let mut session = session(vec![
            record(1, Dosha::Vata, Answer::Yes, 480.0),
            record(2, Dosha::Vata, Answer::Yes, 480.0),
        ]);

        session.submit(Answer::Yes, rating(5)).unwrap();
        session.submit(Answer::Yes, rating(5)).unwrap();

        let summary = session.summary().unwrap();
        assert_eq!(session.totals().get(Dosha::Vata), 960.0);
        assert_eq!(summary.percentages().get(Dosha::Vata), 100.0);
    }

    #[test]
    fn presentation_order_is_deterministic_for_a_seeded_shuffler() {
        let records: Vec<_> = (0..8)
            .map(|i| record(i, Dosha::Kapha, Answer::Yes, 10.0))
            .collect();
        let service = service(records);

        let first = service.start_session_with(Shuffler::seeded(9));
        let second = service.start_session_with(Shuffler::seeded(9));
        assert_eq!(first.presentation_order(), second.presentation_order());
        assert_is_permutation(first.presentation_order(), 8);
    }

    #[test]
    fn live_percentages_track_running_totals() {
        let mut session = session(vec![
            record(1, Dosha::Vata, Answer::Yes, 480.0),
            record(2, Dosha::Vata, Answer::Yes, 480.0),
        ]);

        session.submit(Answer::Yes, rating(5)).unwrap();
        let live = session.live_percentages().unwrap();
        assert_eq!(live.get(Dosha::Vata), 50.0);
        assert_eq!(live.get(Dosha::Pitta), 0.0);
    }

    #[test]
    fn sessions_do_not_share_state() {
        let service = service(vec![record(1, Dosha::Pitta, Answer::Yes, 600.0)]);
        let mut first = service.start_session_with(Shuffler::seeded(1));
        let second = service.start_session_with(Shuffler::seeded(2));

        first.submit(Answer::Yes, rating(5)).unwrap();
        assert_eq!(second.totals(), DoshaScores::zero());
        assert_eq!(second.position(), 0);
    }
}
