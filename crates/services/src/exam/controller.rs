use exam_core::model::{ChoiceKey, ExamConfig, SubmissionResult};
use tracing::info;

use super::countdown::{Countdown, Tick};
use super::scoring::score_answers;
use super::session::ExamSession;
use crate::error::SessionError;

/// What caused a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTrigger {
    Confirmed,
    TimeExpired,
}

/// Counts shown in the confirmation prompt. Computing it changes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitPreview {
    pub answered: usize,
    pub flagged: usize,
    pub total: usize,
}

impl SubmitPreview {
    #[must_use]
    pub fn unanswered(&self) -> usize {
        self.total - self.answered
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Clock still running; carries the `M:SS` label.
    Running(String),
    /// The clock ran out and the exam was submitted on this tick.
    Submitted(SubmissionResult),
    /// Nothing to do: already submitted or the clock is stopped.
    Idle,
}

/// User-driven events of the exam view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamIntent {
    Select(ChoiceKey),
    Previous,
    Next,
    GoTo(usize),
    ToggleFlag,
    RequestSubmit,
    CancelSubmit,
    ConfirmSubmit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
    Updated,
    Unchanged,
    Submitted(SubmissionResult),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Active,
    Confirming,
    Submitted,
}

/// Owns one exam from first render to handoff.
///
/// Submission is a one-way gate: whichever of a confirmed submit or timer
/// expiry arrives first produces the only `SubmissionResult`.
#[derive(Debug, Clone)]
pub struct ExamController {
    config: ExamConfig,
    session: ExamSession,
    countdown: Countdown,
    phase: Phase,
}

impl ExamController {
    #[must_use]
    pub fn new(config: ExamConfig, session: ExamSession, countdown: Countdown) -> Self {
        Self {
            config,
            session,
            countdown,
            phase: Phase::Active,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ExamConfig {
        &self.config
    }

    #[must_use]
    pub fn session(&self) -> &ExamSession {
        &self.session
    }

    #[must_use]
    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    #[must_use]
    pub fn time_label(&self) -> String {
        self.countdown.label()
    }

    #[must_use]
    pub fn is_confirming(&self) -> bool {
        self.phase == Phase::Confirming
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.phase == Phase::Submitted
    }

    #[must_use]
    pub fn submit_preview(&self) -> SubmitPreview {
        SubmitPreview {
            answered: self.session.answered_count(),
            flagged: self.session.flagged_count(),
            total: self.session.len(),
        }
    }

    /// Score the session and close the gate.
    ///
    /// The countdown is stopped on every call.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadySubmitted` on every call after the first
    /// successful one.
    pub fn submit(&mut self, trigger: SubmitTrigger) -> Result<SubmissionResult, SessionError> {
        self.countdown.stop();
        if self.is_submitted() {
            return Err(SessionError::AlreadySubmitted);
        }

        let correct = score_answers(self.session.questions(), self.session.answers());
        let total = u32::try_from(self.session.len()).unwrap_or(u32::MAX);
        let elapsed = self.countdown.elapsed_seconds();
        let result = SubmissionResult::new(correct, total, elapsed, self.config.clone())?;
        self.phase = Phase::Submitted;

        info!(
            ?trigger,
            exam = %self.config.exam_id(),
            correct,
            total,
            elapsed,
            "exam submitted"
        );
        Ok(result)
    }

    /// Advance the clock by one second, submitting on expiry.
    pub fn tick(&mut self) -> TickOutcome {
        if self.is_submitted() {
            return TickOutcome::Idle;
        }
        match self.countdown.tick() {
            Tick::Running(_) => TickOutcome::Running(self.countdown.label()),
            Tick::Expired => match self.submit(SubmitTrigger::TimeExpired) {
                Ok(result) => TickOutcome::Submitted(result),
                Err(_) => TickOutcome::Idle,
            },
            Tick::Stopped => TickOutcome::Idle,
        }
    }

    pub fn dispatch(&mut self, intent: ExamIntent) -> IntentOutcome {
        if self.is_submitted() {
            return IntentOutcome::Unchanged;
        }
        let changed = match intent {
            ExamIntent::Select(key) => {
                self.session.select_answer(key);
                true
            }
            ExamIntent::Previous => self.session.go_to_previous(),
            ExamIntent::Next => self.session.go_to_next(),
            ExamIntent::GoTo(index) => self.session.go_to(index),
            ExamIntent::ToggleFlag => {
                let before = self.session.flagged_count();
                self.session.toggle_flag();
                before != self.session.flagged_count()
            }
            ExamIntent::RequestSubmit => {
                let changed = self.phase != Phase::Confirming;
                self.phase = Phase::Confirming;
                changed
            }
            ExamIntent::CancelSubmit => {
                let changed = self.phase == Phase::Confirming;
                self.phase = Phase::Active;
                changed
            }
            ExamIntent::ConfirmSubmit => {
                return match self.submit(SubmitTrigger::Confirmed) {
                    Ok(result) => IntentOutcome::Submitted(result),
                    Err(_) => IntentOutcome::Unchanged,
                };
            }
        };
        if changed {
            IntentOutcome::Updated
        } else {
            IntentOutcome::Unchanged
        }
    }
}
