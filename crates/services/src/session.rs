use chrono::{DateTime, Utc};
use rand::Rng;

use drill_core::{AnswerKey, AnswerLog, AnswerRecord, AnswerSummary, Item, TaskConfig, TaskSet};

use crate::error::{GenerateError, SessionError};
use crate::generator::generate_task;
use crate::report::DrillReport;

//
// ─── DRILL SESSION ─────────────────────────────────────────────────────────────
//

/// Session-scoped state for one drill run: the generated sets and the
/// answer log.
///
/// The log lives exactly as long as the current sets: regenerating replaces
/// the sets and clears the log, answering upserts records, and the summary
/// is recomputed from the log on every read. There is no hidden global
/// state; callers own the session and pass it where it is needed.
#[derive(Debug, Clone)]
pub struct DrillSession {
    sets: Vec<TaskSet>,
    log: AnswerLog,
    generated_at: DateTime<Utc>,
}

impl DrillSession {
    /// Generates a fresh session from the two pools.
    ///
    /// # Errors
    ///
    /// Propagates `GenerateError` from the task generator; no session is
    /// created on failure.
    pub fn generate<R: Rng + ?Sized>(
        strong: &[Item],
        normal: &[Item],
        config: &TaskConfig,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<Self, GenerateError> {
        let sets = generate_task(strong, normal, config, rng)?;
        Ok(Self {
            sets,
            log: AnswerLog::new(),
            generated_at: now,
        })
    }

    /// Convenience constructor drawing from the thread-local generator.
    ///
    /// # Errors
    ///
    /// Propagates `GenerateError` from the task generator.
    pub fn generate_with_default_rng(
        strong: &[Item],
        normal: &[Item],
        config: &TaskConfig,
        now: DateTime<Utc>,
    ) -> Result<Self, GenerateError> {
        let mut rng = rand::rng();
        Self::generate(strong, normal, config, &mut rng, now)
    }

    /// Replaces the sets and clears the answer log.
    ///
    /// # Errors
    ///
    /// Propagates `GenerateError`; on failure the existing sets and log are
    /// left untouched.
    pub fn regenerate<R: Rng + ?Sized>(
        &mut self,
        strong: &[Item],
        normal: &[Item],
        config: &TaskConfig,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<(), GenerateError> {
        let sets = generate_task(strong, normal, config, rng)?;
        self.sets = sets;
        self.log.clear();
        self.generated_at = now;
        Ok(())
    }

    /// Records one answered question; answering the same `(set,
    /// repetition)` again overwrites the earlier record in place.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Answer` when the question index does not
    /// address one of the given choices.
    pub fn record_answer(
        &mut self,
        choices: Vec<Item>,
        question_index: usize,
        set_index: usize,
        repetition_index: usize,
        is_correct: bool,
        answered_at: DateTime<Utc>,
    ) -> Result<&AnswerRecord, SessionError> {
        let record = AnswerRecord::new(choices, question_index, is_correct, answered_at)?;
        let key = AnswerKey::new(set_index, repetition_index);
        Ok(self.log.upsert(key, record))
    }

    /// Recomputes the aggregate summary from the log.
    #[must_use]
    pub fn summary(&self) -> AnswerSummary {
        AnswerSummary::from_log(&self.log)
    }

    /// Builds the textual report for the current log.
    #[must_use]
    pub fn report(&self) -> DrillReport {
        DrillReport::from_summary(&self.summary())
    }

    #[must_use]
    pub fn sets(&self) -> &[TaskSet] {
        &self.sets
    }

    #[must_use]
    pub fn log(&self) -> &AnswerLog {
        &self.log
    }

    #[must_use]
    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// Number of questions answered so far.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.log.len()
    }

    /// Total questions across all sets of this run.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.sets.iter().map(TaskSet::repetition_count).sum()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.answered_count() >= self.total_questions()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
