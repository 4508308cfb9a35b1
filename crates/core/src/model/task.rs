use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Item;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("choice count must be at least 1")]
    ZeroChoices,
    #[error("repetition count must be at least 1")]
    ZeroRepetitions,
    #[error("set count must be at least 1")]
    ZeroSets,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TaskSetError {
    #[error("question index {index} out of range for {choices} choices")]
    QuestionOutOfRange { index: usize, choices: usize },
}

//
// ─── TASK CONFIG ───────────────────────────────────────────────────────────────
//

/// Parameters for one generation run: how many choices appear per set, how
/// many questions each set asks, and how many sets are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskConfig {
    choice_count: usize,
    repetition_count: usize,
    set_count: usize,
}

impl TaskConfig {
    /// Validates and builds a config. All three counts must be positive.
    ///
    /// # Errors
    ///
    /// Returns the matching `ConfigError` variant for the first zero field.
    pub fn new(
        choice_count: usize,
        repetition_count: usize,
        set_count: usize,
    ) -> Result<Self, ConfigError> {
        if choice_count == 0 {
            return Err(ConfigError::ZeroChoices);
        }
        if repetition_count == 0 {
            return Err(ConfigError::ZeroRepetitions);
        }
        if set_count == 0 {
            return Err(ConfigError::ZeroSets);
        }
        Ok(Self {
            choice_count,
            repetition_count,
            set_count,
        })
    }

    #[must_use]
    pub fn choice_count(&self) -> usize {
        self.choice_count
    }

    #[must_use]
    pub fn repetition_count(&self) -> usize {
        self.repetition_count
    }

    #[must_use]
    pub fn set_count(&self) -> usize {
        self.set_count
    }
}

//
// ─── TASK SET ──────────────────────────────────────────────────────────────────
//

/// One generated set: a fixed list of distinct choices plus the sequence of
/// question targets, each an index into `choices`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSet {
    choices: Vec<Item>,
    questions: Vec<usize>,
}

impl TaskSet {
    /// Builds a set, enforcing that every question index is in range.
    ///
    /// # Errors
    ///
    /// Returns `TaskSetError::QuestionOutOfRange` for the first offending
    /// index.
    pub fn new(choices: Vec<Item>, questions: Vec<usize>) -> Result<Self, TaskSetError> {
        if let Some(&index) = questions.iter().find(|&&q| q >= choices.len()) {
            return Err(TaskSetError::QuestionOutOfRange {
                index,
                choices: choices.len(),
            });
        }
        Ok(Self { choices, questions })
    }

    #[must_use]
    pub fn choices(&self) -> &[Item] {
        &self.choices
    }

    #[must_use]
    pub fn questions(&self) -> &[usize] {
        &self.questions
    }

    /// The item asked at the given repetition, if any.
    #[must_use]
    pub fn question_item(&self, repetition: usize) -> Option<&Item> {
        self.questions
            .get(repetition)
            .map(|&index| &self.choices[index])
    }

    #[must_use]
    pub fn choice_count(&self) -> usize {
        self.choices.len()
    }

    #[must_use]
    pub fn repetition_count(&self) -> usize {
        self.questions.len()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
