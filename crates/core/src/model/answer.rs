use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::model::Item;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnswerError {
    #[error("question index {index} out of range for {choices} choices")]
    QuestionOutOfRange { index: usize, choices: usize },
}

//
// ─── ANSWER KEY & RECORD ───────────────────────────────────────────────────────
//

/// Position of one question within a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnswerKey {
    pub set_index: usize,
    pub repetition_index: usize,
}

impl AnswerKey {
    #[must_use]
    pub fn new(set_index: usize, repetition_index: usize) -> Self {
        Self {
            set_index,
            repetition_index,
        }
    }
}

/// One answered question: the choices shown, which of them was asked, and
/// whether the user judged it correctly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    choices: Vec<Item>,
    question_index: usize,
    is_correct: bool,
    answered_at: DateTime<Utc>,
}

impl AnswerRecord {
    /// Builds a record, enforcing that the question index addresses one of
    /// the given choices.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError::QuestionOutOfRange` otherwise.
    pub fn new(
        choices: Vec<Item>,
        question_index: usize,
        is_correct: bool,
        answered_at: DateTime<Utc>,
    ) -> Result<Self, AnswerError> {
        if question_index >= choices.len() {
            return Err(AnswerError::QuestionOutOfRange {
                index: question_index,
                choices: choices.len(),
            });
        }
        Ok(Self {
            choices,
            question_index,
            is_correct,
            answered_at,
        })
    }

    #[must_use]
    pub fn choices(&self) -> &[Item] {
        &self.choices
    }

    #[must_use]
    pub fn question_index(&self) -> usize {
        self.question_index
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }

    #[must_use]
    pub fn answered_at(&self) -> DateTime<Utc> {
        self.answered_at
    }

    /// The item the question actually asked about.
    #[must_use]
    pub fn asked_item(&self) -> &Item {
        &self.choices[self.question_index]
    }
}

//
// ─── ANSWER LOG ────────────────────────────────────────────────────────────────
//

/// Session-scoped log of answered questions, keyed by `(set, repetition)`.
///
/// Re-answering a question overwrites the stored record in place: the key
/// keeps its original position in iteration order, so summaries stay in the
/// order questions were first answered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerLog {
    records: HashMap<AnswerKey, AnswerRecord>,
    order: Vec<AnswerKey>,
}

impl AnswerLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the record for the given key and returns a
    /// reference to the stored value.
    pub fn upsert(&mut self, key: AnswerKey, record: AnswerRecord) -> &AnswerRecord {
        if !self.records.contains_key(&key) {
            self.order.push(key);
        }
        self.records.insert(key, record);
        &self.records[&key]
    }

    #[must_use]
    pub fn get(&self, key: &AnswerKey) -> Option<&AnswerRecord> {
        self.records.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drops all records. Invoked when a new task is generated.
    pub fn clear(&mut self) {
        self.records.clear();
        self.order.clear();
    }

    /// Iterates records in the order their keys were first answered.
    pub fn iter(&self) -> impl Iterator<Item = (&AnswerKey, &AnswerRecord)> {
        self.order.iter().map(|key| (key, &self.records[key]))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn record(labels: &[&str], question: usize, correct: bool, secs: i64) -> AnswerRecord {
        let choices = labels.iter().map(|&l| Item::from(l)).collect();
        AnswerRecord::new(choices, question, correct, at(secs)).unwrap()
    }

    #[test]
    fn record_rejects_out_of_range_question() {
        let choices = vec![Item::from("A"), Item::from("B")];
        let err = AnswerRecord::new(choices, 2, true, at(0)).unwrap_err();
        assert_eq!(
            err,
            AnswerError::QuestionOutOfRange {
                index: 2,
                choices: 2
            }
        );
    }

    #[test]
    fn asked_item_follows_question_index() {
        let rec = record(&["A", "B", "C"], 1, true, 0);
        assert_eq!(rec.asked_item(), &Item::from("B"));
    }

    #[test]
    fn upsert_replaces_same_key_without_growing() {
        let mut log = AnswerLog::new();
        let key = AnswerKey::new(0, 1);

        log.upsert(key, record(&["A", "B"], 0, false, 0));
        assert_eq!(log.len(), 1);

        log.upsert(key, record(&["A", "B"], 0, true, 5));
        assert_eq!(log.len(), 1);
        assert!(log.get(&key).unwrap().is_correct());
    }

    #[test]
    fn iteration_preserves_first_answer_order() {
        let mut log = AnswerLog::new();
        log.upsert(AnswerKey::new(1, 0), record(&["A", "B"], 0, true, 0));
        log.upsert(AnswerKey::new(0, 0), record(&["C", "D"], 1, false, 1));
        // Re-answering must not move the key to the back.
        log.upsert(AnswerKey::new(1, 0), record(&["A", "B"], 0, false, 2));

        let keys: Vec<AnswerKey> = log.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![AnswerKey::new(1, 0), AnswerKey::new(0, 0)]);
    }

    #[test]
    fn clear_empties_the_log() {
        let mut log = AnswerLog::new();
        log.upsert(AnswerKey::new(0, 0), record(&["A", "B"], 0, true, 0));
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.iter().count(), 0);
    }
}
