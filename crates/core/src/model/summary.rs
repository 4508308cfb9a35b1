use serde::{Deserialize, Serialize};

use crate::model::{AnswerLog, Item};

//
// ─── PER-SET SUMMARY ───────────────────────────────────────────────────────────
//

/// Outcome of one answered repetition within a set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetOutcome {
    pub item: Item,
    pub is_correct: bool,
}

/// All answered repetitions of one set, in the order they were answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetSummary {
    set_index: usize,
    choices: Vec<Item>,
    outcomes: Vec<SetOutcome>,
}

impl SetSummary {
    #[must_use]
    pub fn set_index(&self) -> usize {
        self.set_index
    }

    /// The choice list as first seen for this set.
    #[must_use]
    pub fn choices(&self) -> &[Item] {
        &self.choices
    }

    #[must_use]
    pub fn outcomes(&self) -> &[SetOutcome] {
        &self.outcomes
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.is_correct)
            .count() as u32
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.outcomes.len() as u32
    }

    /// Percentage correct, rounded to the nearest integer; `None` when
    /// nothing has been answered.
    #[must_use]
    pub fn percent(&self) -> Option<u32> {
        rounded_percent(self.correct(), self.total())
    }

    /// Compact answer history: one letter per repetition, `'a' + position`
    /// of the asked item within the choices, uppercase when correct.
    #[must_use]
    pub fn history(&self) -> String {
        self.outcomes
            .iter()
            .map(|outcome| {
                let position = self
                    .choices
                    .iter()
                    .position(|choice| choice == &outcome.item)
                    .unwrap_or(0);
                let letter = char::from_u32(u32::from(b'a') + position as u32).unwrap_or('?');
                if outcome.is_correct {
                    letter.to_ascii_uppercase()
                } else {
                    letter
                }
            })
            .collect()
    }
}

//
// ─── PER-ITEM STATS ────────────────────────────────────────────────────────────
//

/// Correct/total counts for one asked item, accumulated across all sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStats {
    item: Item,
    correct: u32,
    total: u32,
}

impl ItemStats {
    #[must_use]
    pub fn item(&self) -> &Item {
        &self.item
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn percent(&self) -> Option<u32> {
        rounded_percent(self.correct, self.total)
    }
}

//
// ─── ANSWER SUMMARY ────────────────────────────────────────────────────────────
//

/// Derived view over an `AnswerLog`, recomputed on every read.
///
/// Grouping order follows the log's first-answer order: sets appear in the
/// order their first question was answered, items in the order they were
/// first asked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSummary {
    per_set: Vec<SetSummary>,
    per_item: Vec<ItemStats>,
    total_correct: u32,
    total_answered: u32,
}

impl AnswerSummary {
    /// Aggregates the log in a single pass. Pure: the same log always
    /// yields the same summary.
    #[must_use]
    pub fn from_log(log: &AnswerLog) -> Self {
        let mut per_set: Vec<SetSummary> = Vec::new();
        let mut per_item: Vec<ItemStats> = Vec::new();
        let mut total_correct = 0_u32;
        let mut total_answered = 0_u32;

        for (key, record) in log.iter() {
            let item = record.asked_item().clone();
            let is_correct = record.is_correct();

            let set_pos = per_set
                .iter()
                .position(|set| set.set_index == key.set_index)
                .unwrap_or_else(|| {
                    per_set.push(SetSummary {
                        set_index: key.set_index,
                        choices: record.choices().to_vec(),
                        outcomes: Vec::new(),
                    });
                    per_set.len() - 1
                });
            per_set[set_pos].outcomes.push(SetOutcome {
                item: item.clone(),
                is_correct,
            });

            let item_pos = per_item
                .iter()
                .position(|stats| stats.item == item)
                .unwrap_or_else(|| {
                    per_item.push(ItemStats {
                        item: item.clone(),
                        correct: 0,
                        total: 0,
                    });
                    per_item.len() - 1
                });
            per_item[item_pos].total += 1;
            if is_correct {
                per_item[item_pos].correct += 1;
            }

            total_answered += 1;
            if is_correct {
                total_correct += 1;
            }
        }

        Self {
            per_set,
            per_item,
            total_correct,
            total_answered,
        }
    }

    #[must_use]
    pub fn per_set(&self) -> &[SetSummary] {
        &self.per_set
    }

    #[must_use]
    pub fn per_item(&self) -> &[ItemStats] {
        &self.per_item
    }

    #[must_use]
    pub fn total_correct(&self) -> u32 {
        self.total_correct
    }

    #[must_use]
    pub fn total_answered(&self) -> u32 {
        self.total_answered
    }

    #[must_use]
    pub fn percent(&self) -> Option<u32> {
        rounded_percent(self.total_correct, self.total_answered)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_answered == 0
    }
}

/// Rounds half away from zero, matching the original percentage display.
fn rounded_percent(correct: u32, total: u32) -> Option<u32> {
    (total > 0).then(|| (f64::from(correct) * 100.0 / f64::from(total)).round() as u32)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
