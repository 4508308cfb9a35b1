#![forbid(unsafe_code)]

//! Domain model for pairwise drill generation: items, task sets, the
//! answer log, and the derived answer summary.

pub mod model;

pub use model::{
    AnswerError, AnswerKey, AnswerLog, AnswerRecord, AnswerSummary, ConfigError, Item, ItemStats,
    SetOutcome, SetSummary, TaskConfig, TaskSet, TaskSetError,
};
