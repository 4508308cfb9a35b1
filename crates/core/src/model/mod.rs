mod answer;
mod item;
mod summary;
mod task;

pub use answer::{AnswerError, AnswerKey, AnswerLog, AnswerRecord};
pub use item::Item;
pub use summary::{AnswerSummary, ItemStats, SetOutcome, SetSummary};
pub use task::{ConfigError, TaskConfig, TaskSet, TaskSetError};
