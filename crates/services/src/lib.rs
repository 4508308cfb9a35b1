#![forbid(unsafe_code)]

//! Drill generation and session services: fairness-weighted sampling,
//! balanced question selection, task generation, and the session-scoped
//! answer workflow built on the `drill-core` model.

pub mod error;
pub mod generator;
pub mod report;
pub mod sampler;
pub mod selector;
pub mod session;

pub use error::{GenerateError, SessionError};
pub use generator::generate_task;
pub use report::DrillReport;
pub use sampler::{UsageBins, pick_k_with_fairness};
pub use selector::balanced_question_index;
pub use session::DrillSession;
