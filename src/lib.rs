//! Vocabulary drill session engine.
//!
//! [`trainer::Trainer`] is the core: it picks the next vocable to question,
//! checks answers, tracks per-entry and per-list progress, and decides when
//! the session is done. Storage is behind the [`gateway`] traits; two
//! backends ship with the crate (a JSON file store and an in-memory store).
//! Presentation is entirely the host's business — the engine only exposes
//! getters for the current question, solution, column labels and progress.

pub mod config;
pub mod diag;
pub mod error;
pub mod gateway;
pub mod store;
pub mod trainer;
pub mod vocab;

pub use config::Config;
pub use error::TrainerError;
pub use trainer::Trainer;
pub use vocab::{EntryId, ListId, QuestionMode, SessionSettings, VocableEntry, VocableList};
