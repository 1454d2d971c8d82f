//! Translation history domain.
//!
//! The log itself is a pure value ([`HistoryLog`]); persistence goes through
//! [`HistoryRepository`] so the state transition and the write are separate
//! steps.

pub mod model;
pub mod repository;
pub mod seed;

pub use model::{HistoryLog, HistoryRecord};
pub use repository::HistoryRepository;
pub use seed::seed_history;
