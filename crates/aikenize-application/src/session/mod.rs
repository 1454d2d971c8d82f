//! Session application services.
//!
//! The editing session: current language, snippet and result, and the
//! submit lifecycle that ties the translation client to the history store.

mod controller;
mod state;

pub use controller::SessionController;
pub use state::{RejectReason, SessionSnapshot, SubmitOutcome};
