//! Application layer for aikenize.
//!
//! Coordinates the domain types with storage, the translation client and
//! the clipboard: the history store, the session controller and the file
//! and clipboard actions around it.

pub mod context;
pub mod history_store;
pub mod session;
pub mod workbench_io;

pub use context::{AppContext, AppOptions};
pub use history_store::HistoryStore;
pub use session::{RejectReason, SessionController, SessionSnapshot, SubmitOutcome};
pub use workbench_io::WorkbenchIo;
