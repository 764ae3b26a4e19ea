//! Session core: snapshot, undo history, synthetic progress, and the
//! session state manager that mediates all mutations.

mod errors;
mod history;
mod manager;
mod phase;
mod progress;
mod snapshot;

pub use errors::SessionError;
pub use history::{UndoHistory, HISTORY_CAP};
pub use manager::{SessionManager, SessionView};
pub use phase::SessionPhase;
pub use progress::{EstimationProgress, PROGRESS_TICK};
pub use snapshot::SessionSnapshot;
