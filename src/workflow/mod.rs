//! Entry workflow orchestration
//!
//! Loads the workspace, resolves actors against the roster and
//! catalog, and drives status transitions over stored entries.

mod actions;
mod context;

pub use actions::{
    approve_entries, record_value, refresh_index, reject_entries, reopen_entries, submit_entries,
    ActionSummary,
};
pub use context::{load_workspace, Workspace};
