//! CLI command implementations

pub mod approve;
pub mod doctor;
pub mod enter;
pub mod init;
pub mod list;
pub mod reject;
pub mod reopen;
pub mod show;
pub mod status;
pub mod submit;

use crate::workflow::ActionSummary;

/// Print one line per entry an action moved or refused
pub(crate) fn print_summary(summary: &ActionSummary, verb: &str) {
    for key in &summary.applied {
        println!("{} {}", verb, key);
    }
    for (key, reason) in &summary.denied {
        println!("Skipped {}: {}", key, reason);
    }
}
