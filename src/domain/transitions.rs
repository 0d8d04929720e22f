//! Status transition logic
//!
//! Pure functions for applying status transitions to entries.

use crate::schemas::{Entry, EntryStatus, Role};

use super::validation::{validate_transition, GuardContext};

/// Result of a status transition attempt
#[derive(Debug)]
pub enum TransitionOutcome {
    /// Successful transition with the updated entry
    Applied {
        /// The entry with updated status, audit fields and timestamp
        next_entry: Entry,
    },
    /// Refused transition with the reason
    Denied {
        /// Description of why the transition was refused
        reason: String,
    },
}

impl TransitionOutcome {
    /// Check if the transition was applied
    pub fn is_applied(&self) -> bool {
        matches!(self, TransitionOutcome::Applied { .. })
    }

    /// Check if the transition was refused
    pub fn is_denied(&self) -> bool {
        matches!(self, TransitionOutcome::Denied { .. })
    }

    /// Get the updated entry if the transition was applied
    pub fn entry(self) -> Option<Entry> {
        match self {
            TransitionOutcome::Applied { next_entry } => Some(next_entry),
            TransitionOutcome::Denied { .. } => None,
        }
    }

    /// Get the refusal reason if the transition was denied
    pub fn reason(self) -> Option<String> {
        match self {
            TransitionOutcome::Applied { .. } => None,
            TransitionOutcome::Denied { reason } => Some(reason),
        }
    }
}

/// Pure function that applies a status transition to an entry.
///
/// This function:
/// - Never mutates the input entry
/// - Validates the transition before applying
/// - Returns a new Entry with updated status, audit stamps and updated_at
/// - Returns the refusal reason if the transition is not allowed
///
/// # Arguments
/// * `entry` - The current entry (immutable reference)
/// * `target` - The status to move to
/// * `actor` - Name recorded in audit fields
/// * `role` - Role the actor holds
/// * `ctx` - Guard context with the evaluated check inputs
pub fn apply_transition(
    entry: &Entry,
    target: EntryStatus,
    actor: &str,
    role: Role,
    ctx: &GuardContext,
) -> TransitionOutcome {
    let validation = validate_transition(entry.status, target, role, ctx);
    if !validation.valid {
        return TransitionOutcome::Denied {
            reason: validation
                .reason
                .unwrap_or_else(|| "transition validation failed".to_string()),
        };
    }

    // Build a new entry with the required stamps - never mutate the original.
    // Reopening keeps the rejection audit so the school still sees why;
    // it is cleared again on the next submission.
    let next_entry = match target {
        EntryStatus::Pending => entry
            .clone()
            .with_rejection_cleared()
            .with_status(EntryStatus::Pending),
        EntryStatus::Approved => entry.clone().with_approval(actor),
        EntryStatus::Rejected => {
            let reason = ctx.rejection_reason.clone().unwrap_or_default();
            entry.clone().with_rejection(actor, &reason)
        }
        EntryStatus::Draft => entry.clone().with_status(EntryStatus::Draft),
    };

    TransitionOutcome::Applied { next_entry }
}
