//! Entry status definitions
//!
//! Entries move through: draft → pending → approved | rejected,
//! and a rejected entry can return to draft for correction.

use crate::schemas::EntryStatus;

/// The canonical ordering of entry statuses for display and reporting.
///
/// IMPORTANT: This is the source of truth for status ordering.
/// Which transitions are allowed between statuses is defined by the
/// table in `rules`, not by adjacency here.
pub const ENTRY_STATUSES: &[EntryStatus] = &[
    EntryStatus::Draft,
    EntryStatus::Pending,
    EntryStatus::Approved,
    EntryStatus::Rejected,
];

/// Get the 0-based index of a status in the canonical ordering.
///
/// Returns the position in ENTRY_STATUSES, or usize::MAX if not found.
pub fn status_index(status: EntryStatus) -> usize {
    ENTRY_STATUSES
        .iter()
        .position(|&s| s == status)
        .unwrap_or(usize::MAX)
}

/// Check if a status is terminal.
///
/// Approved entries are immutable: no transition leaves approved.
/// Rejected is NOT terminal, it can return to draft.
pub fn is_terminal_status(status: EntryStatus) -> bool {
    status == EntryStatus::Approved
}
