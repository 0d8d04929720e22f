//! Domain logic for the entry status lifecycle

mod permissions;
mod rules;
mod status;
mod transitions;
mod validation;


pub use permissions::{can_act_for_school, can_approve_school, can_edit_entries, can_view_school};
pub use rules::{allowed_targets, find_rule, TransitionRule, ValidationCheck, TRANSITIONS};
pub use status::{is_terminal_status, status_index, ENTRY_STATUSES};
pub use transitions::{apply_transition, TransitionOutcome};
pub use validation::{
    check_approval_permission, check_rejection_reason, check_required_fields, evaluate_check,
    is_valid_slug, validate_transition, validate_value, GuardContext, ValidationResult,
};
