//! The status transition table
//!
//! Each row names the roles that may perform a transition and the
//! validation checks that must additionally hold. The table is total:
//! any (from, to) pair without a row is forbidden for every role.

use crate::schemas::{EntryStatus, Role};

/// A named validation rule a transition requires on top of its role gate.
///
/// The table only names the checks. Evaluating them against a concrete
/// entry happens in `validation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationCheck {
    /// Every required column of the category holds a non-blank value
    RequiredFieldsComplete,
    /// The actor's scope covers the entry's school
    ApprovalPermission,
    /// A non-empty rejection reason was given
    RejectionReason,
}

impl std::fmt::Display for ValidationCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ValidationCheck::RequiredFieldsComplete => "all required fields completed",
            ValidationCheck::ApprovalPermission => "has approval permission",
            ValidationCheck::RejectionReason => "rejection reason provided",
        };
        write!(f, "{}", s)
    }
}

/// One row of the transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRule {
    /// Status the entry must currently be in
    pub from: EntryStatus,

    /// Status the transition moves the entry to
    pub to: EntryStatus,

    /// Roles allowed to perform this transition
    pub roles: &'static [Role],

    /// Checks that must hold in addition to the role gate
    pub checks: &'static [ValidationCheck],
}

impl TransitionRule {
    /// Whether this rule's role gate admits the given role
    pub fn permits(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Roles that review pending entries
const REVIEWER_ROLES: &[Role] = &[Role::SectorAdmin, Role::RegionAdmin, Role::SuperAdmin];

/// The transition table.
///
/// IMPORTANT: This is the source of truth for the lifecycle.
/// No row leaves approved, which makes approved entries immutable.
pub const TRANSITIONS: &[TransitionRule] = &[
    TransitionRule {
        from: EntryStatus::Draft,
        to: EntryStatus::Pending,
        roles: &[Role::SchoolAdmin],
        checks: &[ValidationCheck::RequiredFieldsComplete],
    },
    TransitionRule {
        from: EntryStatus::Pending,
        to: EntryStatus::Approved,
        roles: REVIEWER_ROLES,
        checks: &[ValidationCheck::ApprovalPermission],
    },
    TransitionRule {
        from: EntryStatus::Pending,
        to: EntryStatus::Rejected,
        roles: REVIEWER_ROLES,
        checks: &[
            ValidationCheck::ApprovalPermission,
            ValidationCheck::RejectionReason,
        ],
    },
    TransitionRule {
        from: EntryStatus::Rejected,
        to: EntryStatus::Draft,
        roles: &[Role::SchoolAdmin],
        checks: &[],
    },
];

/// Look up the rule for a (from, to) pair.
///
/// Returns None when the pair has no row, which means the transition
/// is forbidden regardless of role. The table is four rows, a linear
/// scan is fine.
pub fn find_rule(from: EntryStatus, to: EntryStatus) -> Option<&'static TransitionRule> {
    TRANSITIONS.iter().find(|r| r.from == from && r.to == to)
}

/// Statuses reachable from the given status, in table order
pub fn allowed_targets(from: EntryStatus) -> Vec<EntryStatus> {
    TRANSITIONS
        .iter()
        .filter(|r| r.from == from)
        .map(|r| r.to)
        .collect()
}
