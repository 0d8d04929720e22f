//! Validation rules for status transitions and entered values

use chrono::NaiveDate;
use regex::Regex;

use crate::schemas::{Column, ColumnType, EntryStatus, FormCompletion, Role};

use super::rules::{find_rule, ValidationCheck};

lazy_static::lazy_static! {
    static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9][a-z0-9_-]*$").unwrap();
}

/// Check if a string is usable as a school/category/column id
pub fn is_valid_slug(s: &str) -> bool {
    SLUG_REGEX.is_match(s)
}

/// Context required for validating status transitions
#[derive(Debug, Clone)]
pub struct GuardContext {
    /// Completion survey of the entry's form (draft → pending)
    pub completion: Option<FormCompletion>,

    /// Whether the actor's scope covers the entry's school
    pub can_approve: bool,

    /// Reason supplied with a rejection
    pub rejection_reason: Option<String>,
}

impl Default for GuardContext {
    fn default() -> Self {
        GuardContext {
            completion: None,
            can_approve: false,
            rejection_reason: None,
        }
    }
}

/// Result of a validation check
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the validation passed
    pub valid: bool,

    /// Reason for failure (if valid is false)
    pub reason: Option<String>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        ValidationResult {
            valid: true,
            reason: None,
        }
    }

    /// Create a failed validation result
    pub fn failure(reason: impl Into<String>) -> Self {
        ValidationResult {
            valid: false,
            reason: Some(reason.into()),
        }
    }
}

/// Check that every required column of the form holds a value
pub fn check_required_fields(completion: Option<&FormCompletion>) -> ValidationResult {
    match completion {
        None => ValidationResult::failure("form completion is unknown"),
        Some(c) if c.is_complete() => ValidationResult::success(),
        Some(c) => {
            ValidationResult::failure(format!("required fields missing: {}", c.missing.join(", ")))
        }
    }
}

/// Check that the actor's scope covers the entry's school
pub fn check_approval_permission(can_approve: bool) -> ValidationResult {
    if !can_approve {
        return ValidationResult::failure("actor's scope does not cover this school");
    }
    ValidationResult::success()
}

/// Check that a non-empty rejection reason was given
pub fn check_rejection_reason(reason: Option<&str>) -> ValidationResult {
    match reason {
        Some(r) if !r.trim().is_empty() => ValidationResult::success(),
        _ => ValidationResult::failure("rejection reason is missing"),
    }
}

/// Evaluate one named check from the transition table
pub fn evaluate_check(check: ValidationCheck, ctx: &GuardContext) -> ValidationResult {
    match check {
        ValidationCheck::RequiredFieldsComplete => check_required_fields(ctx.completion.as_ref()),
        ValidationCheck::ApprovalPermission => check_approval_permission(ctx.can_approve),
        ValidationCheck::RejectionReason => check_rejection_reason(ctx.rejection_reason.as_deref()),
    }
}

/// Validate a status transition.
///
/// Consults the transition table: an unlisted (from, to) pair fails
/// for every role. Then the role gate, then each named check in the
/// rule's order. The first failing check decides the reason.
pub fn validate_transition(
    current: EntryStatus,
    target: EntryStatus,
    role: Role,
    ctx: &GuardContext,
) -> ValidationResult {
    let rule = match find_rule(current, target) {
        Some(rule) => rule,
        None => {
            return ValidationResult::failure(format!(
                "transition from {} to {} is not permitted",
                current, target
            ));
        }
    };

    if !rule.permits(role) {
        return ValidationResult::failure(format!(
            "role {} may not move entries from {} to {}",
            role, current, target
        ));
    }

    for check in rule.checks {
        let result = evaluate_check(*check, ctx);
        if !result.valid {
            return result;
        }
    }

    ValidationResult::success()
}

/// Validate a raw value against its column definition.
///
/// Values are stored as text; the column type decides what parses.
pub fn validate_value(column: &Column, raw: &str) -> ValidationResult {
    let value = raw.trim();
    if value.is_empty() {
        return ValidationResult::failure(format!("column {} needs a non-empty value", column.id));
    }

    match column.column_type {
        ColumnType::Text => {}
        ColumnType::Number => {
            if value.parse::<f64>().is_err() {
                return ValidationResult::failure(format!(
                    "column {} expects a number, got {:?}",
                    column.id, value
                ));
            }
        }
        ColumnType::Date => {
            if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
                return ValidationResult::failure(format!(
                    "column {} expects a date formatted YYYY-MM-DD, got {:?}",
                    column.id, value
                ));
            }
        }
        ColumnType::Select => {
            if !column.options.iter().any(|o| o == value) {
                return ValidationResult::failure(format!(
                    "column {} accepts one of [{}], got {:?}",
                    column.id,
                    column.options.join(", "),
                    value
                ));
            }
        }
    }

    if let Some(pattern) = &column.pattern {
        match Regex::new(pattern) {
            Ok(re) => {
                if !re.is_match(value) {
                    return ValidationResult::failure(format!(
                        "column {} requires values matching {}",
                        column.id, pattern
                    ));
                }
            }
            Err(_) => {
                return ValidationResult::failure(format!(
                    "column {} has an invalid pattern: {}",
                    column.id, pattern
                ));
            }
        }
    }

    ValidationResult::success()
}
