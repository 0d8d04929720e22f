//! Entry actions shared by the CLI commands
//!
//! Recording values, submitting forms, and reviewing pending entries
//! all run through here so the commands stay thin.

use std::path::Path;

use tracing::{debug, info};

use crate::domain::{
    apply_transition, can_act_for_school, can_edit_entries, validate_value, TransitionOutcome,
};
use crate::errors::{InfolineError, Result};
use crate::fs;
use crate::schemas::{Entry, EntryKey, EntryStatus, Index, Role};

use super::context::Workspace;

/// Outcome of an action over one or more entries
#[derive(Debug, Default)]
pub struct ActionSummary {
    /// Keys that moved to the target status
    pub applied: Vec<EntryKey>,

    /// Keys that were refused, with the reason
    pub denied: Vec<(EntryKey, String)>,
}

impl ActionSummary {
    /// Whether any entry moved
    pub fn any_applied(&self) -> bool {
        !self.applied.is_empty()
    }

    /// Whether the action found nothing to act on
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty() && self.denied.is_empty()
    }
}

/// Record a value for one column, creating or updating a draft entry.
///
/// Only the school's own school-admin enters data. An entry that left
/// draft is locked: pending waits for review, approved is immutable,
/// rejected must be reopened first.
pub fn record_value(
    workspace: &Workspace,
    key: &EntryKey,
    raw: &str,
    dry_run: bool,
) -> Result<Entry> {
    let actor = &workspace.config.actor;
    let school = workspace.school(&key.school_id)?;
    let column = workspace.column(&key.category_id, &key.column_id)?;

    if !can_edit_entries(actor.role) {
        return Err(InfolineError::PermissionDenied(format!(
            "role {} does not enter data",
            actor.role
        )));
    }
    if !can_act_for_school(actor, school) {
        return Err(InfolineError::PermissionDenied(format!(
            "{} is not the school-admin of {}",
            actor.name, school.id
        )));
    }

    let check = validate_value(column, raw);
    if !check.valid {
        return Err(InfolineError::ValueInvalid(
            check.reason.unwrap_or_else(|| "value failed validation".to_string()),
        ));
    }
    let value = raw.trim().to_string();

    let entry = if fs::entry_exists(&workspace.root, key) {
        let existing = fs::read_entry(&workspace.root, key)?;
        match existing.status {
            EntryStatus::Draft => existing.with_value(value),
            EntryStatus::Pending => {
                return Err(InfolineError::TransitionDenied(format!(
                    "entry {} is pending review and cannot be edited",
                    key
                )));
            }
            EntryStatus::Approved => {
                return Err(InfolineError::TransitionDenied(format!(
                    "entry {} is approved and immutable",
                    key
                )));
            }
            EntryStatus::Rejected => {
                return Err(InfolineError::TransitionDenied(format!(
                    "entry {} was rejected; reopen it before editing",
                    key
                )));
            }
        }
    } else {
        Entry::new(key.clone(), value, actor.name.clone())
    };

    if dry_run {
        info!("[DRY RUN] Would record {} = {:?}", key, entry.value);
        return Ok(entry);
    }

    fs::write_entry(&workspace.root, &entry)?;
    refresh_index(&workspace.root)?;
    info!("Recorded {} = {:?}", key, entry.value);
    Ok(entry)
}

/// Submit a form's draft entries for review.
///
/// With a column, submits that single entry; otherwise every draft
/// entry of the (school, category) form.
pub fn submit_entries(
    workspace: &Workspace,
    school_id: &str,
    category_id: &str,
    column_id: Option<&str>,
    dry_run: bool,
) -> Result<ActionSummary> {
    let school = workspace.school(school_id)?;
    workspace.category(category_id)?;
    check_school_ownership(workspace, school_id)?;
    debug!("Submitting {}/{} as {}", school.id, category_id, workspace.config.actor.name);

    let targets =
        select_targets(workspace, school_id, Some(category_id), column_id, EntryStatus::Draft)?;
    let summary = apply_to_entries(workspace, targets, EntryStatus::Pending, None, dry_run)?;
    finish(workspace, summary, "submit", dry_run)
}

/// Approve pending entries within the reviewer's scope.
pub fn approve_entries(
    workspace: &Workspace,
    school_id: &str,
    category_id: Option<&str>,
    column_id: Option<&str>,
    dry_run: bool,
) -> Result<ActionSummary> {
    workspace.school(school_id)?;
    if let Some(category) = category_id {
        workspace.category(category)?;
    }

    let targets = select_targets(workspace, school_id, category_id, column_id, EntryStatus::Pending)?;
    let summary = apply_to_entries(workspace, targets, EntryStatus::Approved, None, dry_run)?;
    finish(workspace, summary, "approve", dry_run)
}

/// Reject pending entries with a reason.
pub fn reject_entries(
    workspace: &Workspace,
    school_id: &str,
    reason: &str,
    category_id: Option<&str>,
    column_id: Option<&str>,
    dry_run: bool,
) -> Result<ActionSummary> {
    workspace.school(school_id)?;
    if let Some(category) = category_id {
        workspace.category(category)?;
    }

    let targets = select_targets(workspace, school_id, category_id, column_id, EntryStatus::Pending)?;
    let summary =
        apply_to_entries(workspace, targets, EntryStatus::Rejected, Some(reason), dry_run)?;
    finish(workspace, summary, "reject", dry_run)
}

/// Return rejected entries to draft for correction.
pub fn reopen_entries(
    workspace: &Workspace,
    school_id: &str,
    category_id: Option<&str>,
    column_id: Option<&str>,
    dry_run: bool,
) -> Result<ActionSummary> {
    workspace.school(school_id)?;
    if let Some(category) = category_id {
        workspace.category(category)?;
    }
    check_school_ownership(workspace, school_id)?;

    let targets =
        select_targets(workspace, school_id, category_id, column_id, EntryStatus::Rejected)?;
    let summary = apply_to_entries(workspace, targets, EntryStatus::Draft, None, dry_run)?;
    finish(workspace, summary, "reopen", dry_run)
}

/// Rebuild index.json from the entries on disk.
pub fn refresh_index(root: &Path) -> Result<Index> {
    let entries = fs::list_all_entries(root)?;
    let index = Index::from_entries(&entries);
    fs::write_index(root, &index)?;
    Ok(index)
}

/// A school-admin only acts on their own school. Other roles pass
/// through here, the transition table decides what they may do.
fn check_school_ownership(workspace: &Workspace, school_id: &str) -> Result<()> {
    let actor = &workspace.config.actor;
    if actor.role == Role::SchoolAdmin {
        let school = workspace.school(school_id)?;
        if !can_act_for_school(actor, school) {
            return Err(InfolineError::PermissionDenied(format!(
                "{} is not the school-admin of {}",
                actor.name, school.id
            )));
        }
    }
    Ok(())
}

/// Pick the entries an action operates on.
///
/// A named column targets exactly that entry, present or not. Without
/// one, every stored entry currently in `from` status is targeted.
fn select_targets(
    workspace: &Workspace,
    school_id: &str,
    category_id: Option<&str>,
    column_id: Option<&str>,
    from: EntryStatus,
) -> Result<Vec<Entry>> {
    match (category_id, column_id) {
        (Some(category), Some(column)) => {
            let key = EntryKey::new(school_id, category, column);
            Ok(vec![fs::read_entry(&workspace.root, &key)?])
        }
        (Some(category), None) => {
            let entries = fs::list_form_entries(&workspace.root, school_id, category)?;
            Ok(entries.into_iter().filter(|e| e.status == from).collect())
        }
        (None, None) => {
            let entries = fs::list_school_entries(&workspace.root, school_id)?;
            Ok(entries.into_iter().filter(|e| e.status == from).collect())
        }
        (None, Some(_)) => Err(InfolineError::ConfigError(
            "a column can only be named together with its category".to_string(),
        )),
    }
}

/// Run one transition over each target, collecting what moved and
/// what was refused. Nothing is written on dry runs.
fn apply_to_entries(
    workspace: &Workspace,
    entries: Vec<Entry>,
    target: EntryStatus,
    rejection_reason: Option<&str>,
    dry_run: bool,
) -> Result<ActionSummary> {
    let actor = &workspace.config.actor;
    let mut summary = ActionSummary::default();

    for entry in entries {
        let ctx = workspace.guard_context(&entry, rejection_reason.map(str::to_string))?;
        match apply_transition(&entry, target, &actor.name, actor.role, &ctx) {
            TransitionOutcome::Applied { next_entry } => {
                let key = next_entry.key();
                if dry_run {
                    info!("[DRY RUN] Would move {} to {}", key, target);
                } else {
                    fs::write_entry(&workspace.root, &next_entry)?;
                    info!("Moved {} to {}", key, target);
                }
                summary.applied.push(key);
            }
            TransitionOutcome::Denied { reason } => {
                debug!("Refused {} -> {}: {}", entry.key(), target, reason);
                summary.denied.push((entry.key(), reason));
            }
        }
    }

    Ok(summary)
}

/// Error out when every targeted entry was refused, refresh the index
/// when something moved.
fn finish(
    workspace: &Workspace,
    summary: ActionSummary,
    action: &str,
    dry_run: bool,
) -> Result<ActionSummary> {
    if summary.applied.is_empty() {
        if let Some((key, reason)) = summary.denied.first() {
            return Err(InfolineError::TransitionDenied(format!("{}: {}", key, reason)));
        }
        info!("No entries to {}", action);
    } else if !dry_run {
        refresh_index(&workspace.root)?;
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::{Actor, CategoryCatalog, Config, Scope, SchoolRoster};
    use tempfile::TempDir;

    fn school_admin() -> Actor {
        Actor::new("aysel", Role::SchoolAdmin).with_scope(Scope::school("school-001"))
    }

    fn sector_admin() -> Actor {
        Actor::new("rashad", Role::SectorAdmin).with_scope(Scope::sector("sector-yasamal"))
    }

    fn setup(actor: Actor) -> (TempDir, Workspace) {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join(".infoline")).unwrap();
        fs::write_roster(temp.path(), &SchoolRoster::sample()).unwrap();
        fs::write_catalog(temp.path(), &CategoryCatalog::sample()).unwrap();

        let workspace = Workspace {
            root: temp.path().to_path_buf(),
            config: Config {
                schema_version: 1,
                actor,
            },
            roster: SchoolRoster::sample(),
            catalog: CategoryCatalog::sample(),
        };
        (temp, workspace)
    }

    /// Same workspace files, different acting user
    fn as_actor(workspace: &Workspace, actor: Actor) -> Workspace {
        let mut other = workspace.clone();
        other.config.actor = actor;
        other
    }

    fn key(column: &str) -> EntryKey {
        EntryKey::new("school-001", "general-info", column)
    }

    fn fill_required_form(workspace: &Workspace) {
        record_value(workspace, &key("student-count"), "420", false).unwrap();
        record_value(workspace, &key("teacher-count"), "35", false).unwrap();
        record_value(workspace, &key("language"), "az", false).unwrap();
    }

    #[test]
    fn test_record_value_creates_draft() {
        let (temp, workspace) = setup(school_admin());

        let entry = record_value(&workspace, &key("student-count"), "420", false).unwrap();
        assert_eq!(entry.status, EntryStatus::Draft);
        assert_eq!(entry.created_by, "aysel");

        let stored = fs::read_entry(temp.path(), &key("student-count")).unwrap();
        assert_eq!(stored.value, "420");
    }

    #[test]
    fn test_record_value_updates_draft() {
        let (temp, workspace) = setup(school_admin());

        record_value(&workspace, &key("student-count"), "420", false).unwrap();
        record_value(&workspace, &key("student-count"), "425", false).unwrap();

        let stored = fs::read_entry(temp.path(), &key("student-count")).unwrap();
        assert_eq!(stored.value, "425");
        assert_eq!(stored.status, EntryStatus::Draft);
    }

    #[test]
    fn test_record_value_rejects_bad_number() {
        let (_temp, workspace) = setup(school_admin());

        let result = record_value(&workspace, &key("student-count"), "many", false);
        assert!(matches!(result.unwrap_err(), InfolineError::ValueInvalid(_)));
    }

    #[test]
    fn test_record_value_rejects_unknown_column() {
        let (_temp, workspace) = setup(school_admin());

        let result = record_value(&workspace, &key("head-count"), "5", false);
        assert!(matches!(result.unwrap_err(), InfolineError::UnknownColumn(_)));
    }

    #[test]
    fn test_reviewers_do_not_enter_data() {
        let (_temp, workspace) = setup(sector_admin());

        let result = record_value(&workspace, &key("student-count"), "420", false);
        assert!(matches!(result.unwrap_err(), InfolineError::PermissionDenied(_)));
    }

    #[test]
    fn test_school_admin_only_edits_own_school() {
        let (_temp, workspace) = setup(school_admin());
        let foreign = EntryKey::new("school-002", "general-info", "student-count");

        let result = record_value(&workspace, &foreign, "99", false);
        assert!(matches!(result.unwrap_err(), InfolineError::PermissionDenied(_)));
    }

    #[test]
    fn test_record_value_dry_run_writes_nothing() {
        let (temp, workspace) = setup(school_admin());

        record_value(&workspace, &key("student-count"), "420", true).unwrap();
        assert!(!fs::entry_exists(temp.path(), &key("student-count")));
    }

    #[test]
    fn test_submit_moves_all_drafts() {
        let (temp, workspace) = setup(school_admin());
        fill_required_form(&workspace);

        let summary =
            submit_entries(&workspace, "school-001", "general-info", None, false).unwrap();
        assert_eq!(summary.applied.len(), 3);
        assert!(summary.denied.is_empty());

        for column in ["student-count", "teacher-count", "language"] {
            let stored = fs::read_entry(temp.path(), &key(column)).unwrap();
            assert_eq!(stored.status, EntryStatus::Pending);
        }
    }

    #[test]
    fn test_submit_blocked_when_form_incomplete() {
        let (temp, workspace) = setup(school_admin());
        record_value(&workspace, &key("student-count"), "420", false).unwrap();

        let result = submit_entries(&workspace, "school-001", "general-info", None, false);
        assert!(matches!(result.unwrap_err(), InfolineError::TransitionDenied(_)));

        // Still a draft on disk
        let stored = fs::read_entry(temp.path(), &key("student-count")).unwrap();
        assert_eq!(stored.status, EntryStatus::Draft);
    }

    #[test]
    fn test_submit_dry_run_writes_nothing() {
        let (temp, workspace) = setup(school_admin());
        fill_required_form(&workspace);

        let summary = submit_entries(&workspace, "school-001", "general-info", None, true).unwrap();
        assert_eq!(summary.applied.len(), 3);

        let stored = fs::read_entry(temp.path(), &key("student-count")).unwrap();
        assert_eq!(stored.status, EntryStatus::Draft);
    }

    #[test]
    fn test_entry_locked_while_pending() {
        let (_temp, workspace) = setup(school_admin());
        fill_required_form(&workspace);
        submit_entries(&workspace, "school-001", "general-info", None, false).unwrap();

        let result = record_value(&workspace, &key("student-count"), "500", false);
        assert!(matches!(result.unwrap_err(), InfolineError::TransitionDenied(_)));
    }

    #[test]
    fn test_reviewer_cannot_submit() {
        let (_temp, workspace) = setup(school_admin());
        fill_required_form(&workspace);

        let reviewer = as_actor(&workspace, sector_admin());
        let result = submit_entries(&reviewer, "school-001", "general-info", None, false);

        let err = result.unwrap_err();
        assert!(matches!(err, InfolineError::TransitionDenied(_)));
        assert!(err.to_string().contains("sector-admin"));
    }

    #[test]
    fn test_approve_flow() {
        let (temp, workspace) = setup(school_admin());
        fill_required_form(&workspace);
        submit_entries(&workspace, "school-001", "general-info", None, false).unwrap();

        let reviewer = as_actor(&workspace, sector_admin());
        let summary =
            approve_entries(&reviewer, "school-001", Some("general-info"), None, false).unwrap();
        assert_eq!(summary.applied.len(), 3);

        let stored = fs::read_entry(temp.path(), &key("student-count")).unwrap();
        assert_eq!(stored.status, EntryStatus::Approved);
        assert_eq!(stored.approved_by.as_deref(), Some("rashad"));
    }

    #[test]
    fn test_approve_out_of_scope() {
        let (_temp, workspace) = setup(school_admin());
        fill_required_form(&workspace);
        submit_entries(&workspace, "school-001", "general-info", None, false).unwrap();

        let outsider = as_actor(
            &workspace,
            Actor::new("kamran", Role::SectorAdmin).with_scope(Scope::sector("sector-kapaz")),
        );
        let result = approve_entries(&outsider, "school-001", Some("general-info"), None, false);

        let err = result.unwrap_err();
        assert!(matches!(err, InfolineError::TransitionDenied(_)));
        assert!(err.to_string().contains("scope"));
    }

    #[test]
    fn test_approve_skips_non_pending() {
        let (_temp, workspace) = setup(school_admin());
        fill_required_form(&workspace);
        submit_entries(&workspace, "school-001", "general-info", Some("student-count"), false)
            .unwrap();

        // Only the submitted entry is pending, the other two stay drafts
        let reviewer = as_actor(&workspace, sector_admin());
        let summary =
            approve_entries(&reviewer, "school-001", Some("general-info"), None, false).unwrap();

        assert_eq!(summary.applied.len(), 1);
        assert!(summary.denied.is_empty());
    }

    #[test]
    fn test_reject_requires_reason() {
        let (_temp, workspace) = setup(school_admin());
        fill_required_form(&workspace);
        submit_entries(&workspace, "school-001", "general-info", None, false).unwrap();

        let reviewer = as_actor(&workspace, sector_admin());
        let result =
            reject_entries(&reviewer, "school-001", "  ", Some("general-info"), None, false);

        let err = result.unwrap_err();
        assert!(matches!(err, InfolineError::TransitionDenied(_)));
        assert!(err.to_string().contains("rejection reason"));
    }

    #[test]
    fn test_reject_then_reopen_then_resubmit() {
        let (temp, workspace) = setup(school_admin());
        fill_required_form(&workspace);
        submit_entries(&workspace, "school-001", "general-info", None, false).unwrap();

        let reviewer = as_actor(&workspace, sector_admin());
        reject_entries(
            &reviewer,
            "school-001",
            "numbers disagree with the roster",
            Some("general-info"),
            None,
            false,
        )
        .unwrap();

        let rejected = fs::read_entry(temp.path(), &key("student-count")).unwrap();
        assert_eq!(rejected.status, EntryStatus::Rejected);
        assert_eq!(rejected.rejected_by.as_deref(), Some("rashad"));

        // Rejected entries are locked until reopened
        let locked = record_value(&workspace, &key("student-count"), "425", false);
        assert!(matches!(locked.unwrap_err(), InfolineError::TransitionDenied(_)));

        reopen_entries(&workspace, "school-001", Some("general-info"), None, false).unwrap();

        let reopened = fs::read_entry(temp.path(), &key("student-count")).unwrap();
        assert_eq!(reopened.status, EntryStatus::Draft);
        // Audit survives the reopen for the school to read
        assert_eq!(
            reopened.rejection_reason.as_deref(),
            Some("numbers disagree with the roster")
        );

        record_value(&workspace, &key("student-count"), "425", false).unwrap();
        submit_entries(&workspace, "school-001", "general-info", None, false).unwrap();

        let resubmitted = fs::read_entry(temp.path(), &key("student-count")).unwrap();
        assert_eq!(resubmitted.status, EntryStatus::Pending);
        assert!(resubmitted.rejection_reason.is_none());
    }

    #[test]
    fn test_reopen_belongs_to_school_admin() {
        let (_temp, workspace) = setup(school_admin());
        fill_required_form(&workspace);
        submit_entries(&workspace, "school-001", "general-info", None, false).unwrap();

        let reviewer = as_actor(&workspace, sector_admin());
        reject_entries(&reviewer, "school-001", "typo", Some("general-info"), None, false)
            .unwrap();

        let result = reopen_entries(&reviewer, "school-001", Some("general-info"), None, false);
        assert!(matches!(result.unwrap_err(), InfolineError::TransitionDenied(_)));
    }

    #[test]
    fn test_approved_entries_stay_put() {
        let (_temp, workspace) = setup(school_admin());
        fill_required_form(&workspace);
        submit_entries(&workspace, "school-001", "general-info", None, false).unwrap();

        let reviewer = as_actor(&workspace, sector_admin());
        approve_entries(&reviewer, "school-001", Some("general-info"), None, false).unwrap();

        // Editing is refused
        let edit = record_value(&workspace, &key("student-count"), "999", false);
        assert!(matches!(edit.unwrap_err(), InfolineError::TransitionDenied(_)));

        // Reopening finds nothing rejected, so nothing happens
        let summary =
            reopen_entries(&workspace, "school-001", Some("general-info"), None, false).unwrap();
        assert!(summary.is_empty());
    }

    #[test]
    fn test_action_on_unknown_school() {
        let (_temp, workspace) = setup(school_admin());

        let result = submit_entries(&workspace, "school-999", "general-info", None, false);
        assert!(matches!(result.unwrap_err(), InfolineError::UnknownSchool(_)));
    }

    #[test]
    fn test_index_refreshed_after_actions() {
        let (temp, workspace) = setup(school_admin());
        fill_required_form(&workspace);

        let index = fs::read_index(temp.path()).unwrap();
        assert_eq!(index.count_in(EntryStatus::Draft), 3);

        submit_entries(&workspace, "school-001", "general-info", None, false).unwrap();

        let index = fs::read_index(temp.path()).unwrap();
        assert_eq!(index.count_in(EntryStatus::Pending), 3);
        assert_eq!(index.count_in(EntryStatus::Draft), 0);
    }

    #[test]
    fn test_column_without_category_is_refused() {
        let (_temp, workspace) = setup(sector_admin());

        let result = approve_entries(&workspace, "school-001", None, Some("student-count"), false);
        assert!(matches!(result.unwrap_err(), InfolineError::ConfigError(_)));
    }
}
