//! Reopen command - Return rejected entries to draft

use crate::errors::Result;
use crate::workflow;
use std::path::Path;

/// Reopen rejected entries so the school can correct them
pub fn run(
    cwd: Option<&Path>,
    school: Option<&str>,
    category: Option<&str>,
    column: Option<&str>,
    dry_run: bool,
) -> Result<()> {
    let workspace = workflow::load_workspace(cwd)?;
    let school_id = workspace.resolve_school(school)?;

    let summary = workflow::reopen_entries(&workspace, &school_id, category, column, dry_run)?;
    let verb = if dry_run { "Would reopen" } else { "Reopened" };
    super::print_summary(&summary, verb);
    Ok(())
}
