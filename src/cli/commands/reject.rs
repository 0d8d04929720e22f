//! Reject command - Reject pending entries with a reason

use crate::errors::Result;
use crate::workflow;
use std::path::Path;

/// Reject pending entries, optionally narrowed to a category or column
pub fn run(
    cwd: Option<&Path>,
    school: &str,
    reason: &str,
    category: Option<&str>,
    column: Option<&str>,
    dry_run: bool,
) -> Result<()> {
    let workspace = workflow::load_workspace(cwd)?;

    let summary = workflow::reject_entries(&workspace, school, reason, category, column, dry_run)?;
    let verb = if dry_run { "Would reject" } else { "Rejected" };
    super::print_summary(&summary, verb);
    Ok(())
}
