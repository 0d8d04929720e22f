//! Submit command - Submit a form's draft entries for review

use crate::errors::Result;
use crate::workflow;
use std::path::Path;

/// Submit draft entries of a (school, category) form
pub fn run(
    cwd: Option<&Path>,
    category: &str,
    column: Option<&str>,
    school: Option<&str>,
    dry_run: bool,
) -> Result<()> {
    let workspace = workflow::load_workspace(cwd)?;
    let school_id = workspace.resolve_school(school)?;

    let summary = workflow::submit_entries(&workspace, &school_id, category, column, dry_run)?;
    let verb = if dry_run { "Would submit" } else { "Submitted" };
    super::print_summary(&summary, verb);
    Ok(())
}
