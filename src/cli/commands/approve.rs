//! Approve command - Approve pending entries of a school

use crate::errors::Result;
use crate::workflow;
use std::path::Path;

/// Approve pending entries, optionally narrowed to a category or column
pub fn run(
    cwd: Option<&Path>,
    school: &str,
    category: Option<&str>,
    column: Option<&str>,
    dry_run: bool,
) -> Result<()> {
    let workspace = workflow::load_workspace(cwd)?;

    let summary = workflow::approve_entries(&workspace, school, category, column, dry_run)?;
    let verb = if dry_run { "Would approve" } else { "Approved" };
    super::print_summary(&summary, verb);
    Ok(())
}
