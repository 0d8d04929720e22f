//! Enter command - Record a value for one column of a form

use crate::errors::Result;
use crate::schemas::EntryKey;
use crate::workflow;
use std::path::Path;

/// Record a value for one column of a school's form
pub fn run(
    cwd: Option<&Path>,
    category: &str,
    column: &str,
    value: &str,
    school: Option<&str>,
    dry_run: bool,
) -> Result<()> {
    let workspace = workflow::load_workspace(cwd)?;
    let school_id = workspace.resolve_school(school)?;
    let key = EntryKey::new(school_id, category, column);

    let entry = workflow::record_value(&workspace, &key, value, dry_run)?;
    if dry_run {
        println!("Would record {} = {}", key, entry.value);
    } else {
        println!("Recorded {} = {} ({})", key, entry.value, entry.status);
    }
    Ok(())
}
