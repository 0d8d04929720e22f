//! Show command - Show details of a single entry

use crate::domain::{allowed_targets, can_view_school, is_terminal_status};
use crate::errors::{InfolineError, Result};
use crate::fs;
use crate::schemas::EntryKey;
use crate::workflow;
use std::path::Path;

/// Show one entry with its full audit trail
pub fn run(
    cwd: Option<&Path>,
    category: &str,
    column: &str,
    school: Option<&str>,
    json: bool,
) -> Result<()> {
    let workspace = workflow::load_workspace(cwd)?;
    let school_id = workspace.resolve_school(school)?;
    workspace.column(category, column)?;

    let actor = &workspace.config.actor;
    let target = workspace.school(&school_id)?;
    if !can_view_school(actor, target) {
        return Err(InfolineError::PermissionDenied(format!(
            "{} may not view entries of {}",
            actor.name, school_id
        )));
    }

    let key = EntryKey::new(school_id, category, column);
    let entry = fs::read_entry(&workspace.root, &key)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&entry)
                .map_err(|e| InfolineError::InvalidJson(e.to_string()))?
        );
        return Ok(());
    }

    println!("School:    {}", entry.school_id);
    println!("Category:  {}", entry.category_id);
    println!("Column:    {}", entry.column_id);
    println!("Status:    {}", entry.status);
    println!("Value:     {}", entry.value);
    println!("Created:   {} by {}", entry.created_at, entry.created_by);
    println!("Updated:   {}", entry.updated_at);
    if let (Some(by), Some(at)) = (&entry.approved_by, &entry.approved_at) {
        println!("Approved:  {} by {}", at, by);
    }
    if let (Some(by), Some(at)) = (&entry.rejected_by, &entry.rejected_at) {
        println!("Rejected:  {} by {}", at, by);
    }
    if let Some(reason) = &entry.rejection_reason {
        println!("Reason:    {}", reason);
    }
    if is_terminal_status(entry.status) {
        println!("Next:      none (final)");
    } else {
        let targets: Vec<String> =
            allowed_targets(entry.status).iter().map(|s| s.to_string()).collect();
        println!("Next:      {}", targets.join(", "));
    }
    Ok(())
}
