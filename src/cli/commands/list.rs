//! List command - List entries with optional filtering

use crate::domain::{can_view_school, status_index, ENTRY_STATUSES};
use crate::errors::{InfolineError, Result};
use crate::fs;
use crate::schemas::{Entry, EntryStatus, Role};
use crate::workflow;
use std::path::Path;
use std::str::FromStr;

/// List stored entries, scoped to what the acting user may see
pub fn run(
    cwd: Option<&Path>,
    json: bool,
    school: Option<&str>,
    category: Option<&str>,
    status: Option<&str>,
) -> Result<()> {
    let workspace = workflow::load_workspace(cwd)?;

    let status_filter = match status {
        Some(raw) => Some(EntryStatus::from_str(raw).map_err(InfolineError::ConfigError)?),
        None => None,
    };
    if let Some(school_id) = school {
        workspace.school(school_id)?;
    }
    if let Some(category_id) = category {
        workspace.category(category_id)?;
    }

    let actor = &workspace.config.actor;
    let mut entries = fs::list_all_entries(&workspace.root)?;
    entries.retain(|entry| visible(&workspace, entry));
    if let Some(school_id) = school {
        entries.retain(|e| e.school_id == school_id);
    }
    if let Some(category_id) = category {
        entries.retain(|e| e.category_id == category_id);
    }
    if let Some(wanted) = status_filter {
        entries.retain(|e| e.status == wanted);
    }
    // Group by lifecycle stage, then by key
    entries.sort_by_key(|e| (status_index(e.status), e.key().to_string()));

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&entries)
                .map_err(|e| InfolineError::InvalidJson(e.to_string()))?
        );
        return Ok(());
    }

    if entries.is_empty() {
        println!("No entries found");
        return Ok(());
    }
    for entry in &entries {
        let key = entry.key().to_string();
        let status = entry.status.to_string();
        println!("{:<48} {:>8}  {}", key, status, entry.value);
    }

    let mut tally = String::new();
    for &status in ENTRY_STATUSES {
        let n = entries.iter().filter(|e| e.status == status).count();
        if n > 0 {
            tally.push_str(&format!(" {}:{}", status, n));
        }
    }
    println!("{} entries (acting as {} {}){}", entries.len(), actor.role, actor.name, tally);
    Ok(())
}

/// Entries of schools outside the actor's scope stay hidden. Orphaned
/// entries whose school left the roster only surface for super-admins.
fn visible(workspace: &workflow::Workspace, entry: &Entry) -> bool {
    let actor = &workspace.config.actor;
    match workspace.roster.find(&entry.school_id) {
        Some(school) => can_view_school(actor, school),
        None => actor.role == Role::SuperAdmin,
    }
}
