//! Status command - Form completion and review progress per school

use crate::domain::can_view_school;
use crate::errors::{InfolineError, Result};
use crate::fs;
use crate::schemas::{EntryStatus, School};
use crate::workflow;
use serde::Serialize;
use std::path::Path;

/// Progress of one (school, category) form
#[derive(Debug, Serialize)]
struct FormReport {
    school_id: String,
    category_id: String,
    required_total: usize,
    filled: usize,
    missing: Vec<String>,
    draft: usize,
    pending: usize,
    approved: usize,
    rejected: usize,
}

/// Show how far each visible school's forms have progressed
pub fn run(cwd: Option<&Path>, school: Option<&str>, json: bool) -> Result<()> {
    let workspace = workflow::load_workspace(cwd)?;
    if let Some(school_id) = school {
        workspace.school(school_id)?;
    }

    let actor = &workspace.config.actor;
    let schools: Vec<&School> = workspace
        .roster
        .schools
        .iter()
        .filter(|s| school.map_or(true, |wanted| s.id == wanted))
        .filter(|s| can_view_school(actor, s))
        .collect();

    let mut reports = Vec::new();
    for school in &schools {
        for category in &workspace.catalog.categories {
            let values = workspace.form_values(&school.id, &category.id)?;
            let completion = category.completion(&values);
            let entries = fs::list_form_entries(&workspace.root, &school.id, &category.id)?;
            let count =
                |status: EntryStatus| entries.iter().filter(|e| e.status == status).count();

            reports.push(FormReport {
                school_id: school.id.clone(),
                category_id: category.id.clone(),
                required_total: completion.required_total,
                filled: completion.filled,
                missing: completion.missing,
                draft: count(EntryStatus::Draft),
                pending: count(EntryStatus::Pending),
                approved: count(EntryStatus::Approved),
                rejected: count(EntryStatus::Rejected),
            });
        }
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&reports)
                .map_err(|e| InfolineError::InvalidJson(e.to_string()))?
        );
        return Ok(());
    }

    if reports.is_empty() {
        println!("Nothing to report (no visible schools or no categories)");
        return Ok(());
    }
    for report in &reports {
        let form = format!("{}/{}", report.school_id, report.category_id);
        let mut line = format!(
            "{:<36} {}/{} required filled",
            form, report.filled, report.required_total
        );
        if !report.missing.is_empty() {
            line.push_str(&format!(" (missing: {})", report.missing.join(", ")));
        }
        line.push_str(&format!(
            "  draft:{} pending:{} approved:{} rejected:{}",
            report.draft, report.pending, report.approved, report.rejected
        ));
        println!("{}", line);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::{
        Actor, CategoryCatalog, Config, Entry, EntryKey, Role, Scope, SchoolRoster,
    };
    use tempfile::TempDir;

    fn setup(actor: Actor) -> TempDir {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join(".infoline")).unwrap();
        fs::write_roster(temp.path(), &SchoolRoster::sample()).unwrap();
        fs::write_catalog(temp.path(), &CategoryCatalog::sample()).unwrap();
        fs::write_config(
            temp.path(),
            &Config {
                schema_version: 1,
                actor,
            },
        )
        .unwrap();

        let entry = Entry::new(
            EntryKey::new("school-001", "general-info", "student-count"),
            "420".to_string(),
            "aysel".to_string(),
        );
        fs::write_entry(temp.path(), &entry).unwrap();
        temp
    }

    #[test]
    fn test_status_runs() {
        let temp = setup(Actor::new("root", Role::SuperAdmin));

        run(Some(temp.path()), None, false).unwrap();
        run(Some(temp.path()), Some("school-001"), true).unwrap();
    }

    #[test]
    fn test_status_rejects_unknown_school() {
        let temp = setup(Actor::new("root", Role::SuperAdmin));

        let result = run(Some(temp.path()), Some("school-999"), false);
        assert!(matches!(result.unwrap_err(), InfolineError::UnknownSchool(_)));
    }

    #[test]
    fn test_status_scopes_to_visible_schools() {
        // A school-admin asking about a foreign school sees nothing,
        // but the command itself succeeds.
        let temp = setup(
            Actor::new("aysel", Role::SchoolAdmin).with_scope(Scope::school("school-001")),
        );
        run(Some(temp.path()), Some("school-101"), false).unwrap();
    }
}
