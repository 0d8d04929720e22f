//! Workspace loading and guard context assembly
//!
//! A Workspace bundles everything commands read from .infoline: the
//! config with the acting user, the school roster and the category
//! catalog. Entries are read on demand, not cached here.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::load_config;
use crate::domain::{can_approve_school, GuardContext};
use crate::errors::{InfolineError, Result};
use crate::fs;
use crate::schemas::{Category, CategoryCatalog, Column, Config, Entry, School, SchoolRoster};

/// Everything a command needs loaded from the workspace
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Workspace root (the directory holding .infoline)
    pub root: PathBuf,

    /// Workspace configuration with the acting user
    pub config: Config,

    /// Registered schools
    pub roster: SchoolRoster,

    /// Category definitions
    pub catalog: CategoryCatalog,
}

impl Workspace {
    /// Look up a school in the roster
    pub fn school(&self, school_id: &str) -> Result<&School> {
        self.roster
            .find(school_id)
            .ok_or_else(|| InfolineError::UnknownSchool(school_id.to_string()))
    }

    /// Resolve which school a command targets.
    ///
    /// An explicit id wins; otherwise a school-admin falls back to the
    /// school in their scope.
    pub fn resolve_school(&self, explicit: Option<&str>) -> Result<String> {
        if let Some(school_id) = explicit {
            return Ok(self.school(school_id)?.id.clone());
        }
        match self.config.actor.scope.school_id.as_deref() {
            Some(school_id) => Ok(self.school(school_id)?.id.clone()),
            None => Err(InfolineError::ConfigError(
                "no school given and the configured actor has no school scope".to_string(),
            )),
        }
    }

    /// Look up a category in the catalog
    pub fn category(&self, category_id: &str) -> Result<&Category> {
        self.catalog
            .find(category_id)
            .ok_or_else(|| InfolineError::UnknownCategory(category_id.to_string()))
    }

    /// Look up a column within a category
    pub fn column(&self, category_id: &str, column_id: &str) -> Result<&Column> {
        self.category(category_id)?
            .find_column(column_id)
            .ok_or_else(|| InfolineError::UnknownColumn(format!("{}/{}", category_id, column_id)))
    }

    /// Non-blank values of one (school, category) form, keyed by column id
    pub fn form_values(
        &self,
        school_id: &str,
        category_id: &str,
    ) -> Result<HashMap<String, String>> {
        let entries = fs::list_form_entries(&self.root, school_id, category_id)?;
        Ok(entries
            .into_iter()
            .filter(Entry::is_filled)
            .map(|e| (e.column_id, e.value))
            .collect())
    }

    /// Build the guard context for moving one entry.
    ///
    /// Surveys the entry's form for completion and resolves whether
    /// the acting user's scope covers the entry's school. Which of
    /// these the transition actually consults is up to its table row.
    pub fn guard_context(
        &self,
        entry: &Entry,
        rejection_reason: Option<String>,
    ) -> Result<GuardContext> {
        let school = self.school(&entry.school_id)?;
        let category = self.category(&entry.category_id)?;
        let values = self.form_values(&entry.school_id, &entry.category_id)?;

        Ok(GuardContext {
            completion: Some(category.completion(&values)),
            can_approve: can_approve_school(&self.config.actor, school),
            rejection_reason,
        })
    }
}

/// Load the workspace the given directory belongs to.
///
/// # Arguments
/// * `cwd` - Optional starting directory, defaults to the process cwd
pub fn load_workspace(cwd: Option<&Path>) -> Result<Workspace> {
    let start = fs::resolve_cwd(cwd);
    let root = fs::find_workspace_root(&start)?;
    let config = load_config(&root)?;
    let roster = fs::read_roster(&root)?;
    let catalog = fs::read_catalog(&root)?;

    Ok(Workspace {
        root,
        config,
        roster,
        catalog,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::{Actor, EntryKey, Role, Scope};
    use tempfile::TempDir;

    fn setup_workspace() -> (TempDir, Workspace) {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join(".infoline")).unwrap();

        fs::write_roster(temp.path(), &SchoolRoster::sample()).unwrap();
        fs::write_catalog(temp.path(), &CategoryCatalog::sample()).unwrap();

        let config = Config {
            schema_version: 1,
            actor: Actor::new("rashad", Role::SectorAdmin).with_scope(Scope::sector("sector-yasamal")),
        };
        fs::write_config(temp.path(), &config).unwrap();

        let workspace = load_workspace(Some(temp.path())).unwrap();
        (temp, workspace)
    }

    #[test]
    fn test_load_workspace() {
        let (_temp, workspace) = setup_workspace();

        assert_eq!(workspace.config.actor.name, "rashad");
        assert_eq!(workspace.roster.schools.len(), 3);
        assert!(workspace.catalog.find("general-info").is_some());
    }

    #[test]
    fn test_load_workspace_not_initialized() {
        let temp = TempDir::new().unwrap();
        let result = load_workspace(Some(temp.path()));
        assert!(result.is_err());
    }

    #[test]
    fn test_lookups() {
        let (_temp, workspace) = setup_workspace();

        assert!(workspace.school("school-001").is_ok());
        assert!(matches!(
            workspace.school("school-999").unwrap_err(),
            InfolineError::UnknownSchool(_)
        ));

        assert!(workspace.category("general-info").is_ok());
        assert!(matches!(
            workspace.category("nope").unwrap_err(),
            InfolineError::UnknownCategory(_)
        ));

        assert!(workspace.column("general-info", "student-count").is_ok());
        assert!(matches!(
            workspace.column("general-info", "nope").unwrap_err(),
            InfolineError::UnknownColumn(_)
        ));
    }

    #[test]
    fn test_resolve_school() {
        let (_temp, mut workspace) = setup_workspace();

        // Explicit id wins regardless of scope
        assert_eq!(workspace.resolve_school(Some("school-002")).unwrap(), "school-002");
        assert!(matches!(
            workspace.resolve_school(Some("school-999")).unwrap_err(),
            InfolineError::UnknownSchool(_)
        ));

        // A sector-admin has no school to fall back on
        assert!(matches!(
            workspace.resolve_school(None).unwrap_err(),
            InfolineError::ConfigError(_)
        ));

        workspace.config.actor =
            Actor::new("aysel", Role::SchoolAdmin).with_scope(Scope::school("school-001"));
        assert_eq!(workspace.resolve_school(None).unwrap(), "school-001");
    }

    #[test]
    fn test_form_values() {
        let (temp, workspace) = setup_workspace();

        let entry = Entry::new(
            EntryKey::new("school-001", "general-info", "student-count"),
            "420".to_string(),
            "aysel".to_string(),
        );
        fs::write_entry(temp.path(), &entry).unwrap();

        // A hand-edited file can hold a blank value; the survey skips it
        let blank = Entry::new(
            EntryKey::new("school-001", "general-info", "founded"),
            "  ".to_string(),
            "aysel".to_string(),
        );
        fs::write_entry(temp.path(), &blank).unwrap();

        let values = workspace.form_values("school-001", "general-info").unwrap();
        assert_eq!(values.get("student-count").map(String::as_str), Some("420"));
        assert!(values.get("teacher-count").is_none());
        assert!(values.get("founded").is_none());
    }

    #[test]
    fn test_guard_context_surveys_form() {
        let (temp, workspace) = setup_workspace();

        let entry = Entry::new(
            EntryKey::new("school-001", "general-info", "student-count"),
            "420".to_string(),
            "aysel".to_string(),
        );
        fs::write_entry(temp.path(), &entry).unwrap();

        let ctx = workspace.guard_context(&entry, None).unwrap();
        let completion = ctx.completion.unwrap();

        // Sample catalog requires student-count, teacher-count and language
        assert_eq!(completion.required_total, 3);
        assert_eq!(completion.filled, 1);
        assert!(!completion.is_complete());

        // Sector admin for sector-yasamal covers school-001
        assert!(ctx.can_approve);
    }

    #[test]
    fn test_guard_context_scope_miss() {
        let (temp, workspace) = setup_workspace();

        // school-101 is in sector-kapaz, outside rashad's scope
        let entry = Entry::new(
            EntryKey::new("school-101", "general-info", "student-count"),
            "180".to_string(),
            "kamran".to_string(),
        );
        fs::write_entry(temp.path(), &entry).unwrap();

        let ctx = workspace.guard_context(&entry, None).unwrap();
        assert!(!ctx.can_approve);
    }
}
