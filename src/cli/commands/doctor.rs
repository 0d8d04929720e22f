//! Doctor command - Validate the workspace and optionally fix issues

use crate::config::validate_actor_scope;
use crate::domain::{is_valid_slug, validate_value};
use crate::errors::{InfolineError, Result};
use crate::fs;
use crate::schemas::{CategoryCatalog, Entry, EntryStatus, Index, IndexEntry, SchoolRoster};
use crate::workflow;
use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Validate the workspace files and report (or fix) what is wrong.
///
/// Fixable issues are a stale index and leftover temp files from
/// interrupted writes. Everything else needs a human.
pub fn run(cwd: Option<&Path>, fix: bool) -> Result<()> {
    let start = fs::resolve_cwd(cwd);
    let root = fs::find_workspace_root(&start)?;

    let mut issues: Vec<String> = Vec::new();
    let mut tmp_files: Vec<PathBuf> = Vec::new();

    match fs::read_config(&root) {
        Ok(config) => {
            if let Err(e) = validate_actor_scope(&config) {
                issues.push(e.to_string());
            }
        }
        Err(e) => issues.push(e.to_string()),
    }

    let roster = match fs::read_roster(&root) {
        Ok(roster) => {
            check_roster(&roster, &mut issues);
            Some(roster)
        }
        Err(e) => {
            issues.push(e.to_string());
            None
        }
    };
    let catalog = match fs::read_catalog(&root) {
        Ok(catalog) => {
            check_catalog(&catalog, &mut issues);
            Some(catalog)
        }
        Err(e) => {
            issues.push(e.to_string());
            None
        }
    };

    let entries = walk_entries(&root, &mut issues, &mut tmp_files)?;
    for entry in &entries {
        check_entry(entry, roster.as_ref(), catalog.as_ref(), &mut issues);
    }
    collect_tmp_files(&fs::get_infoline_dir(&root), &mut tmp_files)?;

    let index_stale = index_is_stale(&root, &entries, &mut issues);

    if fix {
        for tmp in &tmp_files {
            std::fs::remove_file(tmp)?;
            println!("Removed {}", tmp.display());
        }
        if index_stale {
            match workflow::refresh_index(&root) {
                Ok(_) => println!("Rebuilt index.json"),
                Err(e) => issues.push(format!("index.json could not be rebuilt: {}", e)),
            }
        }
    } else {
        for tmp in &tmp_files {
            issues.push(format!("stale temp file {} (--fix removes it)", tmp.display()));
        }
        if index_stale {
            issues.push("index.json is stale (--fix rebuilds it)".to_string());
        }
    }

    println!("Checked {} entry files", entries.len());
    if issues.is_empty() {
        println!("No issues found");
        return Ok(());
    }
    for issue in &issues {
        println!("  {}", issue);
    }
    Err(InfolineError::SchemaValidation(format!(
        "{} issue(s) found",
        issues.len()
    )))
}

fn check_roster(roster: &SchoolRoster, issues: &mut Vec<String>) {
    let mut seen = HashSet::new();
    for school in &roster.schools {
        if !seen.insert(school.id.as_str()) {
            issues.push(format!("schools.json: duplicate school id {}", school.id));
        }
        for (label, id) in [
            ("school id", &school.id),
            ("sector id", &school.sector_id),
            ("region id", &school.region_id),
        ] {
            if !is_valid_slug(id) {
                issues.push(format!("schools.json: {} {:?} is not a valid slug", label, id));
            }
        }
    }

    // A sector belongs to exactly one region
    let sectors: HashSet<&str> = roster.schools.iter().map(|s| s.sector_id.as_str()).collect();
    for sector_id in sectors {
        let schools = roster.in_sector(sector_id);
        if schools.iter().any(|s| s.region_id != schools[0].region_id) {
            issues.push(format!("schools.json: sector {} spans multiple regions", sector_id));
        }
    }
}

fn check_catalog(catalog: &CategoryCatalog, issues: &mut Vec<String>) {
    let mut seen = HashSet::new();
    for category in &catalog.categories {
        if !seen.insert(category.id.as_str()) {
            issues.push(format!("categories.json: duplicate category id {}", category.id));
        }
        if !is_valid_slug(&category.id) {
            issues.push(format!("categories.json: category id {:?} is not a valid slug", category.id));
        }

        let mut columns = HashSet::new();
        for column in &category.columns {
            let label = format!("{}/{}", category.id, column.id);
            if !columns.insert(column.id.as_str()) {
                issues.push(format!("categories.json: duplicate column {}", label));
            }
            if !is_valid_slug(&column.id) {
                issues.push(format!("categories.json: column id {:?} is not a valid slug", column.id));
            }
            if column.column_type == crate::schemas::ColumnType::Select && column.options.is_empty()
            {
                issues.push(format!("categories.json: select column {} has no options", label));
            }
            if let Some(pattern) = &column.pattern {
                if let Err(e) = Regex::new(pattern) {
                    issues.push(format!(
                        "categories.json: column {} pattern does not compile: {}",
                        label, e
                    ));
                }
            }
        }
    }
}

/// Read every entry file, reporting parse failures and files whose
/// path disagrees with the ids stored inside them.
fn walk_entries(
    root: &Path,
    issues: &mut Vec<String>,
    tmp_files: &mut Vec<PathBuf>,
) -> Result<Vec<Entry>> {
    let entries_dir = fs::get_entries_dir(root);
    let mut entries = Vec::new();
    if !entries_dir.is_dir() {
        return Ok(entries);
    }

    for school_dir in dirs_in(&entries_dir)? {
        let school_name = file_name_of(&school_dir);
        for category_dir in dirs_in(&school_dir)? {
            let category_name = file_name_of(&category_dir);
            for file in files_in(&category_dir)? {
                if file.to_string_lossy().ends_with(".json.tmp") {
                    tmp_files.push(file);
                    continue;
                }
                if file.extension().map_or(true, |ext| ext != "json") {
                    continue;
                }
                let entry: Entry = match fs::read_json(&file) {
                    Ok(entry) => entry,
                    Err(e) => {
                        issues.push(e.to_string());
                        continue;
                    }
                };

                let stem = file.file_stem().map(|s| s.to_string_lossy().to_string());
                if entry.school_id != school_name
                    || entry.category_id != category_name
                    || stem.as_deref() != Some(entry.column_id.as_str())
                {
                    issues.push(format!(
                        "entry file {} does not match the ids stored in it ({})",
                        file.display(),
                        entry.key()
                    ));
                }
                entries.push(entry);
            }
        }
    }
    Ok(entries)
}

fn check_entry(
    entry: &Entry,
    roster: Option<&SchoolRoster>,
    catalog: Option<&CategoryCatalog>,
    issues: &mut Vec<String>,
) {
    let key = entry.key();

    if let Some(roster) = roster {
        if roster.find(&entry.school_id).is_none() {
            issues.push(format!("entry {}: unknown school {}", key, entry.school_id));
        }
    }
    if let Some(catalog) = catalog {
        match catalog.find(&entry.category_id) {
            None => issues.push(format!("entry {}: unknown category {}", key, entry.category_id)),
            Some(category) => match category.find_column(&entry.column_id) {
                None => issues.push(format!("entry {}: unknown column {}", key, entry.column_id)),
                Some(column) => {
                    let check = validate_value(column, &entry.value);
                    if !check.valid {
                        issues.push(format!(
                            "entry {}: {}",
                            key,
                            check.reason.unwrap_or_else(|| "invalid value".to_string())
                        ));
                    }
                }
            },
        }
    }

    match entry.status {
        EntryStatus::Approved => {
            if entry.approved_by.is_none() || entry.approved_at.is_none() {
                issues.push(format!("entry {}: approved without reviewer audit", key));
            }
        }
        EntryStatus::Rejected => {
            if entry.rejected_by.is_none() || entry.rejected_at.is_none() {
                issues.push(format!("entry {}: rejected without reviewer audit", key));
            }
            if entry.rejection_reason.as_deref().map_or(true, |r| r.trim().is_empty()) {
                issues.push(format!("entry {}: rejected without a reason", key));
            }
        }
        EntryStatus::Draft | EntryStatus::Pending => {}
    }
}

/// Compare the stored index against one recomputed from disk
fn index_is_stale(root: &Path, entries: &[Entry], issues: &mut Vec<String>) -> bool {
    let stored = match fs::read_index(root) {
        Ok(index) => index,
        Err(e) => {
            issues.push(e.to_string());
            return true;
        }
    };

    let sort_key =
        |e: &IndexEntry| (e.school_id.clone(), e.category_id.clone(), e.column_id.clone());
    let mut want = Index::from_entries(entries).entries;
    want.sort_by_key(sort_key);
    let mut have = stored.entries;
    have.sort_by_key(sort_key);
    want != have
}

fn collect_tmp_files(dir: &Path, tmp_files: &mut Vec<PathBuf>) -> Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }
    for file in files_in(dir)? {
        if file.to_string_lossy().ends_with(".tmp") {
            tmp_files.push(file);
        }
    }
    Ok(())
}

fn dirs_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn file_name_of(path: &Path) -> String {
    path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default()
}
