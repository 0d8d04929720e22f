//! Path resolution utilities for infoline
//!
//! Provides functions to locate the workspace root and construct paths
//! to the files kept under .infoline.

use std::path::{Path, PathBuf};

use crate::errors::{InfolineError, Result};
use crate::schemas::EntryKey;

/// Find the workspace root containing a .infoline directory.
///
/// Walks up the directory tree from the starting directory looking for
/// a directory that contains .infoline.
///
/// # Arguments
/// * `start_cwd` - The directory to start searching from
///
/// # Returns
/// The path to the workspace root
///
/// # Errors
/// * `WorkspaceNotFound` - If no ancestor holds a .infoline directory
pub fn find_workspace_root(start_cwd: &Path) -> Result<PathBuf> {
    let mut current = start_cwd
        .canonicalize()
        .map_err(|e| InfolineError::WorkspaceNotFound(format!("Cannot resolve path: {}", e)))?;

    loop {
        if current.join(".infoline").is_dir() {
            return Ok(current);
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => {
                return Err(InfolineError::WorkspaceNotFound(
                    "Could not find a .infoline directory in this or any parent directory"
                        .to_string(),
                ));
            }
        }
    }
}

/// Resolve the current working directory, optionally using an override.
///
/// # Arguments
/// * `cwd_option` - Optional override for the working directory
///
/// # Returns
/// The resolved working directory path
pub fn resolve_cwd(cwd_option: Option<&Path>) -> PathBuf {
    match cwd_option {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Get the path to the .infoline directory.
pub fn get_infoline_dir(root: &Path) -> PathBuf {
    root.join(".infoline")
}

/// Get the path to the config.json file.
pub fn get_config_path(root: &Path) -> PathBuf {
    get_infoline_dir(root).join("config.json")
}

/// Get the path to the schools.json roster file.
pub fn get_schools_path(root: &Path) -> PathBuf {
    get_infoline_dir(root).join("schools.json")
}

/// Get the path to the categories.json catalog file.
pub fn get_catalog_path(root: &Path) -> PathBuf {
    get_infoline_dir(root).join("categories.json")
}

/// Get the path to the index.json file.
pub fn get_index_path(root: &Path) -> PathBuf {
    get_infoline_dir(root).join("index.json")
}

/// Get the path to the entries directory.
pub fn get_entries_dir(root: &Path) -> PathBuf {
    get_infoline_dir(root).join("entries")
}

/// Get the path to one school's entries directory.
pub fn get_school_entries_dir(root: &Path, school_id: &str) -> PathBuf {
    get_entries_dir(root).join(school_id)
}

/// Get the path to one (school, category) form directory.
pub fn get_form_dir(root: &Path, school_id: &str, category_id: &str) -> PathBuf {
    get_school_entries_dir(root, school_id).join(category_id)
}

/// Get the path to a single entry's JSON file.
pub fn get_entry_path(root: &Path, key: &EntryKey) -> PathBuf {
    get_form_dir(root, &key.school_id, &key.category_id).join(format!("{}.json", key.column_id))
}
