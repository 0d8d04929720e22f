//! JSON file operations with schema validation
//!
//! Provides functions to read and write JSON files with serde validation.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{InfolineError, Result};
use crate::schemas::{CategoryCatalog, Config, Entry, EntryKey, Index, SchoolRoster};

use super::paths::{
    get_catalog_path, get_config_path, get_entries_dir, get_entry_path, get_form_dir,
    get_index_path, get_school_entries_dir, get_schools_path,
};

/// Read and deserialize a JSON file.
///
/// # Arguments
/// * `path` - Path to the JSON file
///
/// # Returns
/// The deserialized value
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `InvalidJson` - If the file contains invalid JSON or does not
///   match the expected schema
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            InfolineError::FileNotFound(format!("File not found: {}", path.display()))
        } else {
            InfolineError::Io(e)
        }
    })?;

    serde_json::from_str(&content).map_err(|e| {
        InfolineError::InvalidJson(format!("Invalid JSON in file {}: {}", path.display(), e))
    })
}

/// Write a value to a JSON file with pretty formatting.
///
/// Uses atomic write (write to temp file, then rename) to avoid partial writes.
///
/// # Arguments
/// * `path` - Path to the JSON file
/// * `data` - The value to serialize and write
///
/// # Errors
/// * `Io` - If there's an error writing the file
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let content =
        serde_json::to_string_pretty(data).map_err(|e| InfolineError::InvalidJson(e.to_string()))?;

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Write atomically: write to temp file, then rename
    let temp_path = path.with_extension("json.tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(content.as_bytes())?;
    file.write_all(b"\n")?;
    file.sync_all()?;
    drop(file);

    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Read the config.json file for a workspace.
///
/// # Arguments
/// * `root` - Path to the workspace root
///
/// # Returns
/// The parsed Config, or default if file doesn't exist
pub fn read_config(root: &Path) -> Result<Config> {
    let path = get_config_path(root);
    if !path.exists() {
        return Ok(Config::default());
    }
    read_json(&path)
}

/// Write the config.json file for a workspace.
pub fn write_config(root: &Path, config: &Config) -> Result<()> {
    write_json(&get_config_path(root), config)
}

/// Read the schools.json roster for a workspace.
///
/// # Returns
/// The parsed roster, or an empty roster if the file doesn't exist
pub fn read_roster(root: &Path) -> Result<SchoolRoster> {
    let path = get_schools_path(root);
    if !path.exists() {
        return Ok(SchoolRoster::default());
    }
    read_json(&path)
}

/// Write the schools.json roster for a workspace.
pub fn write_roster(root: &Path, roster: &SchoolRoster) -> Result<()> {
    write_json(&get_schools_path(root), roster)
}

/// Read the categories.json catalog for a workspace.
///
/// # Returns
/// The parsed catalog, or an empty catalog if the file doesn't exist
pub fn read_catalog(root: &Path) -> Result<CategoryCatalog> {
    let path = get_catalog_path(root);
    if !path.exists() {
        return Ok(CategoryCatalog::default());
    }
    read_json(&path)
}

/// Write the categories.json catalog for a workspace.
pub fn write_catalog(root: &Path, catalog: &CategoryCatalog) -> Result<()> {
    write_json(&get_catalog_path(root), catalog)
}

/// Read the index.json cache for a workspace.
///
/// # Returns
/// The parsed index, or an empty index if the file doesn't exist
pub fn read_index(root: &Path) -> Result<Index> {
    let path = get_index_path(root);
    if !path.exists() {
        return Ok(Index::default());
    }
    read_json(&path)
}

/// Write the index.json cache for a workspace.
pub fn write_index(root: &Path, index: &Index) -> Result<()> {
    write_json(&get_index_path(root), index)
}

/// Check whether an entry file exists for the given coordinates.
pub fn entry_exists(root: &Path, key: &EntryKey) -> bool {
    get_entry_path(root, key).exists()
}

/// Read a single entry by its coordinates.
///
/// # Errors
/// * `EntryNotFound` - If no file exists for the coordinates
pub fn read_entry(root: &Path, key: &EntryKey) -> Result<Entry> {
    let path = get_entry_path(root, key);
    if !path.exists() {
        return Err(InfolineError::EntryNotFound(key.to_string()));
    }
    read_json(&path)
}

/// Write a single entry under its coordinates.
pub fn write_entry(root: &Path, entry: &Entry) -> Result<()> {
    let path = get_entry_path(root, &entry.key());
    write_json(&path, entry)
}

/// Read every entry of one (school, category) form, sorted by column id.
///
/// A form directory that doesn't exist yet reads as empty.
pub fn list_form_entries(root: &Path, school_id: &str, category_id: &str) -> Result<Vec<Entry>> {
    read_entry_dir(&get_form_dir(root, school_id, category_id))
}

/// Read every entry of one school across categories, sorted by category
/// then column.
pub fn list_school_entries(root: &Path, school_id: &str) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for form_dir in sorted_subdirs(&get_school_entries_dir(root, school_id))? {
        entries.extend(read_entry_dir(&form_dir)?);
    }
    Ok(entries)
}

/// Read every stored entry, sorted by school, category, column.
pub fn list_all_entries(root: &Path) -> Result<Vec<Entry>> {
    let entries_dir = get_entries_dir(root);
    let mut entries = Vec::new();

    for school_dir in sorted_subdirs(&entries_dir)? {
        for form_dir in sorted_subdirs(&school_dir)? {
            entries.extend(read_entry_dir(&form_dir)?);
        }
    }

    Ok(entries)
}

/// Subdirectories of a directory, sorted by name. Missing dir reads as empty.
fn sorted_subdirs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut dirs: Vec<_> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();
    Ok(dirs)
}

/// Entries in one form directory, sorted by file name. Skips non-JSON
/// files, which also skips leftover .json.tmp files.
fn read_entry_dir(dir: &Path) -> Result<Vec<Entry>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut paths: Vec<_> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().map(|ext| ext == "json").unwrap_or(false))
        .collect();
    paths.sort();

    let mut entries = Vec::with_capacity(paths.len());
    for path in paths {
        entries.push(read_json(&path)?);
    }
    Ok(entries)
}
