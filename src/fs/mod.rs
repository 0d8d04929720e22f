//! File system utilities for infoline
//!
//! Provides path resolution and JSON file operations.

mod json;
mod paths;

pub use json::{
    entry_exists, list_all_entries, list_form_entries, list_school_entries, read_catalog,
    read_config, read_entry, read_index, read_json, read_roster, write_catalog, write_config,
    write_entry, write_index, write_json, write_roster,
};
pub use paths::{
    find_workspace_root, get_catalog_path, get_config_path, get_entries_dir, get_entry_path,
    get_form_dir, get_index_path, get_infoline_dir, get_school_entries_dir, get_schools_path,
    resolve_cwd,
};
