//! Infoline - A CLI tool for collecting and reviewing school data entries
//!
//! This library provides the core functionality for the infoline CLI, including:
//! - Schema definitions for entries, schools, categories, and configs
//! - Domain logic for the entry status lifecycle and its validation rules
//! - File system utilities for reading/writing JSON
//! - Workflow orchestration for recording, submitting and reviewing entries

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fs;
pub mod schemas;
pub mod workflow;

// Re-export commonly used types
pub use errors::{InfolineError, Result};
pub use schemas::{Config, Entry, EntryKey, EntryStatus, Role};
