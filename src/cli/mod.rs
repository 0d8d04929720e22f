//! CLI module for infoline
//!
//! Provides the command-line interface using clap.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Infoline - A CLI tool for collecting and reviewing school data entries
#[derive(Parser, Debug)]
#[command(name = "infoline")]
#[command(version)]
#[command(about = "A CLI tool for collecting and reviewing school data entries")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress info-level output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Preview operations without executing them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Override the working directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize an infoline workspace in the current directory
    Init {
        /// Force initialization even if .infoline already exists
        #[arg(long)]
        force: bool,

        /// Seed the workspace with a sample roster and catalog
        #[arg(long)]
        sample: bool,
    },

    /// Record a value for one column of a form
    Enter {
        /// Category ID
        category: String,

        /// Column ID
        column: String,

        /// Value to record
        value: String,

        /// School ID (defaults to the actor's own school)
        #[arg(long)]
        school: Option<String>,
    },

    /// Submit a form's draft entries for review
    Submit {
        /// Category ID
        category: String,

        /// Submit a single column instead of the whole form
        #[arg(long)]
        column: Option<String>,

        /// School ID (defaults to the actor's own school)
        #[arg(long)]
        school: Option<String>,
    },

    /// Approve pending entries of a school
    Approve {
        /// School ID
        school: String,

        /// Restrict to one category
        #[arg(long)]
        category: Option<String>,

        /// Restrict to one column (requires --category)
        #[arg(long)]
        column: Option<String>,
    },

    /// Reject pending entries of a school with a reason
    Reject {
        /// School ID
        school: String,

        /// Why the entries are rejected
        #[arg(short, long)]
        reason: String,

        /// Restrict to one category
        #[arg(long)]
        category: Option<String>,

        /// Restrict to one column (requires --category)
        #[arg(long)]
        column: Option<String>,
    },

    /// Return rejected entries to draft for correction
    Reopen {
        /// School ID (defaults to the actor's own school)
        #[arg(long)]
        school: Option<String>,

        /// Restrict to one category
        #[arg(long)]
        category: Option<String>,

        /// Restrict to one column (requires --category)
        #[arg(long)]
        column: Option<String>,
    },

    /// List entries with optional filtering
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Filter by school ID
        #[arg(long)]
        school: Option<String>,

        /// Filter by category ID
        #[arg(long)]
        category: Option<String>,

        /// Filter by status (draft, pending, approved, rejected)
        #[arg(long)]
        status: Option<String>,
    },

    /// Show details of a single entry
    Show {
        /// Category ID
        category: String,

        /// Column ID
        column: String,

        /// School ID (defaults to the actor's own school)
        #[arg(long)]
        school: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show form completion and review progress per school
    Status {
        /// Restrict to one school
        #[arg(long)]
        school: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate the workspace and optionally fix issues
    Doctor {
        /// Automatically fix recoverable issues
        #[arg(long)]
        fix: bool,
    },
}
