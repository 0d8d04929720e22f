//! Init command - Initialize an infoline workspace

use crate::errors::{InfolineError, Result};
use crate::fs;
use crate::schemas::{CategoryCatalog, Config, Index, SchoolRoster};
use std::path::Path;
use tracing::info;

/// Initialize an infoline workspace in the specified directory
pub fn run(cwd: Option<&Path>, force: bool, sample: bool, dry_run: bool) -> Result<()> {
    let root = fs::resolve_cwd(cwd);
    let infoline_dir = fs::get_infoline_dir(&root);

    if infoline_dir.exists() && !force {
        return Err(InfolineError::ConfigError(format!(
            "{} already exists (use --force to re-initialize)",
            infoline_dir.display()
        )));
    }

    if dry_run {
        info!("[DRY RUN] Would initialize workspace at {}", root.display());
        return Ok(());
    }

    let (roster, catalog) = if sample {
        (SchoolRoster::sample(), CategoryCatalog::sample())
    } else {
        (SchoolRoster::new(), CategoryCatalog::new())
    };

    std::fs::create_dir_all(&infoline_dir)?;
    fs::write_config(&root, &Config::default())?;
    fs::write_roster(&root, &roster)?;
    fs::write_catalog(&root, &catalog)?;
    fs::write_index(&root, &Index::new())?;

    info!("Initialized workspace at {}", root.display());
    println!("Initialized {}", infoline_dir.display());
    println!("Edit {} to set the acting user.", fs::get_config_path(&root).display());
    Ok(())
}
