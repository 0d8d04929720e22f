//! Configuration loading with defaults

use std::path::Path;

use crate::errors::{InfolineError, Result};
use crate::fs;
use crate::schemas::{Config, Role};

/// Load configuration from the workspace, falling back to defaults.
///
/// If config.json exists, it will be read and merged with defaults.
/// If it doesn't exist, default configuration is returned.
///
/// # Arguments
/// * `root` - Path to the workspace root
///
/// # Returns
/// The resolved configuration
pub fn load_config(root: &Path) -> Result<Config> {
    fs::read_config(root)
}

/// Check that the actor's scope matches their role.
///
/// A school-admin needs scope.school_id, a sector-admin scope.sector_id,
/// a region-admin scope.region_id. A super-admin needs no scope.
pub fn validate_actor_scope(config: &Config) -> Result<()> {
    let scope = &config.actor.scope;
    let missing = match config.actor.role {
        Role::SchoolAdmin if scope.school_id.is_none() => Some("scope.school_id"),
        Role::SectorAdmin if scope.sector_id.is_none() => Some("scope.sector_id"),
        Role::RegionAdmin if scope.region_id.is_none() => Some("scope.region_id"),
        _ => None,
    };

    match missing {
        Some(field) => Err(InfolineError::ConfigError(format!(
            "actor role {} requires {} in config.json",
            config.actor.role, field
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::{Actor, Scope};
    use std::fs as std_fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_defaults() {
        let temp = TempDir::new().unwrap();
        std_fs::create_dir(temp.path().join(".infoline")).unwrap();

        let config = load_config(temp.path()).unwrap();
        assert_eq!(config.actor.name, "admin");
        assert_eq!(config.actor.role, Role::SuperAdmin);
    }

    #[test]
    fn test_load_config_from_file() {
        let temp = TempDir::new().unwrap();
        let infoline_dir = temp.path().join(".infoline");
        std_fs::create_dir(&infoline_dir).unwrap();

        let config_content = r#"{
            "actor": {
                "name": "aysel",
                "role": "school-admin",
                "scope": {"school_id": "school-001"}
            }
        }"#;
        std_fs::write(infoline_dir.join("config.json"), config_content).unwrap();

        let config = load_config(temp.path()).unwrap();
        assert_eq!(config.actor.name, "aysel");
        assert_eq!(config.actor.role, Role::SchoolAdmin);
        assert_eq!(config.actor.scope.school_id.as_deref(), Some("school-001"));
        // Default for unspecified field
        assert_eq!(config.schema_version, 1);
    }

    #[test]
    fn test_validate_actor_scope_complete() {
        let config = Config {
            schema_version: 1,
            actor: Actor::new("aysel", Role::SchoolAdmin).with_scope(Scope::school("school-001")),
        };
        assert!(validate_actor_scope(&config).is_ok());
    }

    #[test]
    fn test_validate_actor_scope_missing() {
        let config = Config {
            schema_version: 1,
            actor: Actor::new("rashad", Role::SectorAdmin),
        };

        let result = validate_actor_scope(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("scope.sector_id"));
    }

    #[test]
    fn test_validate_actor_scope_super_admin_needs_none() {
        let config = Config::default();
        assert!(validate_actor_scope(&config).is_ok());
    }
}
