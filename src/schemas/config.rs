//! Config schema - Workspace configuration stored in .infoline/config.json

use serde::{Deserialize, Serialize};

use crate::schemas::role::{Role, Scope};

fn default_schema_version() -> u32 {
    1
}

fn default_actor_name() -> String {
    "admin".to_string()
}

fn default_actor_role() -> Role {
    Role::SuperAdmin
}

/// The person operating this workspace checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Name recorded in entry audit fields
    #[serde(default = "default_actor_name")]
    pub name: String,

    /// Role the actor holds
    #[serde(default = "default_actor_role")]
    pub role: Role,

    /// Where in the hierarchy the role applies
    #[serde(default)]
    pub scope: Scope,
}

impl Actor {
    /// Create an actor with an empty scope
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Actor {
            name: name.into(),
            role,
            scope: Scope::default(),
        }
    }

    /// Return a new Actor bound to the given scope
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }
}

impl Default for Actor {
    fn default() -> Self {
        Actor {
            name: default_actor_name(),
            role: default_actor_role(),
            scope: Scope::default(),
        }
    }
}

/// Workspace-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for forward compatibility
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Who is entering and reviewing data from this checkout
    #[serde(default)]
    pub actor: Actor,
}

impl Config {
    /// Create a config with default values
    pub fn new() -> Self {
        Config {
            schema_version: default_schema_version(),
            actor: Actor::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
