//! Configuration handling for infoline

mod loader;

pub use loader::{load_config, validate_actor_scope};
