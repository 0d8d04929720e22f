//! Schema types for infoline
//!
//! Everything stored under .infoline/ is serialized from these types.

mod category;
mod config;
mod entry;
mod index;
mod role;
mod school;

pub use category::{Category, CategoryCatalog, Column, ColumnType, FormCompletion};
pub use config::{Actor, Config};
pub use entry::{Entry, EntryKey, EntryStatus};
pub use index::{Index, IndexEntry};
pub use role::{Role, Scope};
pub use school::{School, SchoolRoster};
