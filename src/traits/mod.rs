//! Trait definitions for Huntress resource operations.
//!
//! Each entity type implements the traits its endpoints support.

mod get;
mod list;

pub use get::Get;
pub use list::{List, DEFAULT_PAGE_SIZE};
