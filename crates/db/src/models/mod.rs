//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO where the entity is editable

pub mod client;
pub mod paella;
pub mod profile;
pub mod session;
pub mod user;
