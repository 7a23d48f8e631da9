//! Domain logic for the paella order backend.
//!
//! Everything here is pure and synchronous: the order-notes codec, order
//! status rules, dashboard filtering, and ticket summaries. Persistence and
//! HTTP live in `paella-db` and `paella-api`.

pub mod dashboard;
pub mod error;
pub mod notes;
pub mod orders;
pub mod roles;
pub mod ticket;
pub mod types;
