//! Request handlers, one submodule per resource.
//!
//! Handlers validate input with `paella_core`, delegate persistence to the
//! repositories in `paella_db`, and map errors via [`crate::error::AppError`].

pub mod admin;
pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod paellas;
