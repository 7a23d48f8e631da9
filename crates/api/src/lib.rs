//! Paella order API server library.
//!
//! Exposes the core building blocks (config, state, error handling, routes,
//! print relay) so integration tests and the binary entrypoint can both
//! access them.

pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod print;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod views;
