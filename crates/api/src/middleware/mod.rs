//! Request extractors for authentication and role checks.
//!
//! - [`auth::AuthUser`] -- staff member identified by a Bearer access token.
//! - [`rbac::RequireAdmin`] -- admin-only operations.
//! - [`rbac::RequireAuth`] -- any signed-in staff member.

pub mod auth;
pub mod rbac;
