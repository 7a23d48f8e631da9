//! Well-known role name constants.
//!
//! These must match the check constraint on `profiles.role`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EMPLOYEE: &str = "employee";
