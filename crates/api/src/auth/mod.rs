//! Staff authentication.
//!
//! - [`password`] -- Argon2id hashing for staff passwords.
//! - [`jwt`] -- access tokens and opaque refresh tokens.

pub mod jwt;
pub mod password;
