//! Staff profile model and DTOs.

use paella_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A profile row from the `profiles` table. `id` is the owning user's id.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    /// Role name (`"admin"` or `"employee"`).
    pub role: String,
    pub full_name: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a profile alongside a new user.
#[derive(Debug, Clone)]
pub struct CreateProfile {
    pub id: DbId,
    pub role: String,
    pub full_name: Option<String>,
}
