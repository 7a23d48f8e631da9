//! Paella order model and DTOs.

use paella_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A paella row from the `paellas` table.
///
/// `notes` is the encoded order annotation; decode it with
/// `paella_core::notes::decode` rather than exposing it directly.
#[derive(Debug, Clone, FromRow)]
pub struct Paella {
    pub id: DbId,
    pub client_id: DbId,
    pub servings: i32,
    pub rice_type: Option<String>,
    pub status: String,
    pub scheduled_for: Option<Timestamp>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new paella. Status starts as `pending`.
#[derive(Debug, Clone)]
pub struct CreatePaella {
    pub client_id: DbId,
    pub servings: i32,
    pub rice_type: Option<String>,
    pub scheduled_for: Option<Timestamp>,
    pub notes: Option<String>,
}

/// DTO for editing a paella.
///
/// `servings`, `rice_type` and `notes` replace the stored values wholesale;
/// `scheduled_for` is only changed when given.
#[derive(Debug, Clone)]
pub struct UpdatePaella {
    pub servings: i32,
    pub rice_type: Option<String>,
    pub scheduled_for: Option<Timestamp>,
    pub notes: Option<String>,
}
