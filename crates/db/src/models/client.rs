//! Client entity model and DTOs.

use paella_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A client row from the `clients` table.
///
/// `status` holds one of the `paella_core::orders::ClientStatus` strings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Client {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new client. Status starts as `pending`.
#[derive(Debug, Clone)]
pub struct CreateClient {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

/// DTO for editing a client's contact details.
///
/// Every field is written as given: `None` clears `phone` / `notes`.
#[derive(Debug, Clone)]
pub struct UpdateClient {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
}
