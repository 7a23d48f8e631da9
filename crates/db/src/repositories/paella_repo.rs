//! Repository for the `paellas` table.

use paella_core::types::DbId;
use sqlx::PgPool;

use crate::models::paella::{CreatePaella, Paella, UpdatePaella};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, client_id, servings, rice_type, status, scheduled_for, notes, \
                       created_at, updated_at";

/// Provides CRUD operations for paella orders.
pub struct PaellaRepo;

impl PaellaRepo {
    /// Insert a new paella with status `pending`, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePaella) -> Result<Paella, sqlx::Error> {
        let query = format!(
            "INSERT INTO paellas (client_id, servings, rice_type, scheduled_for, notes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Paella>(&query)
            .bind(input.client_id)
            .bind(input.servings)
            .bind(&input.rice_type)
            .bind(input.scheduled_for)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a paella by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Paella>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM paellas WHERE id = $1");
        sqlx::query_as::<_, Paella>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a client's paellas in creation order.
    pub async fn list_by_client(pool: &PgPool, client_id: DbId) -> Result<Vec<Paella>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM paellas WHERE client_id = $1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Paella>(&query)
            .bind(client_id)
            .fetch_all(pool)
            .await
    }

    /// List the paellas of several clients at once, in creation order.
    pub async fn list_by_clients(
        pool: &PgPool,
        client_ids: &[DbId],
    ) -> Result<Vec<Paella>, sqlx::Error> {
        if client_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM paellas WHERE client_id = ANY($1) ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Paella>(&query)
            .bind(client_ids)
            .fetch_all(pool)
            .await
    }

    /// Replace a paella's editable fields.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePaella,
    ) -> Result<Option<Paella>, sqlx::Error> {
        let query = format!(
            "UPDATE paellas SET
                servings = $2,
                rice_type = $3,
                scheduled_for = COALESCE($4, scheduled_for),
                notes = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Paella>(&query)
            .bind(id)
            .bind(input.servings)
            .bind(&input.rice_type)
            .bind(input.scheduled_for)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Set a paella's status. Returns `None` if the paella does not exist.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Paella>, sqlx::Error> {
        let query = format!("UPDATE paellas SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Paella>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Delete every paella of a client. Returns the count of deleted rows.
    pub async fn delete_by_client(pool: &PgPool, client_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM paellas WHERE client_id = $1")
            .bind(client_id)
            .execute(pool)
            .await?;
        tracing::debug!(client_id, deleted = result.rows_affected(), "Deleted client paellas");
        Ok(result.rows_affected())
    }
}
