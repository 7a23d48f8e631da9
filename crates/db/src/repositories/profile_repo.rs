//! Repository for the `profiles` table.

use paella_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::{CreateProfile, Profile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, role, full_name, created_at";

/// Provides operations for staff profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert a profile for an existing user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProfile) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (id, role, full_name)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(input.id)
            .bind(&input.role)
            .bind(&input.full_name)
            .fetch_one(pool)
            .await
    }

    /// Find the profile of a user.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether at least one profile has the given role.
    pub async fn exists_with_role(pool: &PgPool, role: &str) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM profiles WHERE role = $1)")
                .bind(role)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }
}
