//! First-run administrator provisioning.

use paella_core::roles::ROLE_ADMIN;
use paella_db::models::profile::CreateProfile;
use paella_db::models::user::CreateUser;
use paella_db::repositories::{ProfileRepo, UserRepo};
use paella_db::DbPool;

use crate::auth::password::{hash_password, validate_password};
use crate::config::BootstrapAdmin;
use crate::error::{AppError, AppResult};
use crate::handlers::auth::normalize_email;

/// Outcome of [`ensure_admin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// An admin profile already exists; nothing was written.
    AlreadyProvisioned,
    /// The configured user existed and was given an admin profile.
    PromotedExistingUser,
    /// A new user and admin profile were created.
    Created,
}

/// Make sure at least one admin exists, creating the configured one if not.
///
/// A configured email that already belongs to a staff member with another
/// role is left untouched.
pub async fn ensure_admin(pool: &DbPool, admin: &BootstrapAdmin) -> AppResult<BootstrapOutcome> {
    if ProfileRepo::exists_with_role(pool, ROLE_ADMIN).await? {
        return Ok(BootstrapOutcome::AlreadyProvisioned);
    }

    let email = normalize_email(&admin.email);

    let (user_id, outcome) = match UserRepo::find_by_email(pool, &email).await? {
        Some(existing) => {
            if let Some(profile) = ProfileRepo::find_by_id(pool, existing.id).await? {
                tracing::warn!(
                    user_id = existing.id,
                    role = %profile.role,
                    "Bootstrap admin email belongs to an existing staff member, skipping"
                );
                return Ok(BootstrapOutcome::AlreadyProvisioned);
            }
            (existing.id, BootstrapOutcome::PromotedExistingUser)
        }
        None => {
            validate_password(&admin.password)?;
            let password_hash = hash_password(&admin.password)
                .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
            let user = UserRepo::create(
                pool,
                &CreateUser {
                    email,
                    password_hash,
                },
            )
            .await?;
            (user.id, BootstrapOutcome::Created)
        }
    };

    ProfileRepo::create(
        pool,
        &CreateProfile {
            id: user_id,
            role: ROLE_ADMIN.to_string(),
            full_name: None,
        },
    )
    .await?;

    tracing::info!(user_id, outcome = ?outcome, "Bootstrap admin provisioned");
    Ok(outcome)
}
