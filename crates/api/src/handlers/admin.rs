//! Admin-only staff management.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use paella_core::error::CoreError;
use paella_core::roles::ROLE_EMPLOYEE;
use paella_core::types::DbId;
use paella_db::models::profile::CreateProfile;
use paella_db::models::user::CreateUser;
use paella_db::repositories::{ProfileRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::password::{hash_password, validate_password};
use crate::error::{AppError, AppResult};
use crate::handlers::auth::normalize_email;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct InviteEmployeeRequest {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EmployeeResponse {
    pub id: DbId,
    pub email: String,
    pub role: String,
    pub full_name: Option<String>,
}

/// POST /api/v1/admin/employees
///
/// Create a sign-in for a new employee. Duplicate emails answer 409.
pub async fn invite_employee(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<InviteEmployeeRequest>,
) -> AppResult<impl IntoResponse> {
    let email = normalize_email(&input.email);
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::Core(CoreError::Validation(
            "A valid email is required".into(),
        )));
    }
    validate_password(&input.password)?;

    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "An account already exists for {email}"
        ))));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email,
            password_hash,
        },
    )
    .await?;

    let full_name = input
        .full_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    let profile = ProfileRepo::create(
        &state.pool,
        &CreateProfile {
            id: user.id,
            role: ROLE_EMPLOYEE.to_string(),
            full_name,
        },
    )
    .await
    .inspect_err(|e| {
        tracing::error!(user_id = user.id, error = %e, "Employee user created without a profile");
    })?;

    tracing::info!(
        user_id = user.id,
        invited_by = admin.user_id,
        "Employee invited"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: EmployeeResponse {
                id: user.id,
                email: user.email,
                role: profile.role,
                full_name: profile.full_name,
            },
        }),
    ))
}
