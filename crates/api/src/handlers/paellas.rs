//! Handlers for the `/paellas` resource.

use axum::extract::{Path, State};
use axum::Json;
use paella_core::error::CoreError;
use paella_core::orders::PaellaStatus;
use paella_core::types::DbId;
use paella_db::repositories::PaellaRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::views::PaellaView;

#[derive(Debug, Deserialize)]
pub struct UpdatePaellaStatusRequest {
    pub status: String,
}

/// GET /api/v1/paellas/{id}
pub async fn get_paella(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(paella_id): Path<DbId>,
) -> AppResult<Json<DataResponse<PaellaView>>> {
    let row = PaellaRepo::find_by_id(&state.pool, paella_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Paella",
            id: paella_id,
        })?;

    Ok(Json(DataResponse {
        data: PaellaView::from_row(row)?,
    }))
}

/// PUT /api/v1/paellas/{id}/status
///
/// Move a paella through the kitchen (pending, cooking, ready, delivered,
/// returned). Any transition is allowed.
pub async fn update_paella_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(paella_id): Path<DbId>,
    Json(input): Json<UpdatePaellaStatusRequest>,
) -> AppResult<Json<DataResponse<PaellaView>>> {
    let status = PaellaStatus::from_str(input.status.trim())?;

    let row = PaellaRepo::update_status(&state.pool, paella_id, status.as_str())
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Paella",
            id: paella_id,
        })?;

    tracing::info!(
        paella_id,
        client_id = row.client_id,
        status = status.as_str(),
        user_id = admin.user_id,
        "Paella status changed"
    );

    Ok(Json(DataResponse {
        data: PaellaView::from_row(row)?,
    }))
}
