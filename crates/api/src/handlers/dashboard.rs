//! Handler for the dashboard counters.

use axum::extract::State;
use axum::Json;
use paella_core::dashboard::DashboardSummary;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::views::load_client_views;

/// GET /api/v1/dashboard/summary
///
/// Client and paella status counts, active paellas (pending or cooking), and
/// the total of effective deposits.
pub async fn summary(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardSummary>>> {
    let mut summary = DashboardSummary::default();

    for view in load_client_views(&state.pool).await? {
        summary.record_client(view.status()?);
        for paella in &view.paellas {
            summary.record_paella(paella.status, &paella.annotation);
        }
    }

    Ok(Json(DataResponse { data: summary }))
}
