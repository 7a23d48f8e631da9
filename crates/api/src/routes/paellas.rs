//! Route definitions for the `/paellas` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::paellas;
use crate::state::AppState;

/// Routes mounted at `/paellas`.
///
/// ```text
/// GET /{id}          -> get_paella
/// PUT /{id}/status   -> update_paella_status (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(paellas::get_paella))
        .route("/{id}/status", put(paellas::update_paella_status))
}
