//! Route definitions for the `/clients` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::clients;
use crate::state::AppState;

/// Routes mounted at `/clients`.
///
/// ```text
/// GET    /              -> list_clients (?search=, ?status=)
/// POST   /              -> create_client
/// GET    /{id}          -> get_client
/// PUT    /{id}          -> update_client (admin)
/// DELETE /{id}          -> delete_client (admin)
/// PUT    /{id}/status   -> update_client_status (admin)
/// POST   /{id}/ticket   -> print_ticket
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(clients::list_clients).post(clients::create_client))
        .route(
            "/{id}",
            get(clients::get_client)
                .put(clients::update_client)
                .delete(clients::delete_client),
        )
        .route("/{id}/status", put(clients::update_client_status))
        .route("/{id}/ticket", post(clients::print_ticket))
}
