pub mod admin;
pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod health;
pub mod paellas;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                      login (public)
/// /auth/refresh                    refresh (public)
/// /auth/logout                     logout (requires auth)
/// /auth/me                         current user (requires auth)
///
/// /clients                         list (filtered), create
/// /clients/{id}                    get, update (admin), delete (admin)
/// /clients/{id}/status             set client status (admin)
/// /clients/{id}/ticket             print ticket (POST)
///
/// /paellas/{id}                    get
/// /paellas/{id}/status             set paella status (admin)
///
/// /dashboard/summary               counters and deposit total
///
/// /admin/employees                 invite employee (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/clients", clients::router())
        .nest("/paellas", paellas::router())
        .nest("/dashboard", dashboard::router())
        .nest("/admin", admin::router())
}
