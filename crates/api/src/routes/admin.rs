//! Route definitions for `/admin`.

use axum::routing::post;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`. Every handler requires the admin role.
///
/// ```text
/// POST /employees  -> invite_employee
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/employees", post(admin::invite_employee))
}
