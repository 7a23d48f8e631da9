use std::sync::Arc;

use crate::config::ServerConfig;
use crate::print::PrintRelay;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: paella_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractors).
    pub config: Arc<ServerConfig>,
    /// Client for the external ticket printing service.
    pub print_relay: Arc<PrintRelay>,
}
