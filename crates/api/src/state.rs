use std::sync::Arc;

use crate::config::ServerConfig;
use crate::storage::ObjectStorage;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything is behind `Arc` or is already a pooled handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: vaxal_db::DbPool,
    /// Server configuration (JWT secret, cron secret, upload limits).
    pub config: Arc<ServerConfig>,
    /// Object storage for project files.
    pub storage: Arc<dyn ObjectStorage>,
}
