use axum::routing::get;
use axum::Router;

use crate::handlers::cron;
use crate::state::AppState;

/// Routes mounted at `/cron`. Authenticated by the cron bearer secret, not JWT.
pub fn router() -> Router<AppState> {
    Router::new().route("/overdue-reports", get(cron::overdue_reports))
}
