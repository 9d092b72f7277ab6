//! Route definitions for the `/alerts` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::alerts;
use crate::state::AppState;

/// Routes mounted at `/alerts`.
///
/// ```text
/// GET  /               -> list (?search=&alert_type=)
/// GET  /unread-count   -> unread_count
/// POST /read-all       -> mark_all_read
/// POST /{id}/read      -> mark_read
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(alerts::list))
        .route("/unread-count", get(alerts::unread_count))
        .route("/read-all", post(alerts::mark_all_read))
        .route("/{id}/read", post(alerts::mark_read))
}
