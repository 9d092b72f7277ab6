use axum::routing::get;
use axum::Router;

use crate::handlers::signatures;
use crate::state::AppState;

/// Routes mounted at `/signatures`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(signatures::list))
}
