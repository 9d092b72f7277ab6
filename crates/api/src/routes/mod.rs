pub mod alerts;
pub mod auth;
pub mod contracts;
pub mod dashboard;
pub mod health;
pub mod profile;
pub mod signatures;
pub mod templates;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                      create account (POST)
/// /auth/login                       sign in (POST)
/// /auth/me                          current identity
///
/// /contracts                        list, create (multipart)
/// /contracts/{id}                   get, update (multipart), delete
///
/// /templates                        list, create
/// /templates/{id}                   get, update, delete
///
/// /alerts                           list
/// /alerts/unread-count              notification badge
/// /alerts/read-all                  mark all read (POST)
/// /alerts/{id}/read                 mark one read (POST)
///
/// /profile                          get, upsert (PUT)
/// /signatures                       list
/// /search                           advanced contract search
/// /dashboard                        summary stats + recent contracts
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/contracts", contracts::router())
        .nest("/templates", templates::router())
        .nest("/alerts", alerts::router())
        .nest("/profile", profile::router())
        .nest("/signatures", signatures::router())
        .nest("/dashboard", dashboard::router())
        .route("/search", get(handlers::search::search))
}
