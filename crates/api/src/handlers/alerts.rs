//! Handlers for the `/alerts` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use pactum_core::alert::Alert;
use pactum_core::error::CoreError;
use pactum_core::listing::ListController;
use pactum_core::types::DbId;
use pactum_db::repositories::AlertRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::AlertListParams;
use crate::response::{DataResponse, ListView};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct MarkedRead {
    pub updated: u64,
}

/// GET /api/v1/alerts?search=&alert_type=
///
/// Newest first, each joined with its contract's title and client.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<AlertListParams>,
) -> AppResult<Json<DataResponse<ListView<Alert>>>> {
    let alert_type = params.alert_type()?;
    let alerts = AlertRepo::list_for_user(&state.pool, auth.user_id)
        .await?
        .into_iter()
        .map(Alert::try_from)
        .collect::<Result<Vec<_>, CoreError>>()?;

    let mut list = ListController::new();
    let ticket = list.begin_load();
    list.finish_load(ticket, alerts);
    list.set_search(params.search.unwrap_or_default());
    list.set_category(alert_type);

    Ok(Json(DataResponse {
        data: ListView::from_list(&list, Alert::clone),
    }))
}

/// GET /api/v1/alerts/unread-count
pub async fn unread_count(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<UnreadCount>>> {
    let count = AlertRepo::unread_count(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: UnreadCount { count },
    }))
}

/// POST /api/v1/alerts/{id}/read
///
/// Idempotent: marking an already-read alert succeeds.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let found = AlertRepo::mark_read(&state.pool, auth.user_id, id).await?;
    if !found {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Alert",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/alerts/read-all
pub async fn mark_all_read(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<MarkedRead>>> {
    let updated = AlertRepo::mark_all_read(&state.pool, auth.user_id).await?;
    tracing::debug!(user_id = auth.user_id, updated, "Marked all alerts read");
    Ok(Json(DataResponse {
        data: MarkedRead { updated },
    }))
}
