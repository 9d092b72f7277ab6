//! Handler for advanced contract search.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use pactum_db::models::contract::into_contracts;
use pactum_db::repositories::ContractRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::SearchParams;
use crate::response::{ContractView, DataResponse};
use crate::state::AppState;

/// GET /api/v1/search?q=&status=&contract_type=&date_range=
///
/// A blank `q` returns an empty list without querying.
pub async fn search(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<ContractView>>>> {
    let query = params.into_query()?;
    if query.is_blank() {
        return Ok(Json(DataResponse { data: Vec::new() }));
    }

    let rows = ContractRepo::search(&state.pool, auth.user_id, &query, Utc::now()).await?;
    let results = into_contracts(rows)?
        .into_iter()
        .map(|c| ContractView::new(c, &state.attachments))
        .collect();

    Ok(Json(DataResponse { data: results }))
}
