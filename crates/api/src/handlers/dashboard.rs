//! Handler for the dashboard summary.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use pactum_core::dashboard::{compute_stats, DashboardStats, RECENT_CONTRACTS_LIMIT};
use pactum_db::models::contract::into_contracts;
use pactum_db::repositories::{AlertRepo, ContractRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::{ContractView, DataResponse};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub stats: DashboardStats,
    pub recent_contracts: Vec<ContractView>,
    pub unread_alerts: i64,
}

/// GET /api/v1/dashboard
///
/// Stats cover the newest contracts only.
pub async fn get(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardView>>> {
    let rows = ContractRepo::recent(&state.pool, auth.user_id, RECENT_CONTRACTS_LIMIT).await?;
    let contracts = into_contracts(rows)?;
    let stats = compute_stats(&contracts, Utc::now().date_naive());
    let unread_alerts = AlertRepo::unread_count(&state.pool, auth.user_id).await?;

    let recent_contracts = contracts
        .into_iter()
        .map(|c| ContractView::new(c, &state.attachments))
        .collect();

    Ok(Json(DataResponse {
        data: DashboardView {
            stats,
            recent_contracts,
            unread_alerts,
        },
    }))
}
