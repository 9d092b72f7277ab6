//! Handlers for the `/signatures` resource.

use axum::extract::State;
use axum::Json;
use pactum_db::models::signature::Signature;
use pactum_db::repositories::SignatureRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/signatures
///
/// Newest signature first, joined with the contract title and client.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Signature>>>> {
    let signatures = SignatureRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: signatures }))
}
