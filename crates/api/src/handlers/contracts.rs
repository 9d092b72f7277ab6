//! Handlers for the `/contracts` resource.
//!
//! Writes take `multipart/form-data`: a `data` part holding the contract
//! form as JSON, and an optional `file` part. An empty `file` part counts as
//! no file.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use pactum_core::attachment::Upload;
use pactum_core::contract::Contract;
use pactum_core::error::CoreError;
use pactum_core::record::RecordStore;
use pactum_core::types::DbId;
use pactum_core::validation::ContractForm;
use pactum_db::stores::PgContractStore;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::ContractListParams;
use crate::response::{ContractView, DataResponse, ListView};
use crate::state::AppState;

/// Split a contract multipart body into the form and optional upload.
async fn read_contract_parts(
    mut multipart: Multipart,
) -> AppResult<(ContractForm, Option<Upload>)> {
    let mut form: Option<ContractForm> = None;
    let mut upload: Option<Upload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "data" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let parsed = serde_json::from_str(&text)
                    .map_err(|e| AppError::BadRequest(format!("Invalid contract data: {e}")))?;
                form = Some(parsed);
            }
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if !bytes.is_empty() {
                    upload = Some(Upload {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            other => {
                tracing::debug!(field = other, "Ignoring unknown multipart field");
            }
        }
    }

    let form = form.ok_or_else(|| AppError::BadRequest("Missing 'data' field".into()))?;
    Ok((form, upload))
}

async fn find_contract(state: &AppState, owner: DbId, id: DbId) -> AppResult<Contract> {
    PgContractStore::new(state.pool.clone())
        .find(owner, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Contract",
            id,
        }))
}

/// GET /api/v1/contracts?search=&status=
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ContractListParams>,
) -> AppResult<Json<DataResponse<ListView<ContractView>>>> {
    let status = params.status()?;
    let mut manager = state.contract_manager(auth.user_id);
    manager.refresh().await?;

    let list = manager.list_mut();
    list.set_search(params.search.unwrap_or_default());
    list.set_category(status);

    let view = ListView::from_list(manager.list(), |c| {
        ContractView::new(c.clone(), &state.attachments)
    });
    Ok(Json(DataResponse { data: view }))
}

/// GET /api/v1/contracts/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ContractView>>> {
    let contract = find_contract(&state, auth.user_id, id).await?;
    Ok(Json(DataResponse {
        data: ContractView::new(contract, &state.attachments),
    }))
}

/// POST /api/v1/contracts
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<ContractView>>)> {
    let (form, upload) = read_contract_parts(multipart).await?;

    let mut manager = state.contract_manager(auth.user_id);
    manager.open_create();
    manager.form_mut().set_values(form);
    let contract = manager.submit(upload).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ContractView::new(contract, &state.attachments),
        }),
    ))
}

/// PUT /api/v1/contracts/{id}
///
/// Without a new file the current attachment is kept.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<ContractView>>> {
    let (form, upload) = read_contract_parts(multipart).await?;
    let existing = find_contract(&state, auth.user_id, id).await?;

    let mut manager = state.contract_manager(auth.user_id);
    manager.open_edit(&existing);
    manager.form_mut().set_values(form);
    let contract = manager.submit(upload).await?;

    Ok(Json(DataResponse {
        data: ContractView::new(contract, &state.attachments),
    }))
}

/// DELETE /api/v1/contracts/{id}
///
/// Removes the stored file first (best effort), then the row.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = find_contract(&state, auth.user_id, id).await?;

    let mut manager = state.contract_manager(auth.user_id);
    manager.request_delete(existing);
    manager.confirm_delete().await?;

    Ok(StatusCode::NO_CONTENT)
}
