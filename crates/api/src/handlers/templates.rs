//! Handlers for the `/templates` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use pactum_core::error::CoreError;
use pactum_core::record::RecordStore;
use pactum_core::template::Template;
use pactum_core::types::DbId;
use pactum_core::validation::TemplateForm;
use pactum_db::stores::PgTemplateStore;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::TemplateListParams;
use crate::response::{DataResponse, ListView, TemplateView};
use crate::state::AppState;

async fn find_template(state: &AppState, owner: DbId, id: DbId) -> AppResult<Template> {
    PgTemplateStore::new(state.pool.clone())
        .find(owner, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Template",
            id,
        }))
}

/// GET /api/v1/templates?search=&template_type=
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<TemplateListParams>,
) -> AppResult<Json<DataResponse<ListView<TemplateView>>>> {
    let template_type = params.template_type()?;
    let mut manager = state.template_manager(auth.user_id);
    manager.refresh().await?;

    let list = manager.list_mut();
    list.set_search(params.search.unwrap_or_default());
    list.set_category(template_type);

    let view = ListView::from_list(manager.list(), |t| TemplateView::from(t.clone()));
    Ok(Json(DataResponse { data: view }))
}

/// GET /api/v1/templates/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TemplateView>>> {
    let template = find_template(&state, auth.user_id, id).await?;
    Ok(Json(DataResponse {
        data: template.into(),
    }))
}

/// POST /api/v1/templates
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(form): Json<TemplateForm>,
) -> AppResult<(StatusCode, Json<DataResponse<TemplateView>>)> {
    let mut manager = state.template_manager(auth.user_id);
    manager.open_create();
    manager.form_mut().set_values(form);
    let template = manager.submit(None).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: template.into(),
        }),
    ))
}

/// PUT /api/v1/templates/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(form): Json<TemplateForm>,
) -> AppResult<Json<DataResponse<TemplateView>>> {
    let existing = find_template(&state, auth.user_id, id).await?;

    let mut manager = state.template_manager(auth.user_id);
    manager.open_edit(&existing);
    manager.form_mut().set_values(form);
    let template = manager.submit(None).await?;

    Ok(Json(DataResponse {
        data: template.into(),
    }))
}

/// DELETE /api/v1/templates/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = find_template(&state, auth.user_id, id).await?;

    let mut manager = state.template_manager(auth.user_id);
    manager.delete(&existing).await?;

    Ok(StatusCode::NO_CONTENT)
}
