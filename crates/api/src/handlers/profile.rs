//! Handlers for the `/profile` resource.

use axum::extract::State;
use axum::Json;
use pactum_core::error::CoreError;
use pactum_core::profile::Profile;
use pactum_core::report::track;
use pactum_core::types::Timestamp;
use pactum_core::validation::{validate_profile, ProfileForm};
use pactum_db::repositories::ProfileRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// The settings form as the client renders it.
#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub email: String,
    pub display_name: Option<String>,
    #[serde(flatten)]
    pub fields: ProfileForm,
    /// `None` until the profile is first saved.
    pub updated_at: Option<Timestamp>,
}

impl ProfileView {
    fn new(email: String, profile: Option<Profile>) -> Self {
        match profile {
            Some(profile) => Self {
                email,
                display_name: profile.display_name(),
                fields: profile.form(),
                updated_at: Some(profile.updated_at),
            },
            None => Self {
                email,
                display_name: None,
                fields: ProfileForm::default(),
                updated_at: None,
            },
        }
    }
}

/// GET /api/v1/profile
///
/// A user without a saved profile gets empty fields.
pub async fn get(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ProfileView>>> {
    let profile = ProfileRepo::find(&state.pool, auth.user_id)
        .await?
        .map(Profile::from);

    Ok(Json(DataResponse {
        data: ProfileView::new(auth.email, profile),
    }))
}

/// PUT /api/v1/profile
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(form): Json<ProfileForm>,
) -> AppResult<Json<DataResponse<ProfileView>>> {
    let draft =
        validate_profile(&form).map_err(|e| AppError::Core(CoreError::InvalidFields(e)))?;

    let row = track(
        state.reporter.as_ref(),
        "Saving profile",
        ProfileRepo::upsert(&state.pool, auth.user_id, &draft),
    )
    .await?;

    Ok(Json(DataResponse {
        data: ProfileView::new(auth.email, Some(row.into())),
    }))
}
