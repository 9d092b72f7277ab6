use axum::extract::State;
use axum::{routing::get, Json, Router};
use pactum_storage::{StorageBackendType, StorageSettings};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when a dependency check fails.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Configured attachment backend (`local` or `s3`).
    pub storage_backend: &'static str,
    /// Whether the local storage root is a directory; `null` for S3.
    pub storage_healthy: Option<bool>,
}

async fn storage_healthy(settings: &StorageSettings) -> Option<bool> {
    match settings.backend {
        StorageBackendType::Local => Some(
            tokio::fs::metadata(&settings.root)
                .await
                .is_ok_and(|meta| meta.is_dir()),
        ),
        StorageBackendType::S3 => None,
    }
}

/// GET /health -- database and attachment storage health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = pactum_db::health_check(&state.pool).await.is_ok();
    let storage = &state.config.storage;
    let storage_healthy = storage_healthy(storage).await;

    let status = if db_healthy && storage_healthy != Some(false) {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        storage_backend: storage.backend.name(),
        storage_healthy,
    })
}

/// Mount health check routes (root level, outside `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
