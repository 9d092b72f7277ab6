use std::sync::Arc;

use pactum_core::attachment::AttachmentManager;
use pactum_core::form::{ContractSchema, TemplateSchema};
use pactum_core::manager::RecordManager;
use pactum_core::report::Reporter;
use pactum_core::types::DbId;
use pactum_db::stores::{PgContractStore, PgTemplateStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: pactum_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Uploads, removes and resolves contract attachments.
    pub attachments: Arc<AttachmentManager>,
    /// Sink for tracked operation outcomes.
    pub reporter: Arc<dyn Reporter>,
}

impl AppState {
    /// A contract manager scoped to `owner` for the current request.
    pub fn contract_manager(&self, owner: DbId) -> RecordManager<ContractSchema> {
        RecordManager::new(
            owner,
            Arc::new(PgContractStore::new(self.pool.clone())),
            Some(Arc::clone(&self.attachments)),
            Arc::clone(&self.reporter),
        )
    }

    /// A template manager scoped to `owner`. Templates carry no files.
    pub fn template_manager(&self, owner: DbId) -> RecordManager<TemplateSchema> {
        RecordManager::new(
            owner,
            Arc::new(PgTemplateStore::new(self.pool.clone())),
            None,
            Arc::clone(&self.reporter),
        )
    }
}
