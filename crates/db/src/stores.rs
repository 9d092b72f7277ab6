//! PostgreSQL-backed [`RecordStore`] adapters.
//!
//! Thin wrappers translating between the repositories' rows and the core
//! record types. sqlx failures surface as [`CoreError::Gateway`] carrying
//! the driver message; check-constraint violations become validation errors.

use async_trait::async_trait;
use pactum_core::contract::{Contract, ContractDraft};
use pactum_core::error::CoreError;
use pactum_core::record::RecordStore;
use pactum_core::template::{Template, TemplateDraft};
use pactum_core::types::DbId;
use sqlx::PgPool;

use crate::models::contract::into_contracts;
use crate::repositories::{ContractRepo, TemplateRepo};

/// PostgreSQL `check_violation`.
const CHECK_VIOLATION: &str = "23514";

/// Map a sqlx error onto the core taxonomy.
pub fn store_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(CHECK_VIOLATION) {
            let constraint = db_err.constraint().unwrap_or("unknown");
            return CoreError::Validation(format!("Value violates check constraint: {constraint}"));
        }
    }
    tracing::error!(error = %err, "Record store query failed");
    CoreError::Gateway(err.to_string())
}

#[derive(Debug, Clone)]
pub struct PgContractStore {
    pool: PgPool,
}

impl PgContractStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore<Contract> for PgContractStore {
    async fn list_all(&self, owner: DbId) -> Result<Vec<Contract>, CoreError> {
        let rows = ContractRepo::list(&self.pool, owner)
            .await
            .map_err(store_error)?;
        into_contracts(rows)
    }

    async fn find(&self, owner: DbId, id: DbId) -> Result<Option<Contract>, CoreError> {
        ContractRepo::find_by_id(&self.pool, owner, id)
            .await
            .map_err(store_error)?
            .map(Contract::try_from)
            .transpose()
    }

    async fn insert(&self, owner: DbId, draft: &ContractDraft) -> Result<Contract, CoreError> {
        let row = ContractRepo::create(&self.pool, owner, draft)
            .await
            .map_err(store_error)?;
        Contract::try_from(row)
    }

    async fn update(
        &self,
        owner: DbId,
        id: DbId,
        draft: &ContractDraft,
    ) -> Result<Option<Contract>, CoreError> {
        ContractRepo::update(&self.pool, owner, id, draft)
            .await
            .map_err(store_error)?
            .map(Contract::try_from)
            .transpose()
    }

    async fn delete(&self, owner: DbId, id: DbId) -> Result<bool, CoreError> {
        ContractRepo::delete(&self.pool, owner, id)
            .await
            .map_err(store_error)
    }
}

#[derive(Debug, Clone)]
pub struct PgTemplateStore {
    pool: PgPool,
}

impl PgTemplateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore<Template> for PgTemplateStore {
    async fn list_all(&self, owner: DbId) -> Result<Vec<Template>, CoreError> {
        TemplateRepo::list(&self.pool, owner)
            .await
            .map_err(store_error)?
            .into_iter()
            .map(Template::try_from)
            .collect()
    }

    async fn find(&self, owner: DbId, id: DbId) -> Result<Option<Template>, CoreError> {
        TemplateRepo::find_by_id(&self.pool, owner, id)
            .await
            .map_err(store_error)?
            .map(Template::try_from)
            .transpose()
    }

    async fn insert(&self, owner: DbId, draft: &TemplateDraft) -> Result<Template, CoreError> {
        let row = TemplateRepo::create(&self.pool, owner, draft)
            .await
            .map_err(store_error)?;
        Template::try_from(row)
    }

    async fn update(
        &self,
        owner: DbId,
        id: DbId,
        draft: &TemplateDraft,
    ) -> Result<Option<Template>, CoreError> {
        TemplateRepo::update(&self.pool, owner, id, draft)
            .await
            .map_err(store_error)?
            .map(Template::try_from)
            .transpose()
    }

    async fn delete(&self, owner: DbId, id: DbId) -> Result<bool, CoreError> {
        TemplateRepo::delete(&self.pool, owner, id)
            .await
            .map_err(store_error)
    }
}
