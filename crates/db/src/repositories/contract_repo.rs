//! Repository for the `contracts` table.

use pactum_core::contract::ContractDraft;
use pactum_core::search::SearchQuery;
use pactum_core::types::{Date, DbId, Timestamp};
use sqlx::PgPool;

use crate::models::contract::ContractRow;

/// Column list for `contracts` queries.
const COLUMNS: &str = "id, user_id, title, description, contract_type, client_name, \
    client_email, contract_value, start_date, end_date, status, tags, \
    file_locator, file_name, created_at, updated_at";

/// Provides CRUD, search and dashboard queries for contracts.
pub struct ContractRepo;

impl ContractRepo {
    /// Insert a contract stamped with `user_id`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        draft: &ContractDraft,
    ) -> Result<ContractRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO contracts \
                (user_id, title, description, contract_type, client_name, client_email, \
                 contract_value, start_date, end_date, status, tags, file_locator, file_name) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContractRow>(&query)
            .bind(user_id)
            .bind(&draft.title)
            .bind(&draft.description)
            .bind(draft.contract_type.name())
            .bind(&draft.client_name)
            .bind(&draft.client_email)
            .bind(draft.contract_value)
            .bind(draft.start_date)
            .bind(draft.end_date)
            .bind(draft.status.name())
            .bind(&draft.tags)
            .bind(draft.file.as_ref().map(|f| f.locator.as_str()))
            .bind(draft.file.as_ref().map(|f| f.file_name.as_str()))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<ContractRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contracts WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, ContractRow>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// All of a user's contracts, newest first.
    pub async fn list(pool: &PgPool, user_id: DbId) -> Result<Vec<ContractRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contracts WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ContractRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// The `limit` most recently created contracts.
    pub async fn recent(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<ContractRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contracts WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC LIMIT $2"
        );
        sqlx::query_as::<_, ContractRow>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Replace every editable field. Returns `None` if the contract does not
    /// exist for this user.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        draft: &ContractDraft,
    ) -> Result<Option<ContractRow>, sqlx::Error> {
        let query = format!(
            "UPDATE contracts SET \
                title = $3, description = $4, contract_type = $5, client_name = $6, \
                client_email = $7, contract_value = $8, start_date = $9, end_date = $10, \
                status = $11, tags = $12, file_locator = $13, file_name = $14 \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContractRow>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&draft.title)
            .bind(&draft.description)
            .bind(draft.contract_type.name())
            .bind(&draft.client_name)
            .bind(&draft.client_email)
            .bind(draft.contract_value)
            .bind(draft.start_date)
            .bind(draft.end_date)
            .bind(draft.status.name())
            .bind(&draft.tags)
            .bind(draft.file.as_ref().map(|f| f.locator.as_str()))
            .bind(draft.file.as_ref().map(|f| f.file_name.as_str()))
            .fetch_optional(pool)
            .await
    }

    /// Delete a contract. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contracts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Advanced search: term over title, description and client name, plus
    /// optional status, type and creation-date bounds. Newest first.
    ///
    /// Callers short-circuit blank terms; this query would match everything.
    pub async fn search(
        pool: &PgPool,
        user_id: DbId,
        search: &SearchQuery,
        now: Timestamp,
    ) -> Result<Vec<ContractRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contracts \
             WHERE user_id = $1 \
               AND (title ILIKE $2 ESCAPE '\\' \
                    OR description ILIKE $2 ESCAPE '\\' \
                    OR client_name ILIKE $2 ESCAPE '\\') \
               AND ($3::text IS NULL OR status = $3) \
               AND ($4::text IS NULL OR contract_type = $4) \
               AND ($5::timestamptz IS NULL OR created_at >= $5) \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ContractRow>(&query)
            .bind(user_id)
            .bind(search.like_pattern())
            .bind(search.status.map(|s| s.name()))
            .bind(search.contract_type.map(|t| t.name()))
            .bind(search.date_range.since(now))
            .fetch_all(pool)
            .await
    }

    /// Contracts of any user ending in `[from, until]` that have no
    /// expiration alert yet.
    pub async fn expiring_without_alert(
        pool: &PgPool,
        from: Date,
        until: Date,
    ) -> Result<Vec<ContractRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contracts \
             WHERE end_date BETWEEN $1 AND $2 \
               AND status NOT IN ('expired', 'cancelled') \
               AND NOT EXISTS ( \
                   SELECT 1 FROM contract_alerts a \
                   WHERE a.contract_id = contracts.id AND a.alert_type = 'expiration') \
             ORDER BY end_date, id"
        );
        sqlx::query_as::<_, ContractRow>(&query)
            .bind(from)
            .bind(until)
            .fetch_all(pool)
            .await
    }
}
