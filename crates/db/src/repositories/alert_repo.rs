//! Repository for the `contract_alerts` table.

use pactum_core::types::DbId;
use sqlx::PgPool;

use crate::models::alert::{AlertRow, CreateAlert};

/// Alert columns plus the joined contract display fields.
const JOINED_COLUMNS: &str = "a.id, a.user_id, a.contract_id, a.alert_type, a.alert_date, \
    a.message, a.is_read, c.title AS contract_title, c.client_name AS contract_client, \
    a.created_at, a.updated_at";

/// Provides listing and read-state updates for alerts.
pub struct AlertRepo;

impl AlertRepo {
    /// Insert an alert, returning the generated ID.
    pub async fn create(pool: &PgPool, input: &CreateAlert) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO contract_alerts (user_id, contract_id, alert_type, alert_date, message) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id",
        )
        .bind(input.user_id)
        .bind(input.contract_id)
        .bind(input.alert_type.name())
        .bind(input.alert_date)
        .bind(&input.message)
        .fetch_one(pool)
        .await
    }

    /// A user's alerts joined with their contracts, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<AlertRow>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM contract_alerts a \
             JOIN contracts c ON c.id = a.contract_id \
             WHERE a.user_id = $1 \
             ORDER BY a.created_at DESC, a.id DESC"
        );
        sqlx::query_as::<_, AlertRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Mark one alert as read.
    ///
    /// Returns `true` if the alert exists for this user (already-read alerts
    /// included), `false` otherwise. Read state never reverts.
    pub async fn mark_read(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE contract_alerts SET is_read = true \
             WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark every unread alert as read. Returns how many changed.
    pub async fn mark_all_read(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE contract_alerts SET is_read = true \
             WHERE user_id = $1 AND is_read = false",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn unread_count(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM contract_alerts WHERE user_id = $1 AND is_read = false",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }
}
