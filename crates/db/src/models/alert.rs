//! Alert rows, read joined with the owning contract.

use pactum_core::alert::{Alert, AlertType};
use pactum_core::error::CoreError;
use pactum_core::types::{Date, DbId, Timestamp};
use sqlx::FromRow;

/// A `contract_alerts` row joined with its contract's title and client.
#[derive(Debug, Clone, FromRow)]
pub struct AlertRow {
    pub id: DbId,
    pub user_id: DbId,
    pub contract_id: DbId,
    pub alert_type: String,
    pub alert_date: Date,
    pub message: String,
    pub is_read: bool,
    pub contract_title: String,
    pub contract_client: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<AlertRow> for Alert {
    type Error = CoreError;

    fn try_from(row: AlertRow) -> Result<Self, Self::Error> {
        Ok(Alert {
            id: row.id,
            user_id: row.user_id,
            contract_id: row.contract_id,
            alert_type: AlertType::from_name(&row.alert_type)?,
            alert_date: row.alert_date,
            message: row.message,
            is_read: row.is_read,
            contract_title: row.contract_title,
            contract_client: row.contract_client,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// DTO for inserting an alert.
#[derive(Debug, Clone)]
pub struct CreateAlert {
    pub user_id: DbId,
    pub contract_id: DbId,
    pub alert_type: AlertType,
    pub alert_date: Date,
    pub message: String,
}
