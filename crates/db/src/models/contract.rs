//! Contract row and conversion.

use pactum_core::attachment::FileRef;
use pactum_core::contract::{Contract, ContractStatus, ContractType};
use pactum_core::error::CoreError;
use pactum_core::types::{Date, DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `contracts` table.
#[derive(Debug, Clone, FromRow)]
pub struct ContractRow {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub contract_type: String,
    pub client_name: String,
    pub client_email: Option<String>,
    pub contract_value: Option<f64>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub status: String,
    pub tags: Vec<String>,
    pub file_locator: Option<String>,
    pub file_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<ContractRow> for Contract {
    type Error = CoreError;

    fn try_from(row: ContractRow) -> Result<Self, Self::Error> {
        let file = match (row.file_locator, row.file_name) {
            (Some(locator), Some(file_name)) => Some(FileRef { locator, file_name }),
            _ => None,
        };
        Ok(Contract {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            description: row.description,
            contract_type: ContractType::from_name(&row.contract_type)?,
            client_name: row.client_name,
            client_email: row.client_email,
            contract_value: row.contract_value,
            start_date: row.start_date,
            end_date: row.end_date,
            status: ContractStatus::from_name(&row.status)?,
            tags: row.tags,
            file,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Convert a batch of rows, failing on the first unreadable one.
pub fn into_contracts(rows: Vec<ContractRow>) -> Result<Vec<Contract>, CoreError> {
    rows.into_iter().map(Contract::try_from).collect()
}
