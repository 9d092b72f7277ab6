//! Template row and conversion.

use pactum_core::contract::ContractType;
use pactum_core::error::CoreError;
use pactum_core::template::Template;
use pactum_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `contract_templates` table.
#[derive(Debug, Clone, FromRow)]
pub struct TemplateRow {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub template_type: String,
    pub content: String,
    pub variables: serde_json::Value,
    pub is_public: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<TemplateRow> for Template {
    type Error = CoreError;

    fn try_from(row: TemplateRow) -> Result<Self, Self::Error> {
        Ok(Template {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            description: row.description,
            template_type: ContractType::from_name(&row.template_type)?,
            content: row.content,
            variables: row.variables,
            is_public: row.is_public,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
