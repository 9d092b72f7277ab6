//! Repository for the `contract_templates` table.

use pactum_core::template::TemplateDraft;
use pactum_core::types::DbId;
use sqlx::PgPool;

use crate::models::template::TemplateRow;

const COLUMNS: &str = "id, user_id, name, description, template_type, content, variables, \
    is_public, created_at, updated_at";

pub struct TemplateRepo;

impl TemplateRepo {
    /// Insert a template. `variables` starts as an empty object.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        draft: &TemplateDraft,
    ) -> Result<TemplateRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO contract_templates \
                (user_id, name, description, template_type, content, is_public) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TemplateRow>(&query)
            .bind(user_id)
            .bind(&draft.name)
            .bind(&draft.description)
            .bind(draft.template_type.name())
            .bind(&draft.content)
            .bind(draft.is_public)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<TemplateRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contract_templates WHERE id = $1 AND user_id = $2"
        );
        sqlx::query_as::<_, TemplateRow>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool, user_id: DbId) -> Result<Vec<TemplateRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contract_templates WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, TemplateRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        draft: &TemplateDraft,
    ) -> Result<Option<TemplateRow>, sqlx::Error> {
        let query = format!(
            "UPDATE contract_templates SET \
                name = $3, description = $4, template_type = $5, content = $6, is_public = $7 \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TemplateRow>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&draft.name)
            .bind(&draft.description)
            .bind(draft.template_type.name())
            .bind(&draft.content)
            .bind(draft.is_public)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contract_templates WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
