//! Repository for the `profiles` table.

use sqlx::PgPool;
use pactum_core::types::DbId;
use pactum_core::validation::ProfileDraft;

use crate::models::profile::ProfileRow;

const COLUMNS: &str = "user_id, first_name, last_name, company, phone, created_at, updated_at";

pub struct ProfileRepo;

impl ProfileRepo {
    pub async fn find(pool: &PgPool, user_id: DbId) -> Result<Option<ProfileRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE user_id = $1");
        sqlx::query_as::<_, ProfileRow>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or replace the profile keyed by `user_id`.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        draft: &ProfileDraft,
    ) -> Result<ProfileRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (user_id, first_name, last_name, company, phone) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (user_id) DO UPDATE SET \
                first_name = EXCLUDED.first_name, \
                last_name = EXCLUDED.last_name, \
                company = EXCLUDED.company, \
                phone = EXCLUDED.phone \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProfileRow>(&query)
            .bind(user_id)
            .bind(&draft.first_name)
            .bind(&draft.last_name)
            .bind(&draft.company)
            .bind(&draft.phone)
            .fetch_one(pool)
            .await
    }
}
