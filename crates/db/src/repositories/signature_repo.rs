//! Repository for the `signatures` table.

use pactum_core::types::DbId;
use sqlx::PgPool;

use crate::models::signature::{CreateSignature, Signature};

const JOINED_COLUMNS: &str = "s.id, s.contract_id, s.signatory_name, s.signatory_email, \
    s.signed_at, c.title AS contract_title, c.client_name AS contract_client, s.created_at";

pub struct SignatureRepo;

impl SignatureRepo {
    /// Record a signature on one of the user's own contracts.
    ///
    /// Returns `None` if the contract does not belong to `user_id`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateSignature,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO signatures (user_id, contract_id, signatory_name, signatory_email) \
             SELECT $1, c.id, $3, $4 FROM contracts c WHERE c.id = $2 AND c.user_id = $1 \
             RETURNING id",
        )
        .bind(user_id)
        .bind(input.contract_id)
        .bind(&input.signatory_name)
        .bind(&input.signatory_email)
        .fetch_optional(pool)
        .await
    }

    /// A user's signatures, most recently signed first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Signature>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM signatures s \
             JOIN contracts c ON c.id = s.contract_id \
             WHERE s.user_id = $1 \
             ORDER BY s.signed_at DESC, s.id DESC"
        );
        sqlx::query_as::<_, Signature>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
