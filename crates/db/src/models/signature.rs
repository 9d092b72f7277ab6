//! Signature rows.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use pactum_core::types::{DbId, Timestamp};

/// A `signatures` row joined with its contract's title and client.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Signature {
    pub id: DbId,
    pub contract_id: DbId,
    pub signatory_name: String,
    pub signatory_email: String,
    pub signed_at: Timestamp,
    pub contract_title: String,
    pub contract_client: String,
    pub created_at: Timestamp,
}

/// DTO for recording a signature.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSignature {
    pub contract_id: DbId,
    pub signatory_name: String,
    pub signatory_email: String,
}
