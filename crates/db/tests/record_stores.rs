//! Integration tests for the PostgreSQL record stores.
//!
//! - Newest-first listing and owner scoping
//! - Full-replace updates, including clearing the file reference
//! - Check-constraint violations surfacing as validation errors

use assert_matches::assert_matches;
use pactum_core::attachment::FileRef;
use pactum_core::contract::{ContractDraft, ContractStatus, ContractType};
use pactum_core::error::CoreError;
use pactum_core::record::RecordStore;
use pactum_core::template::TemplateDraft;
use pactum_core::types::{Date, DbId};
use pactum_db::repositories::UserRepo;
use pactum_db::stores::{PgContractStore, PgTemplateStore};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn user(pool: &PgPool, email: &str) -> DbId {
    UserRepo::create(pool, email, "$argon2id$test").await.unwrap().id
}

fn draft(title: &str) -> ContractDraft {
    ContractDraft {
        title: title.to_string(),
        description: Some("Two floors".into()),
        contract_type: ContractType::Supply,
        client_name: "ACME".into(),
        client_email: Some("legal@acme.com".into()),
        contract_value: Some(1200.0),
        start_date: Date::from_ymd_opt(2025, 1, 1),
        end_date: Date::from_ymd_opt(2025, 12, 31),
        status: ContractStatus::Active,
        tags: vec!["lease".into(), "hq".into()],
        file: Some(FileRef {
            locator: "1/1_00000000_lease.pdf".into(),
            file_name: "lease.pdf".into(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Contracts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_insert_round_trips_all_fields(pool: PgPool) {
    let owner = user(&pool, "a@example.com").await;
    let store = PgContractStore::new(pool);

    let saved = store.insert(owner, &draft("Lease")).await.unwrap();
    assert_eq!(saved.draft(), draft("Lease"));
    assert_eq!(saved.user_id, owner);

    let found = store.find(owner, saved.id).await.unwrap().unwrap();
    assert_eq!(found, saved);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_is_newest_first(pool: PgPool) {
    let owner = user(&pool, "a@example.com").await;
    let store = PgContractStore::new(pool);

    let first = store.insert(owner, &draft("First")).await.unwrap();
    let second = store.insert(owner, &draft("Second")).await.unwrap();

    let ids: Vec<DbId> = store
        .list_all(owner)
        .await
        .unwrap()
        .iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_replaces_editable_fields(pool: PgPool) {
    let owner = user(&pool, "a@example.com").await;
    let store = PgContractStore::new(pool);
    let saved = store.insert(owner, &draft("Lease")).await.unwrap();

    let replacement = ContractDraft {
        title: "Lease (renewed)".into(),
        description: None,
        contract_value: None,
        tags: Vec::new(),
        file: None,
        status: ContractStatus::Pending,
        ..draft("ignored")
    };
    let updated = store
        .update(owner, saved.id, &replacement)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.draft(), replacement);
    assert_eq!(updated.created_at, saved.created_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_other_owner_cannot_see_or_modify(pool: PgPool) {
    let owner = user(&pool, "a@example.com").await;
    let intruder = user(&pool, "b@example.com").await;
    let store = PgContractStore::new(pool);
    let saved = store.insert(owner, &draft("Private")).await.unwrap();

    assert!(store.list_all(intruder).await.unwrap().is_empty());
    assert!(store.find(intruder, saved.id).await.unwrap().is_none());
    assert!(store
        .update(intruder, saved.id, &draft("Hijack"))
        .await
        .unwrap()
        .is_none());
    assert!(!store.delete(intruder, saved.id).await.unwrap());
    assert!(store.delete(owner, saved.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_title_violates_check(pool: PgPool) {
    let owner = user(&pool, "a@example.com").await;
    let store = PgContractStore::new(pool);

    let err = store.insert(owner, &draft("   ")).await.unwrap_err();
    assert_matches!(err, CoreError::Validation(msg) if msg.contains("contracts_title_check"));
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_template_crud(pool: PgPool) {
    let owner = user(&pool, "a@example.com").await;
    let store = PgTemplateStore::new(pool);

    let input = TemplateDraft {
        name: "NDA".into(),
        description: None,
        template_type: ContractType::Confidentiality,
        content: "Between {{party_a}} and {{party_b}}".into(),
        is_public: false,
    };
    let saved = store.insert(owner, &input).await.unwrap();
    assert_eq!(saved.variables, serde_json::json!({}));
    assert_eq!(saved.placeholders(), vec!["party_a", "party_b"]);

    let renamed = TemplateDraft {
        name: "Mutual NDA".into(),
        ..input
    };
    let updated = store.update(owner, saved.id, &renamed).await.unwrap().unwrap();
    assert_eq!(updated.name, "Mutual NDA");

    assert!(store.delete(owner, saved.id).await.unwrap());
    assert!(store.list_all(owner).await.unwrap().is_empty());
}
