//! Record abstraction and the record store seam.
//!
//! A [`Record`] is one persisted, owner-scoped entity instance. The
//! [`RecordStore`] trait is the adapter between domain records and the
//! persisted rows of one collection; the PostgreSQL implementations live in
//! `pactum-db`.

use async_trait::async_trait;

use crate::attachment::FileRef;
use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// A persisted, owner-scoped entity.
pub trait Record: Clone + Send + Sync + 'static {
    /// The normalized set of editable fields written on insert/update.
    type Draft: Clone + std::fmt::Debug + Send + Sync + 'static;

    /// Human-readable entity name used in errors and notices.
    const ENTITY: &'static str;

    fn id(&self) -> DbId;

    fn created_at(&self) -> Timestamp;

    /// Stored file attached to this record, if the entity supports one.
    fn attachment(&self) -> Option<&FileRef> {
        None
    }
}

/// Fetch/insert/update/delete for one entity collection.
///
/// Every operation is scoped to `owner`; rows owned by another identity are
/// invisible. Operations are single shot: failures are returned once and the
/// caller decides whether to re-invoke.
#[async_trait]
pub trait RecordStore<R: Record>: Send + Sync {
    /// All records owned by `owner`, newest created first.
    async fn list_all(&self, owner: DbId) -> Result<Vec<R>, CoreError>;

    /// A single record, or `None` if it does not exist for this owner.
    async fn find(&self, owner: DbId, id: DbId) -> Result<Option<R>, CoreError>;

    /// Insert a new record stamped with `owner`.
    async fn insert(&self, owner: DbId, draft: &R::Draft) -> Result<R, CoreError>;

    /// Replace every editable field of record `id`.
    ///
    /// Returns `None` if no such record exists for this owner.
    async fn update(&self, owner: DbId, id: DbId, draft: &R::Draft)
        -> Result<Option<R>, CoreError>;

    /// Remove record `id`. Returns `true` if a row was removed.
    async fn delete(&self, owner: DbId, id: DbId) -> Result<bool, CoreError>;
}

/// Sort records newest created first, breaking ties by descending id.
pub fn sort_newest_first<R: Record>(records: &mut [R]) {
    records.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| b.id().cmp(&a.id()))
    });
}
