//! Generic record manager.
//!
//! Ties a [`ListController`], a [`FormController`], a record store, an
//! optional attachment manager and a reporter into the full record
//! workflow: load, filter, create/edit with an optional file, and delete
//! with confirmation. Every successful write is followed by a full refresh.

use std::sync::Arc;

use crate::attachment::{AttachmentManager, FileRef, Upload};
use crate::error::CoreError;
use crate::form::{FormController, FormMode, FormSchema, SubmitContext};
use crate::listing::{Filterable, ListController};
use crate::record::{Record, RecordStore};
use crate::report::{track, Phase, Reporter};
use crate::types::DbId;

/// Label under which attachment cleanup failures are reported.
const CLEANUP_LABEL: &str = "Removing attachment";

pub struct RecordManager<S>
where
    S: FormSchema,
    S::Record: Filterable,
{
    owner: DbId,
    store: Arc<dyn RecordStore<S::Record>>,
    attachments: Option<Arc<AttachmentManager>>,
    reporter: Arc<dyn Reporter>,
    list: ListController<S::Record>,
    form: FormController<S>,
    pending_delete: Option<S::Record>,
}

impl<S> RecordManager<S>
where
    S: FormSchema,
    S::Record: Filterable,
{
    pub fn new(
        owner: DbId,
        store: Arc<dyn RecordStore<S::Record>>,
        attachments: Option<Arc<AttachmentManager>>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            owner,
            store,
            attachments,
            reporter,
            list: ListController::new(),
            form: FormController::new(),
            pending_delete: None,
        }
    }

    pub fn list(&self) -> &ListController<S::Record> {
        &self.list
    }

    /// Mutable access for search/filter changes.
    pub fn list_mut(&mut self) -> &mut ListController<S::Record> {
        &mut self.list
    }

    pub fn form(&self) -> &FormController<S> {
        &self.form
    }

    /// Mutable access for field edits.
    pub fn form_mut(&mut self) -> &mut FormController<S> {
        &mut self.form
    }

    /// Reload the full collection from the store.
    ///
    /// On failure the previous collection is kept and the failure reported.
    pub async fn refresh(&mut self) -> Result<(), CoreError> {
        let ticket = self.list.begin_load();
        let label = format!("Loading {} records", <S::Record as Record>::ENTITY);

        let result = track(
            self.reporter.as_ref(),
            &label,
            self.store.list_all(self.owner),
        )
        .await;

        match result {
            Ok(items) => {
                self.list.finish_load(ticket, items);
                Ok(())
            }
            Err(e) => {
                self.list.fail_load(ticket);
                Err(e)
            }
        }
    }

    pub fn open_create(&mut self) {
        self.form.open_create();
    }

    pub fn open_edit(&mut self, record: &S::Record) {
        self.form.open_edit(record);
    }

    /// Submit the open form, then refresh on success.
    ///
    /// Schema failures stay on the form as field errors and are not
    /// reported as notices. An edit that replaces the attachment removes the
    /// superseded object once the row is saved (best effort).
    pub async fn submit(&mut self, upload: Option<Upload>) -> Result<S::Record, CoreError> {
        self.form.validate()?;

        let (label, previous) = match self.form.mode() {
            FormMode::Create => (format!("Creating {}", <S::Record as Record>::ENTITY), None),
            FormMode::Edit { file, .. } => (
                format!("Updating {}", <S::Record as Record>::ENTITY),
                file.clone(),
            ),
        };
        let ctx = SubmitContext {
            owner: self.owner,
            store: self.store.as_ref(),
            attachments: self.attachments.as_deref(),
        };

        let record = track(self.reporter.as_ref(), &label, self.form.submit(&ctx, upload)).await?;

        if let Some(old) = previous {
            if record.attachment().map(|f| &f.locator) != Some(&old.locator) {
                discard_attachment(
                    self.attachments.as_deref(),
                    self.reporter.as_ref(),
                    &record,
                    &old,
                )
                .await;
            }
        }

        if let Err(e) = self.refresh().await {
            tracing::warn!(error = %e, "Refresh after save failed");
        }
        Ok(record)
    }

    /// Stage `record` for deletion pending confirmation.
    pub fn request_delete(&mut self, record: S::Record) {
        self.pending_delete = Some(record);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn pending_delete(&self) -> Option<&S::Record> {
        self.pending_delete.as_ref()
    }

    /// Delete the staged record. Returns `false` if nothing was staged.
    pub async fn confirm_delete(&mut self) -> Result<bool, CoreError> {
        let Some(record) = self.pending_delete.take() else {
            return Ok(false);
        };
        self.delete(&record).await?;
        Ok(true)
    }

    /// Delete `record` (and its stored file), then refresh.
    pub async fn delete(&mut self, record: &S::Record) -> Result<(), CoreError> {
        let label = format!("Deleting {}", <S::Record as Record>::ENTITY);
        track(
            self.reporter.as_ref(),
            &label,
            delete_record(
                self.owner,
                self.store.as_ref(),
                self.attachments.as_deref(),
                self.reporter.as_ref(),
                record,
            ),
        )
        .await?;

        if let Err(e) = self.refresh().await {
            tracing::warn!(error = %e, "Refresh after delete failed");
        }
        Ok(())
    }
}

/// Remove `record`'s stored file (best effort), then its row.
///
/// A cleanup failure is logged and reported under "Removing attachment" but
/// does not stop the row deletion. Records without a file never touch the
/// object store.
pub async fn delete_record<R: Record>(
    owner: DbId,
    store: &dyn RecordStore<R>,
    attachments: Option<&AttachmentManager>,
    reporter: &dyn Reporter,
    record: &R,
) -> Result<(), CoreError> {
    if let Some(file) = record.attachment() {
        discard_attachment(attachments, reporter, record, file).await;
    }

    if store.delete(owner, record.id()).await? {
        Ok(())
    } else {
        Err(CoreError::NotFound {
            entity: R::ENTITY,
            id: record.id(),
        })
    }
}

/// Remove `file` (which belonged to `record`), logging and reporting a
/// failure under "Removing attachment" instead of returning it.
async fn discard_attachment<R: Record>(
    attachments: Option<&AttachmentManager>,
    reporter: &dyn Reporter,
    record: &R,
    file: &FileRef,
) {
    let cleanup = match attachments {
        Some(attachments) => attachments.remove(&file.locator).await,
        None => Err(CoreError::Internal("No attachment store configured".into())),
    };
    if let Err(e) = cleanup {
        tracing::warn!(
            entity = R::ENTITY,
            id = record.id(),
            locator = %file.locator,
            error = %e,
            "Attachment cleanup failed",
        );
        reporter.report(CLEANUP_LABEL, Phase::Failure(e.to_string()));
    }
}
