//! Create/edit form controller.
//!
//! A [`FormController`] is opened in either create or edit mode. Edit mode
//! seeds the fields from a stored record; create mode resets them to the
//! schema defaults. Submission validates first (no store call on failure),
//! uploads a newly selected file, then inserts or updates.

use std::marker::PhantomData;

use crate::attachment::{AttachmentManager, FileRef, Upload};
use crate::contract::{format_value, join_tags, Contract, ContractDraft};
use crate::error::CoreError;
use crate::record::{Record, RecordStore};
use crate::template::Template;
use crate::types::DbId;
use crate::validation::{
    validate_contract, validate_template, ContractForm, FieldErrors, TemplateForm,
};

/// Binds a raw form type to a record type.
pub trait FormSchema: Send + Sync + 'static {
    type Record: Record;
    type Input: Clone + std::fmt::Debug + Send + Sync;

    /// Whether the record type carries a file attachment.
    const ACCEPTS_ATTACHMENT: bool = false;

    /// Field values for create mode.
    fn defaults() -> Self::Input;

    /// Field values seeded from a stored record (edit mode).
    fn seed(record: &Self::Record) -> Self::Input;

    fn validate(input: &Self::Input) -> Result<<Self::Record as Record>::Draft, FieldErrors>;

    /// Set the draft's file reference. Ignored by schemas without attachments.
    fn attach(_draft: &mut <Self::Record as Record>::Draft, _file: Option<FileRef>) {}
}

/// Contract form schema.
#[derive(Debug)]
pub struct ContractSchema;

impl FormSchema for ContractSchema {
    type Record = Contract;
    type Input = ContractForm;

    const ACCEPTS_ATTACHMENT: bool = true;

    fn defaults() -> ContractForm {
        ContractForm::default()
    }

    fn seed(record: &Contract) -> ContractForm {
        ContractForm {
            title: record.title.clone(),
            description: record.description.clone().unwrap_or_default(),
            contract_type: record.contract_type,
            client_name: record.client_name.clone(),
            client_email: record.client_email.clone().unwrap_or_default(),
            contract_value: format_value(record.contract_value),
            start_date: record.start_date,
            end_date: record.end_date,
            status: record.status,
            tags: join_tags(&record.tags),
        }
    }

    fn validate(input: &ContractForm) -> Result<ContractDraft, FieldErrors> {
        validate_contract(input)
    }

    fn attach(draft: &mut ContractDraft, file: Option<FileRef>) {
        draft.file = file;
    }
}

/// Template form schema.
#[derive(Debug)]
pub struct TemplateSchema;

impl FormSchema for TemplateSchema {
    type Record = Template;
    type Input = TemplateForm;

    fn defaults() -> TemplateForm {
        TemplateForm::default()
    }

    fn seed(record: &Template) -> TemplateForm {
        TemplateForm {
            name: record.name.clone(),
            description: record.description.clone().unwrap_or_default(),
            template_type: record.template_type,
            content: record.content.clone(),
            is_public: record.is_public,
        }
    }

    fn validate(input: &TemplateForm) -> Result<crate::template::TemplateDraft, FieldErrors> {
        validate_template(input)
    }
}

/// Which write a submit performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// Editing record `id`; `file` is its current attachment.
    Edit { id: DbId, file: Option<FileRef> },
}

/// Collaborators a submit needs.
pub struct SubmitContext<'a, R: Record> {
    pub owner: DbId,
    pub store: &'a dyn RecordStore<R>,
    pub attachments: Option<&'a AttachmentManager>,
}

/// Form state: open/closed, mode, field values and field errors.
#[derive(Debug)]
pub struct FormController<S: FormSchema> {
    open: bool,
    mode: FormMode,
    values: S::Input,
    errors: FieldErrors,
    _schema: PhantomData<S>,
}

impl<S: FormSchema> Default for FormController<S> {
    fn default() -> Self {
        Self {
            open: false,
            mode: FormMode::Create,
            values: S::defaults(),
            errors: FieldErrors::new(),
            _schema: PhantomData,
        }
    }
}

impl<S: FormSchema> FormController<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open in create mode with default values.
    pub fn open_create(&mut self) {
        self.open = true;
        self.mode = FormMode::Create;
        self.values = S::defaults();
        self.errors.clear();
    }

    /// Open in edit mode seeded from `record`.
    pub fn open_edit(&mut self, record: &S::Record) {
        self.open = true;
        self.mode = FormMode::Edit {
            id: record.id(),
            file: record.attachment().cloned(),
        };
        self.values = S::seed(record);
        self.errors.clear();
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn values(&self) -> &S::Input {
        &self.values
    }

    /// Replace the field values (the user's edits).
    pub fn set_values(&mut self, values: S::Input) {
        self.values = values;
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Run the schema, recording field errors on failure.
    pub fn validate(&mut self) -> Result<<S::Record as Record>::Draft, CoreError> {
        match S::validate(&self.values) {
            Ok(draft) => {
                self.errors.clear();
                Ok(draft)
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(CoreError::InvalidFields(errors))
            }
        }
    }

    /// Validate, upload `upload` if given, then insert or update.
    ///
    /// On success the form closes. On any failure the form stays open with
    /// its values intact. A failed upload means no write is attempted; a
    /// failed write removes the just-uploaded object (best effort).
    pub async fn submit(
        &mut self,
        ctx: &SubmitContext<'_, S::Record>,
        upload: Option<Upload>,
    ) -> Result<S::Record, CoreError> {
        if !self.open {
            return Err(CoreError::Validation("Form is not open".into()));
        }

        let mut draft = self.validate()?;

        let existing = match &self.mode {
            FormMode::Create => None,
            FormMode::Edit { file, .. } => file.clone(),
        };

        let fresh = match upload {
            Some(upload) => {
                if !S::ACCEPTS_ATTACHMENT {
                    return Err(CoreError::Validation(format!(
                        "{} records do not accept file attachments",
                        <S::Record as Record>::ENTITY
                    )));
                }
                let attachments = ctx.attachments.ok_or_else(|| {
                    CoreError::Internal("No attachment store configured".into())
                })?;
                Some(attachments.upload(ctx.owner, upload).await?)
            }
            None => None,
        };
        let fresh_locator = fresh.as_ref().map(|f| f.locator.clone());
        S::attach(&mut draft, fresh.or(existing));

        let record = match self.write(ctx, &draft).await {
            Ok(record) => record,
            Err(e) => {
                if let (Some(locator), Some(attachments)) = (fresh_locator, ctx.attachments) {
                    if let Err(cleanup) = attachments.remove(&locator).await {
                        tracing::warn!(
                            %locator,
                            error = %cleanup,
                            "Could not remove upload after failed write",
                        );
                    }
                }
                return Err(e);
            }
        };

        self.close();
        Ok(record)
    }

    async fn write(
        &self,
        ctx: &SubmitContext<'_, S::Record>,
        draft: &<S::Record as Record>::Draft,
    ) -> Result<S::Record, CoreError> {
        match &self.mode {
            FormMode::Create => ctx.store.insert(ctx.owner, draft).await,
            FormMode::Edit { id, .. } => {
                ctx.store
                    .update(ctx.owner, *id, draft)
                    .await?
                    .ok_or(CoreError::NotFound {
                        entity: <S::Record as Record>::ENTITY,
                        id: *id,
                    })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;

    use super::*;
    use crate::contract::{ContractStatus, ContractType};
    use crate::testing::{contract, MemoryObjectStore, MemoryStore};
    use crate::types::Date;

    fn upload(name: &str) -> Upload {
        Upload {
            file_name: name.into(),
            content_type: Some("application/pdf".into()),
            bytes: b"%PDF-1.7".to_vec(),
        }
    }

    fn attachments(store: Arc<MemoryObjectStore>) -> AttachmentManager {
        AttachmentManager::new(store, "http://files.test")
    }

    fn stored_contract() -> Contract {
        let mut c = contract(5, "Office lease", ContractStatus::Active);
        c.description = Some("Two floors".into());
        c.contract_type = ContractType::Partnership;
        c.client_email = Some("legal@acme.com".into());
        c.contract_value = Some(4200.5);
        c.start_date = Date::from_ymd_opt(2025, 1, 1);
        c.end_date = Date::from_ymd_opt(2025, 12, 31);
        c.tags = vec!["lease".into(), "hq".into()];
        c.file = Some(FileRef {
            locator: "1/1_0000_lease.pdf".into(),
            file_name: "lease.pdf".into(),
        });
        c
    }

    #[test]
    fn create_mode_uses_defaults() {
        let mut form = FormController::<ContractSchema>::new();
        form.open_create();
        let values = form.values();
        assert_eq!(values.status, ContractStatus::Draft);
        assert_eq!(values.contract_type, ContractType::Service);
        assert_eq!(values.contract_value, "0");
        assert!(values.title.is_empty());
        assert_eq!(form.mode(), &FormMode::Create);
    }

    #[test]
    fn edit_mode_seeds_from_record() {
        let record = stored_contract();
        let mut form = FormController::<ContractSchema>::new();
        form.open_edit(&record);

        assert_eq!(form.values().tags, "lease, hq");
        assert_eq!(form.values().contract_value, "4200.5");
        assert_eq!(form.values().start_date, record.start_date);
        assert_matches!(form.mode(), FormMode::Edit { id: 5, file: Some(_) });
    }

    #[test]
    fn seeding_then_validating_is_idempotent() {
        let record = stored_contract();
        let mut form = FormController::<ContractSchema>::new();
        form.open_edit(&record);

        let mut draft = form.validate().unwrap();
        ContractSchema::attach(&mut draft, record.file.clone());
        assert_eq!(draft, record.draft());
    }

    #[test]
    fn reopening_in_create_mode_clears_seeded_values() {
        let mut form = FormController::<ContractSchema>::new();
        form.open_edit(&stored_contract());
        form.open_create();
        assert!(form.values().title.is_empty());
        assert_eq!(form.mode(), &FormMode::Create);
    }

    #[tokio::test]
    async fn unchanged_edit_writes_original_fields() {
        let record = stored_contract();
        let store = MemoryStore::<Contract>::with_records(vec![record.clone()]);
        let ctx = SubmitContext {
            owner: record.user_id,
            store: &store,
            attachments: None,
        };

        let mut form = FormController::<ContractSchema>::new();
        form.open_edit(&record);
        let saved = form.submit(&ctx, None).await.unwrap();

        assert_eq!(saved.draft(), record.draft());
        assert_eq!(store.last_written(), Some(record.draft()));
        assert!(!form.is_open());
    }

    #[tokio::test]
    async fn empty_title_blocks_submit_without_store_call() {
        let store = MemoryStore::<Contract>::default();
        let ctx = SubmitContext {
            owner: 1,
            store: &store,
            attachments: None,
        };

        let mut form = FormController::<ContractSchema>::new();
        form.open_create();
        form.set_values(ContractForm {
            title: String::new(),
            client_name: "ACME".into(),
            ..ContractForm::default()
        });

        let err = form.submit(&ctx, None).await.unwrap_err();
        assert_matches!(err, CoreError::InvalidFields(ref fields) if fields.contains("title"));
        assert!(form.errors().contains("title"));
        assert!(form.is_open());
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn create_with_file_uploads_before_insert() {
        let store = MemoryStore::<Contract>::default();
        let objects = Arc::new(MemoryObjectStore::default());
        let attachments = attachments(objects.clone());
        let ctx = SubmitContext {
            owner: 9,
            store: &store,
            attachments: Some(&attachments),
        };

        let mut form = FormController::<ContractSchema>::new();
        form.open_create();
        form.set_values(ContractForm {
            title: "Supply".into(),
            client_name: "Globex".into(),
            ..ContractForm::default()
        });

        let saved = form.submit(&ctx, Some(upload("supply.pdf"))).await.unwrap();
        let file = saved.file.expect("file reference stored");
        assert_eq!(file.file_name, "supply.pdf");
        assert!(file.locator.starts_with("9/"));
        assert!(objects.get(&file.locator).is_some());
    }

    #[tokio::test]
    async fn failed_upload_skips_update_and_keeps_prior_file() {
        let record = stored_contract();
        let store = MemoryStore::<Contract>::with_records(vec![record.clone()]);
        let objects = Arc::new(MemoryObjectStore::failing_puts());
        let attachments = attachments(objects);
        let ctx = SubmitContext {
            owner: record.user_id,
            store: &store,
            attachments: Some(&attachments),
        };

        let mut form = FormController::<ContractSchema>::new();
        form.open_edit(&record);
        let err = form.submit(&ctx, Some(upload("new.pdf"))).await.unwrap_err();

        assert_matches!(err, CoreError::Storage(_));
        assert_eq!(store.call_count(), 0, "update must not be attempted");
        let stored = store.snapshot();
        assert_eq!(stored[0].file, record.file);
        assert!(form.is_open());
        assert_eq!(form.values().title, record.title);
    }

    #[tokio::test]
    async fn failed_insert_removes_fresh_upload() {
        let store = MemoryStore::<Contract>::default();
        store.fail_with("connection reset");
        let objects = Arc::new(MemoryObjectStore::default());
        let attachments = attachments(objects.clone());
        let ctx = SubmitContext {
            owner: 9,
            store: &store,
            attachments: Some(&attachments),
        };

        let mut form = FormController::<ContractSchema>::new();
        form.open_create();
        form.set_values(ContractForm {
            title: "Supply".into(),
            client_name: "Globex".into(),
            ..ContractForm::default()
        });

        let err = form.submit(&ctx, Some(upload("supply.pdf"))).await.unwrap_err();
        assert_matches!(err, CoreError::Gateway(_));

        let removed = objects.removed();
        assert_eq!(removed.len(), 1);
        assert!(removed[0].starts_with("9/") && removed[0].ends_with("_supply.pdf"));
        assert!(objects.get(&removed[0]).is_none());
        assert!(form.is_open());
    }

    #[tokio::test]
    async fn edit_of_missing_record_is_not_found() {
        let record = stored_contract();
        let store = MemoryStore::<Contract>::default();
        let ctx = SubmitContext {
            owner: record.user_id,
            store: &store,
            attachments: None,
        };

        let mut form = FormController::<ContractSchema>::new();
        form.open_edit(&record);
        let err = form.submit(&ctx, None).await.unwrap_err();
        assert_matches!(err, CoreError::NotFound { entity: "Contract", id: 5 });
        assert!(form.is_open());
    }

    #[tokio::test]
    async fn templates_reject_attachments() {
        let store = MemoryStore::<Template>::default();
        let ctx = SubmitContext {
            owner: 1,
            store: &store,
            attachments: None,
        };

        let mut form = FormController::<TemplateSchema>::new();
        form.open_create();
        form.set_values(TemplateForm {
            name: "NDA".into(),
            content: "{{party}}".into(),
            ..TemplateForm::default()
        });

        let err = form.submit(&ctx, Some(upload("x.pdf"))).await.unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn closed_form_cannot_submit() {
        let store = MemoryStore::<Template>::default();
        let ctx = SubmitContext {
            owner: 1,
            store: &store,
            attachments: None,
        };
        let mut form = FormController::<TemplateSchema>::new();
        assert!(form.submit(&ctx, None).await.is_err());
    }
}
