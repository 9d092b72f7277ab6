//! In-memory fakes shared by the unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};

use crate::attachment::AttachmentStore;
use crate::contract::{Contract, ContractDraft, ContractStatus, ContractType};
use crate::error::CoreError;
use crate::record::{sort_newest_first, Record, RecordStore};
use crate::report::{Phase, Reporter};
use crate::template::{Template, TemplateDraft};
use crate::types::{DbId, Timestamp};

/// Ordered record of calls shared between fakes, e.g. `"store.delete"`.
pub type CallLog = Arc<Mutex<Vec<String>>>;

fn log_call(log: &Option<CallLog>, call: String) {
    if let Some(log) = log {
        log.lock().unwrap().push(call);
    }
}

/// Deterministic creation time: later ids are newer.
pub fn created(id: DbId) -> Timestamp {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(id)
}

pub fn contract(id: DbId, title: &str, status: ContractStatus) -> Contract {
    Contract {
        id,
        user_id: 1,
        title: title.into(),
        description: None,
        contract_type: ContractType::Service,
        client_name: "Client".into(),
        client_email: None,
        contract_value: None,
        start_date: None,
        end_date: None,
        status,
        tags: Vec::new(),
        file: None,
        created_at: created(id),
        updated_at: created(id),
    }
}

/// A record the fake store can materialize from a draft.
pub trait FakeRecord: Record {
    fn build(id: DbId, owner: DbId, draft: &Self::Draft, created_at: Timestamp) -> Self;
    fn owner(&self) -> DbId;
}

impl FakeRecord for Contract {
    fn build(id: DbId, owner: DbId, d: &ContractDraft, created_at: Timestamp) -> Self {
        Contract {
            id,
            user_id: owner,
            title: d.title.clone(),
            description: d.description.clone(),
            contract_type: d.contract_type,
            client_name: d.client_name.clone(),
            client_email: d.client_email.clone(),
            contract_value: d.contract_value,
            start_date: d.start_date,
            end_date: d.end_date,
            status: d.status,
            tags: d.tags.clone(),
            file: d.file.clone(),
            created_at,
            updated_at: created_at,
        }
    }

    fn owner(&self) -> DbId {
        self.user_id
    }
}

impl FakeRecord for Template {
    fn build(id: DbId, owner: DbId, d: &TemplateDraft, created_at: Timestamp) -> Self {
        Template {
            id,
            user_id: owner,
            name: d.name.clone(),
            description: d.description.clone(),
            template_type: d.template_type,
            content: d.content.clone(),
            variables: serde_json::json!({}),
            is_public: d.is_public,
            created_at,
            updated_at: created_at,
        }
    }

    fn owner(&self) -> DbId {
        self.user_id
    }
}

struct StoreState<R: Record> {
    rows: Vec<R>,
    calls: usize,
    last_written: Option<R::Draft>,
    fail_with: Option<String>,
    log: Option<CallLog>,
}

/// Owner-scoped in-memory record store that counts every call.
pub struct MemoryStore<R: Record> {
    state: Mutex<StoreState<R>>,
}

impl<R: FakeRecord> Default for MemoryStore<R> {
    fn default() -> Self {
        Self {
            state: Mutex::new(StoreState {
                rows: Vec::new(),
                calls: 0,
                last_written: None,
                fail_with: None,
                log: None,
            }),
        }
    }
}

impl<R: FakeRecord> MemoryStore<R> {
    pub fn with_records(rows: Vec<R>) -> Self {
        let store = Self::default();
        store.state.lock().unwrap().rows = rows;
        store
    }

    /// Append every subsequent call to `log`.
    pub fn log_calls_into(&self, log: CallLog) {
        self.state.lock().unwrap().log = Some(log);
    }

    /// Make every subsequent call fail with a gateway error.
    pub fn fail_with(&self, message: &str) {
        self.state.lock().unwrap().fail_with = Some(message.to_string());
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls
    }

    pub fn last_written(&self) -> Option<R::Draft> {
        self.state.lock().unwrap().last_written.clone()
    }

    /// Stored rows without counting a call.
    pub fn snapshot(&self) -> Vec<R> {
        self.state.lock().unwrap().rows.clone()
    }

    fn enter(&self, op: &str) -> Result<std::sync::MutexGuard<'_, StoreState<R>>, CoreError> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        log_call(&state.log, format!("store.{op}"));
        match &state.fail_with {
            Some(message) => Err(CoreError::Gateway(message.clone())),
            None => Ok(state),
        }
    }
}

#[async_trait]
impl<R: FakeRecord> RecordStore<R> for MemoryStore<R> {
    async fn list_all(&self, owner: DbId) -> Result<Vec<R>, CoreError> {
        let state = self.enter("list_all")?;
        let mut rows: Vec<R> = state
            .rows
            .iter()
            .filter(|r| r.owner() == owner)
            .cloned()
            .collect();
        sort_newest_first(&mut rows);
        Ok(rows)
    }

    async fn find(&self, owner: DbId, id: DbId) -> Result<Option<R>, CoreError> {
        let state = self.enter("find")?;
        Ok(state
            .rows
            .iter()
            .find(|r| r.id() == id && r.owner() == owner)
            .cloned())
    }

    async fn insert(&self, owner: DbId, draft: &R::Draft) -> Result<R, CoreError> {
        let mut state = self.enter("insert")?;
        let id = state.rows.iter().map(Record::id).max().unwrap_or(0) + 1;
        let record = R::build(id, owner, draft, created(id));
        state.rows.push(record.clone());
        state.last_written = Some(draft.clone());
        Ok(record)
    }

    async fn update(
        &self,
        owner: DbId,
        id: DbId,
        draft: &R::Draft,
    ) -> Result<Option<R>, CoreError> {
        let mut state = self.enter("update")?;
        let Some(pos) = state
            .rows
            .iter()
            .position(|r| r.id() == id && r.owner() == owner)
        else {
            return Ok(None);
        };
        let created_at = state.rows[pos].created_at();
        let record = R::build(id, owner, draft, created_at);
        state.rows[pos] = record.clone();
        state.last_written = Some(draft.clone());
        Ok(Some(record))
    }

    async fn delete(&self, owner: DbId, id: DbId) -> Result<bool, CoreError> {
        let mut state = self.enter("delete")?;
        let before = state.rows.len();
        state.rows.retain(|r| !(r.id() == id && r.owner() == owner));
        Ok(state.rows.len() < before)
    }
}

/// In-memory object store with switchable failures.
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    removed: Mutex<Vec<String>>,
    fail_puts: bool,
    fail_removes: bool,
    log: Mutex<Option<CallLog>>,
}

impl MemoryObjectStore {
    pub fn failing_puts() -> Self {
        Self {
            fail_puts: true,
            ..Self::default()
        }
    }

    pub fn failing_removes() -> Self {
        Self {
            fail_removes: true,
            ..Self::default()
        }
    }

    pub fn log_calls_into(&self, log: CallLog) {
        *self.log.lock().unwrap() = Some(log);
    }

    pub fn get(&self, locator: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(locator).cloned()
    }

    /// Locators passed to `remove`, including failed attempts.
    pub fn removed(&self) -> Vec<String> {
        self.removed.lock().unwrap().clone()
    }
}

#[async_trait]
impl AttachmentStore for MemoryObjectStore {
    async fn put(
        &self,
        locator: &str,
        bytes: Vec<u8>,
        _content_type: Option<&str>,
    ) -> Result<(), CoreError> {
        log_call(&self.log.lock().unwrap(), format!("objects.put {locator}"));
        if self.fail_puts {
            return Err(CoreError::Storage("bucket unavailable".into()));
        }
        self.objects
            .lock()
            .unwrap()
            .insert(locator.to_string(), bytes);
        Ok(())
    }

    async fn remove(&self, locator: &str) -> Result<(), CoreError> {
        log_call(&self.log.lock().unwrap(), format!("objects.remove {locator}"));
        self.removed.lock().unwrap().push(locator.to_string());
        if self.fail_removes {
            return Err(CoreError::Storage("object locked".into()));
        }
        self.objects.lock().unwrap().remove(locator);
        Ok(())
    }
}

/// Collects reported phases for assertions.
#[derive(Default)]
pub struct RecordingReporter {
    phases: Mutex<Vec<(String, Phase)>>,
}

impl RecordingReporter {
    pub fn phases(&self) -> Vec<(String, Phase)> {
        self.phases.lock().unwrap().clone()
    }

    pub fn failures(&self) -> Vec<String> {
        self.phases()
            .into_iter()
            .filter_map(|(_, p)| match p {
                Phase::Failure(msg) => Some(msg),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, label: &str, phase: Phase) {
        self.phases
            .lock()
            .unwrap()
            .push((label.to_string(), phase));
    }
}
