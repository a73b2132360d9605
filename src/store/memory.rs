//! In-memory record store.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use crate::calculation::accrue;
use crate::models::{RecordId, VacationDraft, VacationRecord};

use super::{BulkInsert, RecordOrder, RecordStore, StoreError};

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Default)]
struct Inner {
    next_id: u64,
    records: BTreeMap<RecordId, VacationRecord>,
}

impl Inner {
    fn insert(&mut self, draft: VacationDraft, created_at: DateTime<Utc>) -> VacationRecord {
        self.next_id += 1;
        let id = RecordId(self.next_id);
        let record = VacationRecord::from_draft(id, draft, created_at);
        self.records.insert(id, record.clone());
        record
    }
}

/// A [`RecordStore`] kept in process memory.
///
/// Ids are assigned sequentially from 1. Every write takes the lock once, so
/// a bulk insert is visible as a whole to later readers.
pub struct InMemoryRecordStore {
    inner: RwLock<Inner>,
    clock: Clock,
}

impl fmt::Debug for InMemoryRecordStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.inner.read().map(|inner| inner.records.len()).ok();
        f.debug_struct("InMemoryRecordStore")
            .field("records", &len)
            .finish_non_exhaustive()
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRecordStore {
    /// Creates an empty store stamping records with the current time.
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    /// Creates an empty store stamping records with `clock`.
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use vacation_engine::store::InMemoryRecordStore;
    ///
    /// let store =
    ///     InMemoryRecordStore::with_clock(|| Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap());
    /// ```
    pub fn with_clock(clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            clock: Box::new(clock),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }

    fn sorted(inner: &Inner, order: RecordOrder) -> Vec<VacationRecord> {
        let mut records: Vec<VacationRecord> = inner.records.values().cloned().collect();
        match order {
            RecordOrder::NewestFirst => {
                records.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)))
            }
            RecordOrder::OldestFirst => {
                records.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)))
            }
        }
        records
    }
}

impl RecordStore for InMemoryRecordStore {
    fn create(&self, draft: VacationDraft) -> Result<VacationRecord, StoreError> {
        let mut inner = self.write()?;
        Ok(inner.insert(draft, (self.clock)()))
    }

    fn create_many(&self, drafts: Vec<VacationDraft>) -> BulkInsert {
        let mut inner = match self.write() {
            Ok(inner) => inner,
            Err(err) => {
                return BulkInsert {
                    created: Vec::new(),
                    failure: Some(err),
                };
            }
        };
        let created = drafts
            .into_iter()
            .map(|draft| inner.insert(draft, (self.clock)()))
            .collect();
        BulkInsert {
            created,
            failure: None,
        }
    }

    fn find_by_id(&self, id: RecordId) -> Result<Option<VacationRecord>, StoreError> {
        Ok(self.read()?.records.get(&id).cloned())
    }

    fn update(&self, id: RecordId, fields: VacationDraft) -> Result<usize, StoreError> {
        let mut inner = self.write()?;
        let Some(record) = inner.records.get_mut(&id) else {
            return Ok(0);
        };
        record.hr_representative = fields.hr_representative;
        record.employee_name = fields.employee_name;
        record.salary = fields.salary;
        record.absence_count = fields.absence_count;
        record.entitled_days = accrue(fields.absence_count);
        Ok(1)
    }

    fn delete_by_id(&self, id: RecordId) -> Result<usize, StoreError> {
        let mut inner = self.write()?;
        Ok(usize::from(inner.records.remove(&id).is_some()))
    }

    fn delete_many(&self, ids: &[RecordId]) -> Result<usize, StoreError> {
        let mut inner = self.write()?;
        let mut removed = 0;
        for id in ids {
            if inner.records.remove(id).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn find_page(
        &self,
        limit: usize,
        offset: usize,
        order: RecordOrder,
    ) -> Result<(Vec<VacationRecord>, usize), StoreError> {
        let inner = self.read()?;
        let total = inner.records.len();
        let page = Self::sorted(&inner, order)
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect();
        Ok((page, total))
    }

    fn find_all(&self, order: RecordOrder) -> Result<Vec<VacationRecord>, StoreError> {
        Ok(Self::sorted(&*self.read()?, order))
    }
}
