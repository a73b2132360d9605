//! The record store collaborator.
//!
//! The engine never owns persistence. It talks to whatever holds the roster
//! through the [`RecordStore`] trait; [`InMemoryRecordStore`] is the
//! implementation used by the server binary and the tests.

mod memory;

use thiserror::Error;

use crate::models::{RecordId, VacationDraft, VacationRecord};

pub use memory::InMemoryRecordStore;

/// Errors reported by a record store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store could not be reached or is in an unusable state.
    #[error("record store unavailable: {0}")]
    Unavailable(String),
    /// The store refused the operation.
    #[error("record store rejected the operation: {0}")]
    Rejected(String),
}

/// Ordering applied to roster queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordOrder {
    /// Most recently created first; ties broken by the higher id.
    #[default]
    NewestFirst,
    /// Oldest first; ties broken by the lower id.
    OldestFirst,
}

/// Outcome of a bulk insert.
///
/// `created` holds the records written, in draft order. When `failure` is
/// set, the drafts after `created.len()` were not written and the ones before
/// remain stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkInsert {
    /// Records created, in the order of the submitted drafts.
    pub created: Vec<VacationRecord>,
    /// The error that stopped the insert, if any.
    pub failure: Option<StoreError>,
}

/// Storage operations the engine relies on.
pub trait RecordStore: Send + Sync {
    /// Stores a draft, assigning its id and creation timestamp.
    fn create(&self, draft: VacationDraft) -> Result<VacationRecord, StoreError>;

    /// Stores drafts in order, stopping at the first failure.
    ///
    /// Implementations that can write a batch at once should override this,
    /// keeping the ordering and stop-at-first-failure behaviour.
    fn create_many(&self, drafts: Vec<VacationDraft>) -> BulkInsert {
        let mut created = Vec::with_capacity(drafts.len());
        for draft in drafts {
            match self.create(draft) {
                Ok(record) => created.push(record),
                Err(err) => {
                    return BulkInsert {
                        created,
                        failure: Some(err),
                    };
                }
            }
        }
        BulkInsert {
            created,
            failure: None,
        }
    }

    /// Looks up one record.
    fn find_by_id(&self, id: RecordId) -> Result<Option<VacationRecord>, StoreError>;

    /// Overwrites the editable fields of a record, returning how many records changed.
    fn update(&self, id: RecordId, fields: VacationDraft) -> Result<usize, StoreError>;

    /// Deletes one record, returning how many records were removed.
    fn delete_by_id(&self, id: RecordId) -> Result<usize, StoreError>;

    /// Deletes every listed record, returning how many records were removed.
    fn delete_many(&self, ids: &[RecordId]) -> Result<usize, StoreError>;

    /// Returns one window of the roster along with the total record count.
    fn find_page(
        &self,
        limit: usize,
        offset: usize,
        order: RecordOrder,
    ) -> Result<(Vec<VacationRecord>, usize), StoreError>;

    /// Returns the whole roster.
    fn find_all(&self, order: RecordOrder) -> Result<Vec<VacationRecord>, StoreError>;
}
