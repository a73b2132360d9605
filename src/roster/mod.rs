//! Record-level roster operations.
//!
//! [`RosterService`] sits between callers and the record store for single
//! record work: validated registration and edits, lookups, deletions, and
//! the paginated listing with recomputed entitlements.

mod validation;

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::{Page, PageWindow, RecordId, RosterRow, VacationRecord, total_pages};
use crate::store::{RecordOrder, RecordStore};

pub use validation::RecordInput;

/// Roster operations over a shared record store.
#[derive(Clone)]
pub struct RosterService {
    store: Arc<dyn RecordStore>,
    page_size: usize,
}

impl RosterService {
    /// Creates a service listing `page_size` records per page.
    pub fn new(store: Arc<dyn RecordStore>, page_size: usize) -> Self {
        Self { store, page_size }
    }

    /// Validates `input` and stores it as a new record.
    pub fn register(&self, input: RecordInput) -> EngineResult<VacationRecord> {
        let draft = input.into_draft()?;
        let record = self.store.create(draft)?;
        info!(
            record_id = %record.id,
            entitled_days = record.entitled_days,
            "Vacation record registered"
        );
        Ok(record)
    }

    /// Returns the record with the given id.
    pub fn find(&self, id: RecordId) -> EngineResult<VacationRecord> {
        self.store
            .find_by_id(id)?
            .ok_or(EngineError::RecordNotFound { id })
    }

    /// Validates `input` and overwrites the editable fields of a record.
    ///
    /// The entitled days are derived again from the new absence count; the
    /// creation timestamp is left untouched.
    pub fn update(&self, id: RecordId, input: RecordInput) -> EngineResult<VacationRecord> {
        let draft = input.into_draft()?;
        if self.store.update(id, draft)? == 0 {
            return Err(EngineError::RecordNotFound { id });
        }
        info!(record_id = %id, "Vacation record updated");
        self.find(id)
    }

    /// Deletes one record. Deleting an absent record is not an error.
    pub fn delete(&self, id: RecordId) -> EngineResult<usize> {
        let removed = self.store.delete_by_id(id)?;
        info!(record_id = %id, removed, "Vacation record deleted");
        Ok(removed)
    }

    /// Deletes every listed record.
    pub fn delete_many(&self, ids: &[RecordId]) -> EngineResult<usize> {
        if ids.is_empty() {
            return Err(EngineError::validation("ids", "at least one id is required"));
        }
        let removed = self.store.delete_many(ids)?;
        info!(requested = ids.len(), removed, "Vacation records deleted");
        Ok(removed)
    }

    /// Returns one page of the roster, newest first.
    ///
    /// Page numbers below 1 are served as page 1.
    pub fn list_page(&self, page: i64) -> EngineResult<Page<RosterRow>> {
        let window = PageWindow::new(page, self.page_size);
        let (records, total_count) =
            self.store
                .find_page(window.limit, window.offset, RecordOrder::NewestFirst)?;
        debug!(
            page = window.page,
            returned = records.len(),
            total_count,
            "Roster page loaded"
        );
        let items = records
            .iter()
            .map(RosterRow::try_from)
            .collect::<EngineResult<Vec<_>>>()?;
        Ok(Page {
            items,
            current_page: window.page,
            total_pages: total_pages(total_count, self.page_size),
            total_count,
        })
    }
}
