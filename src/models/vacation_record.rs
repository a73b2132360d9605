//! Vacation record model and related types.
//!
//! This module defines the record held by the record store, the draft the
//! engine hands to the store for creation, and the record identifier.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{Entitlement, accrue};
use crate::error::EngineResult;

/// Display format for creation timestamps (`DD/MM/YYYY HH:mm:ss`).
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Opaque identifier assigned by the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A record that has not been stored yet.
///
/// Drafts carry no identifier and no creation timestamp; the store assigns
/// both on creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationDraft {
    /// The HR representative responsible for the record.
    pub hr_representative: String,
    /// The employee the vacation belongs to.
    pub employee_name: String,
    /// Monthly salary, always positive.
    pub salary: Decimal,
    /// Unjustified absences in the accrual period.
    pub absence_count: u32,
    /// Entitled vacation days as derived by [`VacationDraft::new`].
    ///
    /// Stores re-derive this from `absence_count` when writing, so a draft
    /// built by hand cannot store a mismatched value.
    pub entitled_days: u32,
}

impl VacationDraft {
    /// Builds a draft, deriving `entitled_days` from `absence_count`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vacation_engine::models::VacationDraft;
    /// use rust_decimal::Decimal;
    ///
    /// let draft = VacationDraft::new("Ana", "Bruno", Decimal::from(3000), 10);
    /// assert_eq!(draft.entitled_days, 24);
    /// ```
    pub fn new(
        hr_representative: impl Into<String>,
        employee_name: impl Into<String>,
        salary: Decimal,
        absence_count: u32,
    ) -> Self {
        Self {
            hr_representative: hr_representative.into(),
            employee_name: employee_name.into(),
            salary,
            absence_count,
            entitled_days: accrue(absence_count),
        }
    }
}

/// A vacation record as held by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationRecord {
    /// Identifier assigned by the store.
    pub id: RecordId,
    /// The HR representative responsible for the record.
    pub hr_representative: String,
    /// The employee the vacation belongs to.
    pub employee_name: String,
    /// Monthly salary, always positive.
    pub salary: Decimal,
    /// Unjustified absences in the accrual period.
    pub absence_count: u32,
    /// Entitled vacation days as last written by the engine.
    ///
    /// Read paths use [`VacationRecord::entitlement`] instead of this field.
    pub entitled_days: u32,
    /// Assigned by the store at creation; never changes afterwards.
    pub created_at: DateTime<Utc>,
}

impl VacationRecord {
    /// Builds a stored record from a draft.
    ///
    /// `entitled_days` is derived from the draft's absence count; the draft's
    /// own value is not trusted.
    pub fn from_draft(id: RecordId, draft: VacationDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            hr_representative: draft.hr_representative,
            employee_name: draft.employee_name,
            salary: draft.salary,
            absence_count: draft.absence_count,
            entitled_days: accrue(draft.absence_count),
            created_at,
        }
    }

    /// Recomputes the entitlement from `salary` and `absence_count`.
    ///
    /// The stored `entitled_days` is not consulted. Fails with `Valuation`
    /// when the stored salary is too large to value.
    pub fn entitlement(&self) -> EngineResult<Entitlement> {
        Entitlement::derive(self.salary, self.absence_count)
    }

    /// Returns the creation timestamp as `DD/MM/YYYY HH:mm:ss`.
    pub fn created_at_display(&self) -> String {
        self.created_at.format(TIMESTAMP_FORMAT).to_string()
    }
}
