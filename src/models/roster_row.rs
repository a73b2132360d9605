//! Display mapping for roster listings.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

use super::{RecordId, VacationRecord};

/// A vacation record prepared for presentation.
///
/// Monetary fields are rendered with two decimals, and the entitlement is
/// recomputed from the record every time a row is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRow {
    /// Identifier assigned by the store.
    pub id: RecordId,
    /// The HR representative responsible for the record.
    pub hr_representative: String,
    /// The employee the vacation belongs to.
    pub employee_name: String,
    /// Monthly salary with two decimals.
    pub salary: String,
    /// Unjustified absences in the accrual period.
    pub absence_count: u32,
    /// Entitled vacation days, recomputed.
    pub entitled_days: u32,
    /// Value of the entitlement with two decimals, recomputed.
    pub entitlement_value: String,
    /// Creation timestamp as `DD/MM/YYYY HH:mm:ss`.
    pub created_at: String,
}

impl TryFrom<&VacationRecord> for RosterRow {
    type Error = EngineError;

    fn try_from(record: &VacationRecord) -> Result<Self, Self::Error> {
        let entitlement = record.entitlement()?;
        Ok(Self {
            id: record.id,
            hr_representative: record.hr_representative.clone(),
            employee_name: record.employee_name.clone(),
            salary: format!("{:.2}", record.salary),
            absence_count: record.absence_count,
            entitled_days: entitlement.entitled_days,
            entitlement_value: format!("{:.2}", entitlement.value),
            created_at: record.created_at_display(),
        })
    }
}
