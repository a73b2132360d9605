//! Validation of record input.
//!
//! Every create and update attempt goes through [`RecordInput::into_draft`],
//! which either yields a complete draft with its entitlement derived or
//! rejects the attempt without touching the store.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{MAX_SALARY, round_money};
use crate::error::{EngineError, EngineResult};
use crate::models::VacationDraft;

/// Fields supplied by a caller when registering or editing a record.
///
/// All fields are optional at the edge so that a missing value surfaces as
/// a validation error naming the field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordInput {
    /// The HR representative responsible for the record.
    #[serde(default)]
    pub hr_representative: Option<String>,
    /// The employee the vacation belongs to.
    #[serde(default)]
    pub employee_name: Option<String>,
    /// Monthly salary; must be greater than zero.
    #[serde(default)]
    pub salary: Option<Decimal>,
    /// Unjustified absences; must not be negative.
    #[serde(default)]
    pub absence_count: Option<i64>,
}

impl RecordInput {
    /// Validates the input and builds a draft.
    ///
    /// The salary is rounded to two decimals and `entitled_days` is derived
    /// from the absence count.
    ///
    /// # Examples
    ///
    /// ```
    /// use vacation_engine::roster::RecordInput;
    /// use rust_decimal::Decimal;
    ///
    /// let input = RecordInput {
    ///     hr_representative: Some("Ana".to_string()),
    ///     employee_name: Some("Bruno".to_string()),
    ///     salary: Some(Decimal::from(2500)),
    ///     absence_count: Some(16),
    /// };
    /// let draft = input.into_draft().unwrap();
    /// assert_eq!(draft.entitled_days, 18);
    /// ```
    pub fn into_draft(self) -> EngineResult<VacationDraft> {
        let hr_representative = required_text("hr_representative", self.hr_representative)?;
        let employee_name = required_text("employee_name", self.employee_name)?;

        let salary = self
            .salary
            .ok_or_else(|| EngineError::validation("salary", "is required"))?;
        let salary = round_money(salary);
        if salary <= Decimal::ZERO {
            return Err(EngineError::validation(
                "salary",
                "must be greater than zero",
            ));
        }
        if salary > MAX_SALARY {
            return Err(EngineError::validation(
                "salary",
                format!("must not exceed {MAX_SALARY}"),
            ));
        }

        let absence_count = self
            .absence_count
            .ok_or_else(|| EngineError::validation("absence_count", "is required"))?;
        let absence_count = u32::try_from(absence_count).map_err(|_| {
            EngineError::validation("absence_count", "must be a non-negative whole number")
        })?;

        Ok(VacationDraft::new(
            hr_representative,
            employee_name,
            salary,
            absence_count,
        ))
    }
}

fn required_text(field: &str, value: Option<String>) -> EngineResult<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(EngineError::validation(field, "is required")),
    }
}
