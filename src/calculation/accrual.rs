//! Vacation accrual functionality.
//!
//! This module maps the number of unjustified absences in an accrual period
//! to the number of paid vacation days the employee is entitled to.

/// One row of the accrual table: absences up to `max_absences` (inclusive)
/// entitle the employee to `entitled_days`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccrualTier {
    /// The highest absence count covered by this tier.
    pub max_absences: u32,
    /// The vacation days granted within this tier.
    pub entitled_days: u32,
}

/// The accrual tiers, in ascending order of absences.
///
/// Absence counts above the last tier forfeit the vacation entirely.
/// Changing this table changes the import and export contracts.
pub const ACCRUAL_TIERS: [AccrualTier; 4] = [
    AccrualTier {
        max_absences: 5,
        entitled_days: 30,
    },
    AccrualTier {
        max_absences: 14,
        entitled_days: 24,
    },
    AccrualTier {
        max_absences: 23,
        entitled_days: 18,
    },
    AccrualTier {
        max_absences: 32,
        entitled_days: 12,
    },
];

/// Vacation days granted when no absences are recorded.
///
/// Imported rows carry no absence data and always receive this value.
pub const FULL_ENTITLEMENT_DAYS: u32 = 30;

/// Returns the vacation days earned for a given number of absences.
///
/// The tiers are evaluated in ascending order and the first tier whose
/// upper bound covers `absences` wins.
///
/// | absences | days |
/// |----------|------|
/// | 0-5      | 30   |
/// | 6-14     | 24   |
/// | 15-23    | 18   |
/// | 24-32    | 12   |
/// | 33+      | 0    |
///
/// # Examples
///
/// ```
/// use vacation_engine::calculation::accrue;
///
/// assert_eq!(accrue(0), 30);
/// assert_eq!(accrue(6), 24);
/// assert_eq!(accrue(33), 0);
/// ```
pub fn accrue(absences: u32) -> u32 {
    ACCRUAL_TIERS
        .iter()
        .find(|tier| absences <= tier.max_absences)
        .map_or(0, |tier| tier.entitled_days)
}
