//! Vacation valuation functionality.
//!
//! This module turns a monthly salary and a number of entitled days into the
//! amount owed for the vacation, including the one-third statutory bonus.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::accrual::accrue;

/// Days in the salary month used to pro-rate the daily salary.
pub const DAYS_PER_SALARY_MONTH: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// Decimal places kept for monetary values.
pub const MONEY_SCALE: u32 = 2;

/// Largest salary accepted on entry: ten digits with two decimals
/// (`99999999.99`).
pub const MAX_SALARY: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, MONEY_SCALE);

/// Computes the value of `entitled_days` of vacation for a monthly `salary`.
///
/// The formula is `(salary / 30) * entitled_days * 4/3`, rounded half-up to
/// two decimal places. The `4/3` factor adds the one-third bonus on top of
/// the pro-rated daily salary. The multiplication is carried out before the
/// division so that exact inputs yield exact results.
///
/// # Errors
///
/// Returns `Valuation` when the intermediate product does not fit a
/// `Decimal`. Salaries up to [`MAX_SALARY`] never overflow.
///
/// # Examples
///
/// ```
/// use vacation_engine::calculation::entitlement_value;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let value = entitlement_value(Decimal::from(3000), 30).unwrap();
/// assert_eq!(value, Decimal::from_str("4000.00").unwrap());
///
/// let value = entitlement_value(Decimal::from(1500), 24).unwrap();
/// assert_eq!(value, Decimal::from_str("1600.00").unwrap());
/// ```
pub fn entitlement_value(salary: Decimal, entitled_days: u32) -> EngineResult<Decimal> {
    let overflow = || EngineError::Valuation {
        salary,
        entitled_days,
    };
    let numerator = salary
        .checked_mul(Decimal::from(entitled_days))
        .and_then(|amount| amount.checked_mul(Decimal::from(4)))
        .ok_or_else(overflow)?;
    let denominator = DAYS_PER_SALARY_MONTH * Decimal::from(3);
    numerator
        .checked_div(denominator)
        .map(round_money)
        .ok_or_else(overflow)
}

/// Rounds a monetary amount half-up to [`MONEY_SCALE`] decimal places.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// The derived entitlement for a salary and absence count.
///
/// Never stored; build it from the record every time it is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entitlement {
    /// Vacation days granted by the accrual table.
    pub entitled_days: u32,
    /// Monetary value of those days.
    pub value: Decimal,
}

impl Entitlement {
    /// Derives the entitlement from scratch.
    ///
    /// ```
    /// use vacation_engine::calculation::Entitlement;
    /// use rust_decimal::Decimal;
    ///
    /// let entitlement = Entitlement::derive(Decimal::from(1500), 10).unwrap();
    /// assert_eq!(entitlement.entitled_days, 24);
    /// assert_eq!(entitlement.value, Decimal::from(1600));
    /// ```
    pub fn derive(salary: Decimal, absences: u32) -> EngineResult<Self> {
        let entitled_days = accrue(absences);
        Ok(Self {
            entitled_days,
            value: entitlement_value(salary, entitled_days)?,
        })
    }
}
