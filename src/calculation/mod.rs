//! Calculation logic for the Vacation Entitlement Engine.
//!
//! This module contains the two rules every read and export path shares:
//! the accrual table that turns absences into entitled vacation days, and
//! the valuation formula that turns salary and entitled days into money.

mod accrual;
mod valuation;

pub use accrual::{ACCRUAL_TIERS, AccrualTier, FULL_ENTITLEMENT_DAYS, accrue};
pub use valuation::{
    DAYS_PER_SALARY_MONTH, Entitlement, MAX_SALARY, MONEY_SCALE, entitlement_value, round_money,
};
