//! Core data models for the Vacation Entitlement Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod pagination;
mod roster_row;
mod vacation_record;

pub use pagination::{Page, PageWindow, total_pages};
pub use roster_row::RosterRow;
pub use vacation_record::{RecordId, TIMESTAMP_FORMAT, VacationDraft, VacationRecord};
