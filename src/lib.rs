//! Vacation Entitlement Engine
//!
//! This crate keeps vacation-entitlement records for an HR office. It derives
//! entitled days from unjustified absences, values them against the monthly
//! salary, and moves the roster in and out of Excel workbooks and PDF reports.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod roster;
pub mod spreadsheet;
pub mod store;
