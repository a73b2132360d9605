//! Spreadsheet interchange for the vacation roster.
//!
//! The importer and exporter are independent pipelines over the record
//! store. They share only the accrual and valuation rules, and the column
//! order both rely on:
//!
//! - Import reads `[id (ignored), RH, Funcionário, Salário]` and starts every
//!   record with zero absences.
//! - Export writes `[ID, RH, Funcionário, Salário, Faltas, Dias de Férias,
//!   Valor das Férias, Data de Cadastro]`, so an exported file can be
//!   imported again.

mod exporter;
mod importer;

pub use exporter::{EXPORT_COLUMNS, SpreadsheetExporter};
pub use importer::{
    ImportSummary, ParsedSheet, RejectedRow, RowRejection, SpreadsheetImporter, read_roster_sheet,
};

/// MIME type of exported workbooks.
pub const XLSX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
