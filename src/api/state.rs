//! Application state for the Vacation Entitlement Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::report::ReportGenerator;
use crate::roster::RosterService;
use crate::spreadsheet::{SpreadsheetExporter, SpreadsheetImporter};
use crate::store::RecordStore;

/// Shared application state.
///
/// Holds the configuration and the roster pipelines, all wired to the same
/// record store.
#[derive(Clone)]
pub struct AppState {
    config: Arc<AppConfig>,
    roster: RosterService,
    importer: Arc<SpreadsheetImporter>,
    exporter: Arc<SpreadsheetExporter>,
    reports: Arc<ReportGenerator>,
}

impl AppState {
    /// Creates the application state over `store`.
    pub fn new(config: AppConfig, store: Arc<dyn RecordStore>) -> Self {
        let sheet_name = config.roster.sheet_name.clone();
        Self {
            roster: RosterService::new(store.clone(), config.roster.page_size),
            importer: Arc::new(SpreadsheetImporter::new(store.clone(), sheet_name.clone())),
            exporter: Arc::new(SpreadsheetExporter::new(store.clone(), sheet_name)),
            reports: Arc::new(ReportGenerator::new(store, config.report.title.clone())),
            config: Arc::new(config),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the record-level roster operations.
    pub fn roster(&self) -> &RosterService {
        &self.roster
    }

    /// Returns the workbook importer.
    pub fn importer(&self) -> &SpreadsheetImporter {
        &self.importer
    }

    /// Returns the workbook exporter.
    pub fn exporter(&self) -> &SpreadsheetExporter {
        &self.exporter
    }

    /// Returns the report generator.
    pub fn reports(&self) -> &ReportGenerator {
        &self.reports
    }
}
