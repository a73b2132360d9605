//! Configuration types for the vacation engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every field has a
//! default, so a partial file only overrides what it names.

use std::path::PathBuf;

use serde::Deserialize;

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Largest workbook accepted by the import endpoint, in bytes.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Roster interchange settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Worksheet read on import and written on export.
    pub sheet_name: String,
    /// Records per page in roster listings.
    pub page_size: usize,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            sheet_name: "Férias Legais".to_string(),
            page_size: 10,
        }
    }
}

/// Report and download settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Title printed at the top of the report.
    pub title: String,
    /// Attachment filename for the PDF report.
    pub pdf_filename: String,
    /// Attachment filename for the workbook export.
    pub xlsx_filename: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "Relatório de Férias Legais".to_string(),
            pdf_filename: "ferias_legais.pdf".to_string(),
            xlsx_filename: "ferias_legais.xlsx".to_string(),
        }
    }
}

/// The complete engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Directory where uploaded workbooks are staged during import.
    pub upload_dir: PathBuf,
    /// Roster interchange settings.
    pub roster: RosterConfig,
    /// Report and download settings.
    pub report: ReportConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            upload_dir: PathBuf::from("./uploads"),
            roster: RosterConfig::default(),
            report: ReportConfig::default(),
        }
    }
}
