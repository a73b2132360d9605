//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::AppConfig;

/// Loads and provides access to the engine configuration.
///
/// # File Format
///
/// ```text
/// server:
///   host: 0.0.0.0
///   port: 8080
/// upload_dir: ./uploads
/// roster:
///   sheet_name: Férias Legais
///   page_size: 10
/// report:
///   title: Relatório de Férias Legais
/// ```
///
/// # Example
///
/// ```no_run
/// use vacation_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/vacation.yaml")?;
/// println!("Sheet: {}", loader.config().roster.sheet_name);
/// # Ok::<(), vacation_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML (`ConfigParseError`)
    /// - A value is out of range, such as a zero page size (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config: AppConfig =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        Self::validate(&config).map_err(|message| EngineError::ConfigParseError {
            path: path_str,
            message,
        })?;

        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: AppConfig) -> Self {
        Self { config }
    }

    fn validate(config: &AppConfig) -> Result<(), String> {
        if config.roster.page_size == 0 {
            return Err("roster.page_size must be greater than zero".to_string());
        }
        if config.roster.sheet_name.trim().is_empty() {
            return Err("roster.sheet_name must not be empty".to_string());
        }
        Ok(())
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the configuration, consuming the loader.
    pub fn into_config(self) -> AppConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_reads_yaml_file() {
        let file = write_config(
            "server:\n  port: 9090\nroster:\n  sheet_name: Roster\nreport:\n  title: Vacation\n",
        );
        let loader = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(loader.config().server.port, 9090);
        assert_eq!(loader.config().roster.sheet_name, "Roster");
        assert_eq!(loader.config().roster.page_size, 10);
        assert_eq!(loader.config().report.title, "Vacation");
    }

    #[test]
    fn test_load_missing_file() {
        let result = ConfigLoader::load("/nonexistent/vacation.yaml");
        assert!(matches!(result, Err(EngineError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let file = write_config("server: [unterminated");
        let result = ConfigLoader::load(file.path());
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let file = write_config("roster:\n  page_size: 0\n");
        match ConfigLoader::load(file.path()) {
            Err(EngineError::ConfigParseError { message, .. }) => {
                assert!(message.contains("page_size"));
            }
            other => panic!("expected ConfigParseError, got {other:?}"),
        }
    }

    #[test]
    fn test_bundled_config_loads() {
        let loader = ConfigLoader::load("./config/vacation.yaml").unwrap();
        assert_eq!(loader.config().roster.sheet_name, "Férias Legais");
        assert_eq!(loader.config().roster.page_size, 10);
    }
}
