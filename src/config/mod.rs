//! Configuration loading and management for the Vacation Entitlement Engine.
//!
//! This module loads the engine configuration from a YAML file: the HTTP
//! listener, the upload staging directory, the roster sheet name and page
//! size, and the report title and download filenames.
//!
//! # Example
//!
//! ```no_run
//! use vacation_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/vacation.yaml").unwrap();
//! println!("Listening on port {}", config.config().server.port);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, ReportConfig, RosterConfig, ServerConfig};
