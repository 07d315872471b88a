//! Configuration loading and management for the enrollment engine.
//!
//! This module provides functionality to load the company and policy
//! configuration from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use appraisal_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/appraisal").unwrap();
//! println!("Serving company: {}", config.company().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{CompanyMetadata, EngineConfig, EnrollmentPolicy};
