//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{CompanyMetadata, EngineConfig, EnrollmentPolicy};

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/appraisal/
/// ├── company.yaml   # Company metadata
/// └── policy.yaml    # Enrollment policy knobs
/// ```
///
/// # Example
///
/// ```no_run
/// use appraisal_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/appraisal").unwrap();
/// println!("Serving company: {}", loader.company().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing or contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let company = Self::load_yaml::<CompanyMetadata>(&path.join("company.yaml"))?;
        let policy = Self::load_yaml::<EnrollmentPolicy>(&path.join("policy.yaml"))?;

        Ok(Self {
            config: EngineConfig::new(company, policy),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the company this engine instance serves.
    pub fn company(&self) -> &CompanyMetadata {
        self.config.company()
    }

    /// Returns the enrollment policy.
    pub fn policy(&self) -> &EnrollmentPolicy {
        self.config.policy()
    }

    /// Verifies that a snapshot is scoped to the configured company.
    pub fn check_company(&self, company_id: &str) -> EngineResult<()> {
        if company_id != self.company().id {
            return Err(EngineError::CompanyMismatch {
                expected: self.company().id.clone(),
                actual: company_id.to_string(),
            });
        }
        Ok(())
    }
}
