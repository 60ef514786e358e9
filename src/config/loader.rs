//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a deduction
//! schedule from YAML files.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};

use super::types::{
    ContributionFile, ContributionRules, PayrollRules, ScheduleMetadata, WithholdingFile,
    WithholdingRules,
};

/// Loads and provides access to a deduction schedule.
///
/// The `ConfigLoader` reads YAML files from a directory, validates every
/// table and constant, and exposes the resulting [`PayrollRules`]. Loading
/// is all-or-nothing: a single missing, malformed, or invalid file fails the
/// whole load.
///
/// # Directory Structure
///
/// ```text
/// config/br-2026/
/// ├── schedule.yaml      # Metadata and accepted amount limits
/// ├── contribution.yaml  # Contribution brackets and ceiling
/// └── withholding.yaml   # Withholding brackets, allowances and relief
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/br-2026").unwrap();
/// println!("Schedule: {}", loader.metadata().version);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    rules: PayrollRules,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or misses a field (`ConfigParseError`)
    /// - A bracket table breaks its invariants (`InvalidBracketTable`)
    /// - A constant is out of range (`InvalidConfigValue`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<ScheduleMetadata>(&path.join("schedule.yaml"))?;
        let contribution_file =
            Self::load_yaml::<ContributionFile>(&path.join("contribution.yaml"))?;
        let withholding_file = Self::load_yaml::<WithholdingFile>(&path.join("withholding.yaml"))?;

        let contribution = ContributionRules::try_from(contribution_file)?;
        debug!(
            table = %contribution.name,
            ranges = contribution.table.ranges().len(),
            ceiling = %contribution.ceiling,
            "Contribution table validated"
        );

        let withholding = WithholdingRules::try_from(withholding_file)?;
        debug!(
            table = %withholding.name,
            ranges = withholding.table.ranges().len(),
            relief = withholding.relief.is_some(),
            "Withholding table validated"
        );

        let rules = PayrollRules::new(metadata, contribution, withholding)?;
        info!(
            path = %path.display(),
            schedule = %rules.metadata().version,
            "Deduction schedule loaded"
        );

        Ok(Self { rules })
    }

    /// Wraps rules built in code, bypassing the filesystem.
    pub fn from_rules(rules: PayrollRules) -> Self {
        Self { rules }
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

    /// Returns the validated rules.
    pub fn rules(&self) -> &PayrollRules {
        &self.rules
    }

    /// Returns the schedule metadata.
    pub fn metadata(&self) -> &ScheduleMetadata {
        self.rules.metadata()
    }
}
