//! Configuration loading and management for the Payroll Engine.
//!
//! This module loads the deduction schedule (bracket tables and statutory
//! constants) from YAML files and validates it into an immutable
//! [`PayrollRules`] object that is shared read-only by every request.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/br-2026").unwrap();
//! println!("Loaded schedule: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AMOUNT_LIMIT, ContributionFile, ContributionRules, PayrollRules, ReliefSchedule, ScheduleMetadata,
    WithholdingFile, WithholdingRules,
};
