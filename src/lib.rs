//! Salary Guardian - pluggable validation rules guarding salary adjustments
//!
//! Architecture: Clean Architecture - Library interface serves as the application layer
//! - Pure domain logic separated from configuration and presentation concerns
//! - Rules are swappable strategies held in an ordered, read-only registry
//! - The adjustment service validates with one, the default, or every rule, then applies

pub mod clock;
pub mod config;
pub mod domain;
pub mod report;
pub mod rules;
pub mod service;

// Re-export main types for convenient access
pub use domain::{
    AdjustmentError, AdjustmentReceipt, AdjustmentResult, Employee, SharedEmployee,
    ValidationOutcome,
};

pub use config::{AdjustmentConfig, ConfigBuilder, RuleConfig, RuleKind};

pub use rules::{
    AdjustmentRule, MinimumIntervalRule, PercentageCapRule, RuleRegistry, MINIMUM_INTERVAL_RULE_ID,
    PERCENTAGE_CAP_RULE_ID,
};

pub use service::{AdjustmentService, RuleSelection};

pub use report::{AdjustmentSummary, OutputFormat, ReportFormatter};

pub use clock::{Clock, FixedClock, SystemClock};

use std::path::Path;

/// Convenience function to create a service with the built-in rule set
pub fn create_service() -> AdjustmentResult<AdjustmentService> {
    AdjustmentService::from_config(&AdjustmentConfig::default())
}

/// Convenience function to create a service from a YAML configuration file
pub fn service_from_config_file<P: AsRef<Path>>(path: P) -> AdjustmentResult<AdjustmentService> {
    let config = AdjustmentConfig::load_from_file(path)?;
    AdjustmentService::from_config(&config)
}
