//! Rule engine for guarding salary adjustments
//!
//! Architectural Principle: Strategy - every check implements AdjustmentRule for clean polymorphism
//! - Rules are pure: they read the employee and the increase, never mutate
//! - The registry owns the ordered rule set and the designated default
//! - Rule outcomes are translated to typed adjustment errors at the registry boundary

pub mod minimum_interval;
pub mod percentage_cap;
pub mod registry;

use crate::domain::{AdjustmentResult, Employee, ValidationOutcome};
use rust_decimal::Decimal;
use std::fmt::Debug;

pub use minimum_interval::{MinimumIntervalRule, MINIMUM_INTERVAL_RULE_ID};
pub use percentage_cap::{PercentageCapRule, PERCENTAGE_CAP_RULE_ID, RATIO_SCALE};
pub use registry::{RegisteredRule, RuleRegistry, RuleRegistryBuilder};

/// A check run before a salary increase is applied.
///
/// `Ok(Rejected)` is a business refusal; `Err` is reserved for
/// precondition faults such as a salary the rule cannot divide by.
pub trait AdjustmentRule: Send + Sync + Debug {
    /// Short machine name of the rule kind
    fn kind(&self) -> &'static str;

    /// Human-readable description of what the rule enforces
    fn description(&self) -> String;

    /// Evaluate the rule against an employee and a proposed increase
    fn validate(&self, employee: &Employee, increase: Decimal)
        -> AdjustmentResult<ValidationOutcome>;
}
