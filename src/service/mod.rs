//! Adjustment orchestration for Salary Guardian
//!
//! CDD Principle: Domain Services - the service runs the selected rules, then applies the raise
//! - Selects the default rule, one named rule, or every registered rule
//! - Stops at the first rejection and leaves the employee untouched
//! - Holds the per-record lock across validation and mutation for shared records

use crate::clock::{Clock, SystemClock};
use crate::config::AdjustmentConfig;
use crate::domain::{
    AdjustmentError, AdjustmentReceipt, AdjustmentResult, Employee, SharedEmployee,
};
use crate::rules::{RegisteredRule, RuleRegistry};
use rayon::prelude::*;
use rust_decimal::Decimal;
use std::fmt;
use std::sync::Arc;

/// Which rules guard an adjustment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleSelection {
    /// Only the registry's default rule
    Default,
    /// A single rule by identifier
    Named(String),
    /// Every registered rule, in registration order
    All,
}

impl RuleSelection {
    /// Select a single rule by identifier
    pub fn named(id: impl Into<String>) -> Self {
        Self::Named(id.into())
    }
}

impl fmt::Display for RuleSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::Named(id) => write!(f, "rule '{id}'"),
            Self::All => f.write_str("all rules"),
        }
    }
}

/// Applies salary increases guarded by a read-only rule registry
#[derive(Debug, Clone)]
pub struct AdjustmentService {
    registry: Arc<RuleRegistry>,
    clock: Arc<dyn Clock>,
}

impl AdjustmentService {
    /// Create a service over a registry; `clock` stamps applied adjustments
    pub fn new(registry: Arc<RuleRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    /// Build the registry from configuration using the system clock
    pub fn from_config(config: &AdjustmentConfig) -> AdjustmentResult<Self> {
        Self::from_config_with_clock(config, Arc::new(SystemClock))
    }

    /// Build the registry from configuration; rules and service share `clock`
    pub fn from_config_with_clock(
        config: &AdjustmentConfig,
        clock: Arc<dyn Clock>,
    ) -> AdjustmentResult<Self> {
        let registry = config.build_registry(Arc::clone(&clock))?;
        Ok(Self::new(Arc::new(registry), clock))
    }

    /// Registry this service validates against
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Adjust after validating with the default rule only
    pub fn adjust_with_default(
        &self,
        employee: &mut Employee,
        increase: Decimal,
    ) -> AdjustmentResult<AdjustmentReceipt> {
        self.adjust(employee, increase, &RuleSelection::Default)
    }

    /// Adjust after validating with one named rule
    pub fn adjust_with_rule(
        &self,
        employee: &mut Employee,
        rule_id: &str,
        increase: Decimal,
    ) -> AdjustmentResult<AdjustmentReceipt> {
        self.adjust(employee, increase, &RuleSelection::named(rule_id))
    }

    /// Adjust after validating with every registered rule
    pub fn adjust_with_all(
        &self,
        employee: &mut Employee,
        increase: Decimal,
    ) -> AdjustmentResult<AdjustmentReceipt> {
        self.adjust(employee, increase, &RuleSelection::All)
    }

    /// Validate `increase` with the selected rules and apply it if all accept.
    ///
    /// On any error the employee is left exactly as it was.
    pub fn adjust(
        &self,
        employee: &mut Employee,
        increase: Decimal,
        selection: &RuleSelection,
    ) -> AdjustmentResult<AdjustmentReceipt> {
        let result = self.run(employee, increase, selection);

        match &result {
            Ok(receipt) => tracing::info!(
                "Salary adjusted with {}: {}",
                selection,
                receipt.format_display()
            ),
            Err(AdjustmentError::Rejected { rule_id, reason }) => tracing::debug!(
                "Adjustment of {} rejected by '{}': {}",
                increase,
                rule_id,
                reason
            ),
            Err(e @ AdjustmentError::Precondition { .. }) => {
                tracing::error!("Adjustment of {} aborted: {}", increase, e)
            }
            Err(e) => tracing::warn!("Adjustment of {} not attempted: {}", increase, e),
        }

        result
    }

    /// Adjust a shared record, holding its lock for the whole operation
    pub fn adjust_shared(
        &self,
        record: &SharedEmployee,
        increase: Decimal,
        selection: &RuleSelection,
    ) -> AdjustmentResult<AdjustmentReceipt> {
        let mut employee = record.lock()?;
        self.adjust(&mut employee, increase, selection)
    }

    /// Adjust many records in parallel; results keep the input order
    pub fn adjust_batch(
        &self,
        records: &[SharedEmployee],
        increase: Decimal,
        selection: &RuleSelection,
    ) -> Vec<AdjustmentResult<AdjustmentReceipt>> {
        tracing::debug!("Adjusting {} records with {}", records.len(), selection);

        records
            .par_iter()
            .map(|record| self.adjust_shared(record, increase, selection))
            .collect()
    }

    fn run(
        &self,
        employee: &mut Employee,
        increase: Decimal,
        selection: &RuleSelection,
    ) -> AdjustmentResult<AdjustmentReceipt> {
        if increase < Decimal::ZERO {
            return Err(AdjustmentError::precondition(format!(
                "increase must not be negative, got {increase}"
            )));
        }

        let rules = self.select(selection)?;
        for entry in &rules {
            tracing::debug!("Evaluating rule '{}'", entry.id());
            entry.check(employee, increase)?;
        }

        let effective_date = self.clock.today();
        let previous_salary = employee.apply_adjustment(increase, effective_date)?;

        Ok(AdjustmentReceipt {
            previous_salary,
            new_salary: employee.salary(),
            increase,
            effective_date,
            rules_applied: rules.iter().map(|entry| entry.id().to_string()).collect(),
        })
    }

    fn select(&self, selection: &RuleSelection) -> AdjustmentResult<Vec<&RegisteredRule>> {
        match selection {
            RuleSelection::Default => Ok(vec![self.registry.default_rule()]),
            RuleSelection::Named(id) => Ok(vec![self.registry.get(id)?]),
            RuleSelection::All => Ok(self.registry.iter().collect()),
        }
    }
}
