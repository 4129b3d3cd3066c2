//! Ordered, read-only registry of adjustment rules
//!
//! Registration order is evaluation order. Exactly one rule is the default.

use crate::domain::{AdjustmentError, AdjustmentResult, Employee, ValidationOutcome};
use crate::rules::AdjustmentRule;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::Arc;

/// A rule together with the identifier it was registered under
#[derive(Debug, Clone)]
pub struct RegisteredRule {
    id: String,
    rule: Arc<dyn AdjustmentRule>,
}

impl RegisteredRule {
    /// Registry identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Underlying rule
    pub fn rule(&self) -> &dyn AdjustmentRule {
        self.rule.as_ref()
    }

    /// Run the rule and turn a rejection into an [`AdjustmentError::Rejected`]
    pub fn check(&self, employee: &Employee, increase: Decimal) -> AdjustmentResult<()> {
        match self.rule.validate(employee, increase)? {
            ValidationOutcome::Accepted => Ok(()),
            ValidationOutcome::Rejected { reason } => {
                Err(AdjustmentError::rejected(self.id.clone(), reason))
            }
        }
    }
}

/// Rule set built once at composition time
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    rules: Vec<RegisteredRule>,
    default_index: usize,
}

impl RuleRegistry {
    /// Start building a registry
    pub fn builder() -> RuleRegistryBuilder {
        RuleRegistryBuilder::new()
    }

    /// Look up a rule by identifier
    pub fn get(&self, id: &str) -> AdjustmentResult<&RegisteredRule> {
        self.rules
            .iter()
            .find(|entry| entry.id == id)
            .ok_or_else(|| AdjustmentError::unknown_rule(id))
    }

    /// The designated default rule
    pub fn default_rule(&self) -> &RegisteredRule {
        &self.rules[self.default_index]
    }

    /// Identifier of the default rule
    pub fn default_rule_id(&self) -> &str {
        &self.default_rule().id
    }

    /// Rules in registration order
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredRule> {
        self.rules.iter()
    }

    /// Identifiers in registration order
    pub fn ids(&self) -> Vec<&str> {
        self.rules.iter().map(|entry| entry.id.as_str()).collect()
    }
}

/// Builder collecting `(identifier, rule)` pairs and the default identifier
#[derive(Debug, Default)]
pub struct RuleRegistryBuilder {
    rules: Vec<RegisteredRule>,
    default_rule: Option<String>,
}

impl RuleRegistryBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule under `id`
    pub fn register(self, id: impl Into<String>, rule: impl AdjustmentRule + 'static) -> Self {
        self.register_shared(id, Arc::new(rule))
    }

    /// Append an already shared rule under `id`
    pub fn register_shared(mut self, id: impl Into<String>, rule: Arc<dyn AdjustmentRule>) -> Self {
        self.rules.push(RegisteredRule { id: id.into(), rule });
        self
    }

    /// Designate the default rule
    pub fn default_rule(mut self, id: impl Into<String>) -> Self {
        self.default_rule = Some(id.into());
        self
    }

    /// Validate and freeze the registry
    pub fn build(self) -> AdjustmentResult<RuleRegistry> {
        if self.rules.is_empty() {
            return Err(AdjustmentError::config("rule registry must contain at least one rule"));
        }

        let mut seen = HashSet::new();
        for entry in &self.rules {
            if !seen.insert(entry.id.as_str()) {
                return Err(AdjustmentError::config(format!(
                    "Duplicate rule ID '{}'",
                    entry.id
                )));
            }
        }

        let default_id = self
            .default_rule
            .ok_or_else(|| AdjustmentError::config("no default rule designated"))?;

        let default_index = self
            .rules
            .iter()
            .position(|entry| entry.id == default_id)
            .ok_or_else(|| {
                AdjustmentError::config(format!(
                    "default rule '{default_id}' is not registered"
                ))
            })?;

        tracing::debug!(
            "Built rule registry with {} rules, default '{}'",
            self.rules.len(),
            default_id
        );

        Ok(RuleRegistry { rules: self.rules, default_index })
    }
}
