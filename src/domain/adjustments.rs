//! Validation outcomes, adjustment receipts and the error model
//!
//! Architecture: Rich Domain Models - a rejection is a value, not a boolean
//! - ValidationOutcome carries the user-facing reason of a rejected rule
//! - AdjustmentReceipt records what an applied adjustment changed
//! - AdjustmentError keeps business rejections apart from precondition faults

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Result of evaluating a single rule against a proposed increase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum ValidationOutcome {
    /// The rule has no objection to the increase
    Accepted,
    /// The rule refuses the increase for the given reason
    Rejected { reason: String },
}

impl ValidationOutcome {
    /// Create a rejected outcome
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected { reason: reason.into() }
    }

    /// Whether the rule accepted the increase
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Rejection reason, if any
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Accepted => None,
            Self::Rejected { reason } => Some(reason),
        }
    }
}

/// Record of an adjustment that passed every invoked rule and was applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentReceipt {
    /// Salary before the adjustment
    pub previous_salary: Decimal,
    /// Salary after the adjustment
    pub new_salary: Decimal,
    /// Increase that was added
    pub increase: Decimal,
    /// Date stored as the new last-adjustment date
    pub effective_date: NaiveDate,
    /// Rules that were evaluated, in evaluation order
    pub rules_applied: Vec<String>,
}

impl AdjustmentReceipt {
    /// Format receipt for display
    pub fn format_display(&self) -> String {
        format!(
            "{} -> {} (+{}) effective {} [{}]",
            self.previous_salary,
            self.new_salary,
            self.increase,
            self.effective_date,
            self.rules_applied.join(", ")
        )
    }
}

/// Error types that can occur while adjusting a salary
#[derive(Debug, thiserror::Error)]
pub enum AdjustmentError {
    /// A rule refused the increase; an expected business outcome
    #[error("Adjustment rejected: {reason}")]
    Rejected { rule_id: String, reason: String },

    /// Input violated a precondition of the domain (negative salary, zero divisor, ...)
    #[error("Precondition violated: {message}")]
    Precondition { message: String },

    /// A named rule was requested that the registry does not contain
    #[error("Unknown rule '{rule_id}'")]
    UnknownRule { rule_id: String },

    /// Configuration or registry could not be built
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Configuration file could not be read
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl AdjustmentError {
    /// Create a rejection error for the given rule
    pub fn rejected(rule_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            rule_id: rule_id.into(),
            reason: reason.into(),
        }
    }

    /// Create a precondition error
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition {
            message: message.into(),
        }
    }

    /// Create an unknown rule error
    pub fn unknown_rule(rule_id: impl Into<String>) -> Self {
        Self::UnknownRule {
            rule_id: rule_id.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether this error is a business rejection rather than a fault
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// Whether this error is a precondition fault
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition { .. })
    }

    /// Rejection reason surfaced to the caller
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Rejected { reason, .. } => Some(reason),
            _ => None,
        }
    }

    /// Identifier of the rejecting rule
    pub fn rule_id(&self) -> Option<&str> {
        match self {
            Self::Rejected { rule_id, .. } | Self::UnknownRule { rule_id } => Some(rule_id),
            _ => None,
        }
    }
}

/// Result type for adjustment operations
pub type AdjustmentResult<T> = Result<T, AdjustmentError>;
