//! Cap on the size of a single increase relative to the current salary

use crate::domain::{AdjustmentError, AdjustmentResult, Employee, ValidationOutcome};
use crate::rules::AdjustmentRule;
use rust_decimal::{Decimal, RoundingStrategy};

/// Identifier the percentage cap is registered under by default
pub const PERCENTAGE_CAP_RULE_ID: &str = "percentage-cap";

/// Decimal places kept when reporting the increase ratio (half-up); the
/// accept/reject decision is made on the exact product instead
pub const RATIO_SCALE: u32 = 10;

/// Rejects increases whose ratio to the current salary exceeds `max_ratio`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PercentageCapRule {
    max_ratio: Decimal,
}

impl PercentageCapRule {
    /// Create a cap; `max_ratio` is a fraction, so 40% is `0.40`
    pub fn new(max_ratio: Decimal) -> Self {
        Self { max_ratio }
    }

    /// Largest accepted ratio
    pub fn max_ratio(&self) -> Decimal {
        self.max_ratio
    }

    /// `increase / salary`, rounded half-up to [`RATIO_SCALE`] places
    pub fn ratio(increase: Decimal, salary: Decimal) -> AdjustmentResult<Decimal> {
        require_positive(salary)?;

        let ratio = increase.checked_div(salary).ok_or_else(|| {
            AdjustmentError::precondition(format!("cannot divide {increase} by {salary}"))
        })?;

        Ok(ratio.round_dp_with_strategy(RATIO_SCALE, RoundingStrategy::MidpointAwayFromZero))
    }

    /// Whether `increase` is strictly above `max_ratio * salary`, compared exactly
    pub fn exceeds_cap(&self, increase: Decimal, salary: Decimal) -> AdjustmentResult<bool> {
        require_positive(salary)?;

        let limit = self.max_ratio.checked_mul(salary).ok_or_else(|| {
            AdjustmentError::precondition(format!(
                "cap {} of salary {} overflows",
                self.max_ratio, salary
            ))
        })?;

        Ok(increase > limit)
    }

    fn rejection_reason(&self) -> String {
        let percent = (self.max_ratio * Decimal::ONE_HUNDRED).normalize();
        format!("increase exceeds {percent}% of current salary")
    }
}

fn require_positive(salary: Decimal) -> AdjustmentResult<()> {
    if salary <= Decimal::ZERO {
        return Err(AdjustmentError::precondition(format!(
            "percentage cap requires a positive salary, got {salary}"
        )));
    }
    Ok(())
}

impl Default for PercentageCapRule {
    fn default() -> Self {
        Self::new(Decimal::new(40, 2))
    }
}

impl AdjustmentRule for PercentageCapRule {
    fn kind(&self) -> &'static str {
        "percentage_cap"
    }

    fn description(&self) -> String {
        format!(
            "Increase may not exceed {}% of the current salary",
            (self.max_ratio * Decimal::ONE_HUNDRED).normalize()
        )
    }

    fn validate(
        &self,
        employee: &Employee,
        increase: Decimal,
    ) -> AdjustmentResult<ValidationOutcome> {
        let exceeds = self.exceeds_cap(increase, employee.salary())?;
        let ratio = Self::ratio(increase, employee.salary())?;

        tracing::debug!(
            "Percentage cap: ratio {} against limit {} (salary {}, increase {})",
            ratio,
            self.max_ratio,
            employee.salary(),
            increase
        );

        if exceeds {
            return Ok(ValidationOutcome::rejected(self.rejection_reason()));
        }

        Ok(ValidationOutcome::Accepted)
    }
}
