//! Minimum number of whole months between two adjustments

use crate::clock::{months_between, Clock};
use crate::domain::{AdjustmentResult, Employee, ValidationOutcome};
use crate::rules::AdjustmentRule;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Identifier the interval rule is registered under by default
pub const MINIMUM_INTERVAL_RULE_ID: &str = "minimum-interval";

/// Rejects an increase when fewer than `min_months` whole months have
/// passed since the employee's last adjustment
#[derive(Debug, Clone)]
pub struct MinimumIntervalRule {
    min_months: u32,
    clock: Arc<dyn Clock>,
}

impl MinimumIntervalRule {
    /// Default interval in months
    pub const DEFAULT_MIN_MONTHS: u32 = 6;

    /// Create a rule measuring elapsed time against `clock`
    pub fn new(min_months: u32, clock: Arc<dyn Clock>) -> Self {
        Self { min_months, clock }
    }

    /// Six-month interval measured against `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::new(Self::DEFAULT_MIN_MONTHS, clock)
    }

    /// Required number of whole months
    pub fn min_months(&self) -> u32 {
        self.min_months
    }
}

impl AdjustmentRule for MinimumIntervalRule {
    fn kind(&self) -> &'static str {
        "minimum_interval"
    }

    fn description(&self) -> String {
        format!(
            "At least {} whole months must pass between adjustments",
            self.min_months
        )
    }

    fn validate(
        &self,
        employee: &Employee,
        _increase: Decimal,
    ) -> AdjustmentResult<ValidationOutcome> {
        let today = self.clock.today();
        let elapsed = months_between(employee.last_adjustment_date(), today);

        tracing::debug!(
            "Minimum interval: {} months since {} (required {})",
            elapsed,
            employee.last_adjustment_date(),
            self.min_months
        );

        if elapsed < i64::from(self.min_months) {
            return Ok(ValidationOutcome::rejected(format!(
                "adjustment interval must be at least {} months",
                self.min_months
            )));
        }

        Ok(ValidationOutcome::Accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{Days, Months, NaiveDate};
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 15).unwrap()
    }

    fn rule() -> MinimumIntervalRule {
        MinimumIntervalRule::with_clock(Arc::new(FixedClock(today())))
    }

    fn employee_since(last: NaiveDate) -> Employee {
        Employee::new(dec!(10000), last).unwrap()
    }

    #[test]
    fn test_exactly_six_months_accepted() {
        let last = today().checked_sub_months(Months::new(6)).unwrap();
        let outcome = rule().validate(&employee_since(last), dec!(1)).unwrap();
        assert!(outcome.is_accepted());
    }

    #[test]
    fn test_five_months_twenty_nine_days_rejected() {
        let last = today()
            .checked_sub_months(Months::new(6))
            .and_then(|d| d.checked_add_days(Days::new(1)))
            .unwrap();
        assert_eq!(months_between(last, today()), 5);

        let outcome = rule().validate(&employee_since(last), dec!(1)).unwrap();
        assert_eq!(
            outcome.reason(),
            Some("adjustment interval must be at least 6 months")
        );
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, false)]
    #[case(5, false)]
    #[case(6, true)]
    #[case(7, true)]
    #[case(36, true)]
    fn test_months_elapsed(#[case] months: u32, #[case] accepted: bool) {
        let last = today().checked_sub_months(Months::new(months)).unwrap();
        let outcome = rule().validate(&employee_since(last), dec!(1)).unwrap();
        assert_eq!(outcome.is_accepted(), accepted);
    }

    #[test]
    fn test_future_adjustment_date_rejected() {
        let last = today().checked_add_months(Months::new(1)).unwrap();
        let outcome = rule().validate(&employee_since(last), dec!(1)).unwrap();
        assert!(!outcome.is_accepted());
    }

    #[test]
    fn test_custom_interval() {
        let rule = MinimumIntervalRule::new(12, Arc::new(FixedClock(today())));
        let last = today().checked_sub_months(Months::new(11)).unwrap();

        let outcome = rule.validate(&employee_since(last), dec!(1)).unwrap();
        assert_eq!(
            outcome.reason(),
            Some("adjustment interval must be at least 12 months")
        );
    }
}
