//! Report generation for adjustment outcomes
//!
//! CDD Principle: Anti-Corruption Layer - Formatters translate domain objects to external formats
//! - Receipts and rejections are converted to human or JSON representations
//! - Batch results are folded into an AdjustmentSummary
//! - Domain logic remains pure while supporting multiple presentation needs

use crate::domain::{AdjustmentError, AdjustmentReceipt, AdjustmentResult};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{json, Value as JsonValue};
use std::str::FromStr;

/// Supported output formats for adjustment reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable single-line format
    Human,
    /// JSON format for programmatic consumption
    Json,
}

impl OutputFormat {
    /// Get all available format names
    pub fn all_formats() -> &'static [&'static str] {
        &["human", "json"]
    }
}

impl FromStr for OutputFormat {
    type Err = AdjustmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(AdjustmentError::config(format!(
                "Unknown output format '{}'. Available: {}",
                other,
                Self::all_formats().join(", ")
            ))),
        }
    }
}

/// Counts over a batch of adjustment results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdjustmentSummary {
    /// Adjustments that passed every rule and were applied
    pub applied: usize,
    /// Adjustments refused by a rule
    pub rejected: usize,
    /// Adjustments aborted by a precondition or configuration fault
    pub failed: usize,
    /// Sum of all applied increases
    pub total_increase: Decimal,
}

impl AdjustmentSummary {
    /// Fold a batch of results into counts
    pub fn from_results(results: &[AdjustmentResult<AdjustmentReceipt>]) -> Self {
        let mut summary = Self::default();
        for result in results {
            summary.add(result);
        }
        summary
    }

    /// Count one result
    pub fn add(&mut self, result: &AdjustmentResult<AdjustmentReceipt>) {
        match result {
            Ok(receipt) => {
                self.applied += 1;
                self.total_increase += receipt.increase;
            }
            Err(e) if e.is_rejection() => self.rejected += 1,
            Err(_) => self.failed += 1,
        }
    }

    /// Total number of results counted
    pub fn total(&self) -> usize {
        self.applied + self.rejected + self.failed
    }

    /// Whether any result was a fault rather than an outcome
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Renders adjustment outcomes
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportFormatter;

impl ReportFormatter {
    /// Create a formatter
    pub fn new() -> Self {
        Self
    }

    /// Format one adjustment outcome
    pub fn format_outcome(
        &self,
        result: &AdjustmentResult<AdjustmentReceipt>,
        format: OutputFormat,
    ) -> AdjustmentResult<String> {
        match format {
            OutputFormat::Human => Ok(Self::human_line(result)),
            OutputFormat::Json => Self::to_json_string(&Self::outcome_json(result)),
        }
    }

    /// Format a batch of outcomes followed by its summary
    pub fn format_batch(
        &self,
        results: &[AdjustmentResult<AdjustmentReceipt>],
        format: OutputFormat,
    ) -> AdjustmentResult<String> {
        let summary = AdjustmentSummary::from_results(results);

        match format {
            OutputFormat::Human => {
                let mut output = String::new();
                for (index, result) in results.iter().enumerate() {
                    output.push_str(&format!("#{} {}\n", index + 1, Self::human_line(result)));
                }
                output.push_str(&format!(
                    "{} adjustments: {} applied, {} rejected, {} failed (total increase {})",
                    summary.total(),
                    summary.applied,
                    summary.rejected,
                    summary.failed,
                    summary.total_increase
                ));
                Ok(output)
            }
            OutputFormat::Json => {
                let outcomes: Vec<JsonValue> = results.iter().map(Self::outcome_json).collect();
                Self::to_json_string(&json!({
                    "outcomes": outcomes,
                    "summary": summary,
                }))
            }
        }
    }

    fn human_line(result: &AdjustmentResult<AdjustmentReceipt>) -> String {
        match result {
            Ok(receipt) => format!("applied: {}", receipt.format_display()),
            Err(AdjustmentError::Rejected { rule_id, reason }) => {
                format!("rejected by {rule_id}: {reason}")
            }
            Err(e) => format!("failed: {e}"),
        }
    }

    fn outcome_json(result: &AdjustmentResult<AdjustmentReceipt>) -> JsonValue {
        match result {
            Ok(receipt) => json!({ "status": "applied", "receipt": receipt }),
            Err(AdjustmentError::Rejected { rule_id, reason }) => json!({
                "status": "rejected",
                "rule_id": rule_id,
                "reason": reason,
            }),
            Err(e) => json!({ "status": "failed", "error": e.to_string() }),
        }
    }

    fn to_json_string(value: &JsonValue) -> AdjustmentResult<String> {
        serde_json::to_string_pretty(value)
            .map_err(|e| AdjustmentError::config(format!("Failed to serialize report: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn receipt() -> AdjustmentReceipt {
        AdjustmentReceipt {
            previous_salary: dec!(10000),
            new_salary: dec!(13000),
            increase: dec!(3000),
            effective_date: NaiveDate::from_ymd_opt(2024, 8, 15).unwrap(),
            rules_applied: vec!["minimum-interval".into(), "percentage-cap".into()],
        }
    }

    fn batch() -> Vec<AdjustmentResult<AdjustmentReceipt>> {
        vec![
            Ok(receipt()),
            Err(AdjustmentError::rejected(
                "percentage-cap",
                "increase exceeds 40% of current salary",
            )),
            Err(AdjustmentError::precondition("percentage cap requires a positive salary, got 0")),
        ]
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("human".parse::<OutputFormat>().unwrap(), OutputFormat::Human);
        assert!("sarif".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_summary_counts() {
        let summary = AdjustmentSummary::from_results(&batch());

        assert_eq!(summary.applied, 1);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.total_increase, dec!(3000));
        assert!(summary.has_failures());
    }

    #[test]
    fn test_human_outcome() {
        let formatter = ReportFormatter::new();
        let results = batch();

        let rejected = formatter.format_outcome(&results[1], OutputFormat::Human).unwrap();
        assert_eq!(rejected, "rejected by percentage-cap: increase exceeds 40% of current salary");

        let applied = formatter.format_outcome(&results[0], OutputFormat::Human).unwrap();
        assert!(applied.starts_with("applied: 10000 -> 13000"));
    }

    #[test]
    fn test_json_outcome() {
        let formatter = ReportFormatter::new();
        let json = formatter.format_outcome(&Ok(receipt()), OutputFormat::Json).unwrap();
        let parsed: JsonValue = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["status"], "applied");
        assert_eq!(parsed["receipt"]["new_salary"], "13000");
        assert_eq!(parsed["receipt"]["effective_date"], "2024-08-15");
    }

    #[test]
    fn test_batch_formats() {
        let formatter = ReportFormatter::new();

        let human = formatter.format_batch(&batch(), OutputFormat::Human).unwrap();
        assert!(human.contains("#3 failed: Precondition violated"));
        assert!(human.ends_with("3 adjustments: 1 applied, 1 rejected, 1 failed (total increase 3000)"));

        let json = formatter.format_batch(&batch(), OutputFormat::Json).unwrap();
        let parsed: JsonValue = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["outcomes"].as_array().unwrap().len(), 3);
        assert_eq!(parsed["outcomes"][1]["rule_id"], "percentage-cap");
        assert_eq!(parsed["summary"]["rejected"], 1);
    }
}
