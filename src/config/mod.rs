//! Configuration loading and management for Salary Guardian
//!
//! Architecture: Anti-Corruption Layer - Configuration translates external YAML formats
//! - Raw YAML structures are converted to concrete rule instances
//! - Default configuration is embedded in the domain, not infrastructure
//! - Configuration acts as the composition root for the rule registry

use crate::clock::Clock;
use crate::domain::{AdjustmentError, AdjustmentResult};
use crate::rules::{
    MinimumIntervalRule, PercentageCapRule, RuleRegistry, MINIMUM_INTERVAL_RULE_ID,
    PERCENTAGE_CAP_RULE_ID,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

const SUPPORTED_VERSIONS: &[&str] = &["1.0"];

/// Main configuration structure for Salary Guardian
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustmentConfig {
    /// Configuration format version
    pub version: String,
    /// Identifier of the rule used by default-mode adjustments
    pub default_rule: String,
    /// Rules in evaluation order
    pub rules: Vec<RuleConfig>,
}

/// Individual rule configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Unique identifier for this rule
    pub id: String,
    /// Whether this rule is registered
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Rule kind and its parameters
    #[serde(flatten)]
    pub kind: RuleKind,
}

/// Kinds of rules that can be configured
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleKind {
    /// Cap on increase relative to current salary
    PercentageCap {
        #[serde(default = "default_max_ratio")]
        max_ratio: Decimal,
    },
    /// Minimum whole months since the last adjustment
    MinimumInterval {
        #[serde(default = "default_min_months")]
        min_months: u32,
    },
}

impl AdjustmentConfig {
    /// Load configuration from a YAML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> AdjustmentResult<Self> {
        let contents = fs::read_to_string(&path)?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            AdjustmentError::config(format!(
                "Failed to parse config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from string content
    pub fn load_from_str(content: &str) -> AdjustmentResult<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| AdjustmentError::config(format!("Failed to parse config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Built-in rule set: interval check first, then the percentage cap.
    /// The interval check is the default.
    pub fn with_defaults() -> Self {
        Self {
            version: "1.0".to_string(),
            default_rule: MINIMUM_INTERVAL_RULE_ID.to_string(),
            rules: vec![
                RuleConfig {
                    id: MINIMUM_INTERVAL_RULE_ID.to_string(),
                    enabled: true,
                    kind: RuleKind::MinimumInterval { min_months: default_min_months() },
                },
                RuleConfig {
                    id: PERCENTAGE_CAP_RULE_ID.to_string(),
                    enabled: true,
                    kind: RuleKind::PercentageCap { max_ratio: default_max_ratio() },
                },
            ],
        }
    }

    /// Validate the configuration for consistency and correctness
    pub fn validate(&self) -> AdjustmentResult<()> {
        if !SUPPORTED_VERSIONS.contains(&self.version.as_str()) {
            return Err(AdjustmentError::config(format!(
                "Unsupported configuration version: {}. Supported versions: {}",
                self.version,
                SUPPORTED_VERSIONS.join(", ")
            )));
        }

        let mut seen = HashSet::new();
        for rule in &self.rules {
            if !seen.insert(rule.id.as_str()) {
                return Err(AdjustmentError::config(format!("Duplicate rule ID '{}'", rule.id)));
            }

            if let RuleKind::PercentageCap { max_ratio } = rule.kind {
                if max_ratio <= Decimal::ZERO {
                    return Err(AdjustmentError::config(format!(
                        "Rule '{}' needs a positive max_ratio, got {}",
                        rule.id, max_ratio
                    )));
                }
            }
        }

        match self.rules.iter().find(|rule| rule.id == self.default_rule) {
            Some(rule) if rule.enabled => {}
            Some(_) => {
                return Err(AdjustmentError::config(format!(
                    "Default rule '{}' is disabled",
                    self.default_rule
                )))
            }
            None => {
                return Err(AdjustmentError::config(format!(
                    "Default rule '{}' is not defined",
                    self.default_rule
                )))
            }
        }

        Ok(())
    }

    /// Enabled rules in file order
    pub fn enabled_rules(&self) -> impl Iterator<Item = &RuleConfig> {
        self.rules.iter().filter(|rule| rule.enabled)
    }

    /// Instantiate the enabled rules into a registry
    pub fn build_registry(&self, clock: Arc<dyn Clock>) -> AdjustmentResult<RuleRegistry> {
        self.validate()?;

        let mut builder = RuleRegistry::builder().default_rule(self.default_rule.clone());
        for rule in self.enabled_rules() {
            tracing::debug!("Registering rule '{}' of type {:?}", rule.id, rule.kind);

            builder = match rule.kind {
                RuleKind::PercentageCap { max_ratio } => {
                    builder.register(rule.id.clone(), PercentageCapRule::new(max_ratio))
                }
                RuleKind::MinimumInterval { min_months } => builder.register(
                    rule.id.clone(),
                    MinimumIntervalRule::new(min_months, Arc::clone(&clock)),
                ),
            };
        }

        builder.build()
    }

    /// Convert to JSON for serialization
    pub fn to_json(&self) -> AdjustmentResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AdjustmentError::config(format!("Failed to serialize config: {e}")))
    }
}

impl Default for AdjustmentConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn default_true() -> bool {
    true
}

fn default_max_ratio() -> Decimal {
    Decimal::new(40, 2)
}

fn default_min_months() -> u32 {
    MinimumIntervalRule::DEFAULT_MIN_MONTHS
}

/// Configuration builder for programmatic construction
#[derive(Debug)]
pub struct ConfigBuilder {
    config: AdjustmentConfig,
}

impl ConfigBuilder {
    /// Create a new builder with no rules
    pub fn new() -> Self {
        Self {
            config: AdjustmentConfig {
                version: "1.0".to_string(),
                default_rule: String::new(),
                rules: Vec::new(),
            },
        }
    }

    /// Append a rule
    pub fn add_rule(mut self, id: impl Into<String>, kind: RuleKind) -> Self {
        self.config.rules.push(RuleConfig { id: id.into(), enabled: true, kind });
        self
    }

    /// Set the default rule identifier
    pub fn default_rule(mut self, id: impl Into<String>) -> Self {
        self.config.default_rule = id.into();
        self
    }

    /// Build the final configuration
    pub fn build(self) -> AdjustmentResult<AdjustmentConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock(NaiveDate::from_ymd_opt(2024, 8, 15).unwrap()))
    }

    #[test]
    fn test_default_config() {
        let config = AdjustmentConfig::default();
        config.validate().unwrap();

        let registry = config.build_registry(clock()).unwrap();
        assert_eq!(registry.ids(), vec!["minimum-interval", "percentage-cap"]);
        assert_eq!(registry.default_rule_id(), "minimum-interval");
    }

    #[test]
    fn test_load_from_str() {
        let yaml = r#"
version: "1.0"
default_rule: strict-cap
rules:
  - id: strict-cap
    type: percentage_cap
    max_ratio: "0.10"
  - id: yearly
    type: minimum_interval
    min_months: 12
  - id: legacy
    type: minimum_interval
    enabled: false
"#;
        let config = AdjustmentConfig::load_from_str(yaml).unwrap();

        assert_eq!(config.rules[0].kind, RuleKind::PercentageCap { max_ratio: dec!(0.10) });
        assert_eq!(config.rules[1].kind, RuleKind::MinimumInterval { min_months: 12 });
        assert_eq!(config.rules[2].kind, RuleKind::MinimumInterval { min_months: 6 });

        let registry = config.build_registry(clock()).unwrap();
        assert_eq!(registry.ids(), vec!["strict-cap", "yearly"]);
        assert_eq!(registry.default_rule_id(), "strict-cap");
    }

    #[test]
    fn test_load_from_file() {
        let yaml = serde_yaml::to_string(&AdjustmentConfig::default()).unwrap();
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = AdjustmentConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.default_rule, "minimum-interval");
        assert_eq!(config.rules.len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let err = AdjustmentConfig::load_from_file("/nonexistent/salary_guardian.yaml").unwrap_err();
        assert!(matches!(
            err,
            AdjustmentError::Io { ref source } if source.kind() == std::io::ErrorKind::NotFound
        ));
    }

    #[test]
    fn test_validation_failures() {
        let bad_version = "version: \"2.0\"\ndefault_rule: a\nrules: []\n";
        assert!(AdjustmentConfig::load_from_str(bad_version)
            .unwrap_err()
            .to_string()
            .contains("Unsupported configuration version"));

        let duplicate = ConfigBuilder::new()
            .add_rule("a", RuleKind::MinimumInterval { min_months: 6 })
            .add_rule("a", RuleKind::PercentageCap { max_ratio: dec!(0.4) })
            .default_rule("a")
            .build();
        assert!(duplicate.unwrap_err().to_string().contains("Duplicate rule ID 'a'"));

        let zero_cap = ConfigBuilder::new()
            .add_rule("cap", RuleKind::PercentageCap { max_ratio: Decimal::ZERO })
            .default_rule("cap")
            .build();
        assert!(zero_cap.is_err());

        let undefined_default = ConfigBuilder::new()
            .add_rule("cap", RuleKind::PercentageCap { max_ratio: dec!(0.4) })
            .default_rule("interval")
            .build();
        assert!(undefined_default.unwrap_err().to_string().contains("is not defined"));

        let mut disabled_default = AdjustmentConfig::default();
        disabled_default.rules[0].enabled = false;
        assert!(disabled_default.validate().unwrap_err().to_string().contains("is disabled"));
    }

    #[test]
    fn test_builder_debug() {
        let builder = ConfigBuilder::new()
            .add_rule("cap", RuleKind::PercentageCap { max_ratio: dec!(0.4) })
            .default_rule("cap");

        let debug = format!("{builder:?}");
        assert!(debug.contains("ConfigBuilder"));
        assert!(debug.contains("\"cap\""));
    }

    #[test]
    fn test_to_json() {
        let json = AdjustmentConfig::default().to_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["default_rule"], "minimum-interval");
        assert_eq!(parsed["rules"][0]["type"], "minimum_interval");
        assert_eq!(parsed["rules"][1]["max_ratio"], "0.40");
    }
}
