//! Projection configuration and its validation

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, LoadError};
use crate::rates::{BonusRule, RateSchedule, TierSchedule};

/// Immutable input to a projection run
///
/// Wire shape (JSON):
/// `{"initialBalance", "contribution", "withdrawals", "period", "tiers", "bonuses"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionConfig {
    /// Starting principal
    pub initial_balance: f64,

    /// Amount added every month
    #[serde(default)]
    pub contribution: f64,

    /// Amount removed every month
    #[serde(default)]
    pub withdrawals: f64,

    /// Number of months to project
    /// Signed so that zero and negative inputs reach validation
    pub period: i64,

    /// Balance tiers and bonus rules
    #[serde(flatten)]
    pub rates: RateSchedule,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            initial_balance: 0.0,
            contribution: 0.0,
            withdrawals: 0.0,
            period: 12,
            rates: RateSchedule::default(),
        }
    }
}

impl ProjectionConfig {
    pub fn new(initial_balance: f64, contribution: f64, withdrawals: f64, period: i64) -> Self {
        Self {
            initial_balance,
            contribution,
            withdrawals,
            period,
            rates: RateSchedule::default(),
        }
    }

    pub fn with_tiers(mut self, tiers: TierSchedule) -> Self {
        self.rates.tiers = tiers;
        self
    }

    pub fn with_bonus(mut self, rule: BonusRule) -> Self {
        self.rates.bonuses.push(rule);
        self
    }

    /// Contribution minus withdrawals; negative means a net outflow
    pub fn net_contribution(&self) -> f64 {
        self.contribution - self.withdrawals
    }

    /// Horizon in months, or `InvalidPeriod` when it is not a positive `u32`
    pub fn months(&self) -> Result<u32, ConfigError> {
        u32::try_from(self.period)
            .ok()
            .filter(|&months| months > 0)
            .ok_or(ConfigError::InvalidPeriod { period: self.period })
    }

    /// Check the whole configuration; the first problem found is returned
    ///
    /// Order: period, initial balance, tiers, bonuses.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.months()?;

        if self.initial_balance < 0.0 {
            return Err(ConfigError::NegativeInitialBalance {
                initial_balance: self.initial_balance,
            });
        }

        self.rates.validate()
    }

    /// Parse and validate a configuration from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a configuration from a JSON file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }
}
