//! Interest rate sources: balance tiers and conditional bonuses

mod bonus;
mod tiers;
pub mod loader;

pub use bonus::{evaluate_bonuses, AccountAgeWindow, BonusRule, MinContribution};
pub use tiers::{resolve_blended_rate, RateTier, TierPortion, TierSchedule};
pub use loader::{load_tiers, load_tiers_from_reader};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Base and bonus components of one month's annual rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateBreakdown {
    pub base: f64,
    pub bonus: f64,
}

impl RateBreakdown {
    /// Combined annual rate applied to the month
    pub fn combined(&self) -> f64 {
        self.base + self.bonus
    }
}

/// Everything that determines the rate earned in a month
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateSchedule {
    #[serde(default)]
    pub tiers: TierSchedule,
    #[serde(default)]
    pub bonuses: Vec<BonusRule>,
}

impl RateSchedule {
    pub fn new(tiers: TierSchedule, bonuses: Vec<BonusRule>) -> Self {
        Self { tiers, bonuses }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tiers.validate()?;
        for (index, rule) in self.bonuses.iter().enumerate() {
            rule.validate(index)?;
        }
        Ok(())
    }

    /// Rates for a month given the balance interest accrues on, the account age and
    /// the month's gross contribution
    pub fn rate_for_month(&self, balance: f64, account_age_months: u32, month_contribution: f64) -> RateBreakdown {
        RateBreakdown {
            base: self.tiers.resolve(balance),
            bonus: evaluate_bonuses(account_age_months, month_contribution, &self.bonuses),
        }
    }
}
