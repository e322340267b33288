//! Conditional bonus-interest rules

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Threshold for a minimum-contribution bonus
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinContribution {
    pub amount: f64,
}

/// Inclusive account-age window in months; a missing bound is open on that side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountAgeWindow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_month: Option<u32>,
}

impl AccountAgeWindow {
    pub fn contains(&self, account_age_months: u32) -> bool {
        self.min_month.map_or(true, |min| account_age_months >= min)
            && self.max_month.map_or(true, |max| account_age_months <= max)
    }
}

/// Additional annual rate granted for a month when its condition holds
///
/// Serialized with a `type` tag, e.g.
/// `{"type": "MIN_CONTRIBUTION", "rate": 0.01, "data": {"amount": 100}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BonusRule {
    /// Month's contribution is at least `data.amount`
    MinContribution { rate: f64, data: MinContribution },
    /// Account age falls inside `data`
    InAccountAge { rate: f64, data: AccountAgeWindow },
}

impl BonusRule {
    pub fn min_contribution(rate: f64, amount: f64) -> Self {
        BonusRule::MinContribution {
            rate,
            data: MinContribution { amount },
        }
    }

    pub fn in_account_age(rate: f64, min_month: Option<u32>, max_month: Option<u32>) -> Self {
        BonusRule::InAccountAge {
            rate,
            data: AccountAgeWindow { min_month, max_month },
        }
    }

    pub fn rate(&self) -> f64 {
        match self {
            BonusRule::MinContribution { rate, .. } | BonusRule::InAccountAge { rate, .. } => *rate,
        }
    }

    /// Whether this rule grants its rate for a month with the given state
    pub fn applies(&self, account_age_months: u32, month_contribution: f64) -> bool {
        match self {
            BonusRule::MinContribution { data, .. } => month_contribution >= data.amount,
            BonusRule::InAccountAge { data, .. } => data.contains(account_age_months),
        }
    }

    /// Reject inverted age windows; `index` is the rule's position for error reporting
    pub fn validate(&self, index: usize) -> Result<(), ConfigError> {
        match self {
            BonusRule::MinContribution { .. } => Ok(()),
            BonusRule::InAccountAge { data, .. } => match (data.min_month, data.max_month) {
                (Some(min_month), Some(max_month)) if min_month > max_month => {
                    Err(ConfigError::InvalidBonusRange {
                        index,
                        min_month,
                        max_month,
                    })
                }
                _ => Ok(()),
            },
        }
    }
}

/// Sum of the rates of every rule whose condition holds this month
///
/// Rules stack; there is no precedence between them.
pub fn evaluate_bonuses(account_age_months: u32, month_contribution: f64, bonuses: &[BonusRule]) -> f64 {
    bonuses
        .iter()
        .filter(|rule| rule.applies(account_age_months, month_contribution))
        .map(BonusRule::rate)
        .sum()
}
