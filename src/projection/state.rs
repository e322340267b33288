//! State threaded from one projected month to the next

use super::cashflows::MonthData;
use super::config::ProjectionConfig;

/// Account state at the start of a month
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionState {
    /// Zero-based index of the month about to be projected
    pub idx: u32,

    /// Whole months since the first projected month
    pub account_age_months: u32,

    /// Balance carried in from the previous month
    pub starting_balance: f64,

    /// Interest earned in all prior months
    pub total_interest: f64,

    /// Net contributions made in all prior months
    pub total_invested: f64,
}

impl ProjectionState {
    /// State before month 0
    pub fn from_config(config: &ProjectionConfig) -> Self {
        Self {
            idx: 0,
            account_age_months: 0,
            starting_balance: config.initial_balance,
            total_interest: 0.0,
            total_invested: 0.0,
        }
    }

    /// Roll forward past a completed month
    pub fn advance(&mut self, month: &MonthData) {
        self.idx = month.idx + 1;
        self.account_age_months = self.idx;
        self.starting_balance = month.ending_balance;
        self.total_interest = month.total.interest;
        self.total_invested = month.total.invested;
    }
}
