//! Core projection engine for monthly balance projections

use super::cashflows::{InMonth, MonthData, MonthTotals, ProjectionResult};
use super::config::ProjectionConfig;
use super::state::ProjectionState;
use crate::error::ConfigError;

/// Annual rates are prorated evenly across the months of a year
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Upper bound on months reserved up front; longer horizons grow the Vec as they go
const MAX_PREALLOCATED_MONTHS: u32 = 1200;

/// Main projection engine
///
/// Holds a configuration that has already passed validation, so projecting
/// cannot fail.
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
    months: u32,
}

impl ProjectionEngine {
    /// Validate `config` and build an engine for it
    pub fn new(config: ProjectionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let months = config.months()?;
        Ok(Self { config, months })
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Run the full horizon: exactly `period` months, each starting from the
    /// previous month's ending balance
    ///
    /// Every month is kept in memory, so callers should bound `period` to a
    /// realistic horizon.
    pub fn project(&self) -> ProjectionResult {
        let mut result = ProjectionResult::with_capacity(self.preallocated_months());
        let mut state = ProjectionState::from_config(&self.config);

        for _ in 0..self.months {
            let month = self.step(&state);
            state.advance(&month);
            result.add_month(month);
        }

        log::debug!(
            "Projected {} months: initial {:.2} -> final {:.2}",
            self.months,
            self.config.initial_balance,
            state.starting_balance
        );
        if !state.starting_balance.is_finite() {
            log::warn!(
                "Projection produced a non-finite balance ({}) after {} months",
                state.starting_balance,
                self.months
            );
        }

        result
    }

    fn preallocated_months(&self) -> usize {
        self.months.min(MAX_PREALLOCATED_MONTHS) as usize
    }

    /// Project a single month from `state`
    ///
    /// The net contribution lands before interest accrues. A negative balance is
    /// carried as-is and accrues at the same combined rate.
    pub fn step(&self, state: &ProjectionState) -> MonthData {
        let net_contribution = self.config.net_contribution();
        let balance_after_contribution = state.starting_balance + net_contribution;

        let rates = self.config.rates.rate_for_month(
            balance_after_contribution,
            state.account_age_months,
            self.config.contribution,
        );
        let annual_rate = rates.combined();

        let interest = balance_after_contribution * annual_rate / MONTHS_PER_YEAR;

        log::trace!(
            "Month {}: balance {:.2}, base {:.6} + bonus {:.6}",
            state.idx,
            balance_after_contribution,
            rates.base,
            rates.bonus
        );

        MonthData {
            idx: state.idx,
            starting_balance: state.starting_balance,
            ending_balance: balance_after_contribution + interest,
            total: MonthTotals {
                interest: state.total_interest + interest,
                invested: state.total_invested + net_contribution,
            },
            in_month: InMonth {
                interest,
                invested: net_contribution,
                rate: annual_rate,
            },
        }
    }
}

/// Validate `config` and project every month
pub fn run(config: &ProjectionConfig) -> Result<ProjectionResult, ConfigError> {
    let engine = ProjectionEngine::new(config.clone())?;
    Ok(engine.project())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::{BonusRule, RateTier, TierSchedule};
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn twelve_percent_config() -> ProjectionConfig {
        ProjectionConfig::new(1000.0, 100.0, 0.0, 2)
            .with_tiers(TierSchedule::new(vec![RateTier::new("a", 0.0, 0.12)]))
    }

    #[test]
    fn test_two_month_scenario() {
        let result = run(&twelve_percent_config()).expect("valid config");
        assert_eq!(result.len(), 2);

        let first = &result.months[0];
        assert_eq!(first.idx, 0);
        assert_relative_eq!(first.starting_balance, 1000.0);
        assert_relative_eq!(first.in_month.rate, 0.12);
        assert_relative_eq!(first.in_month.interest, 11.0, epsilon = 1e-9);
        assert_relative_eq!(first.in_month.invested, 100.0);
        assert_relative_eq!(first.ending_balance, 1111.0, epsilon = 1e-9);

        let second = &result.months[1];
        assert_eq!(second.idx, 1);
        assert_relative_eq!(second.starting_balance, 1111.0, epsilon = 1e-9);
        assert_relative_eq!(second.in_month.interest, 12.11, epsilon = 1e-9);
        assert_relative_eq!(second.ending_balance, 1223.11, epsilon = 1e-9);
        assert_relative_eq!(second.total.interest, 23.11, epsilon = 1e-9);
        assert_relative_eq!(second.total.invested, 200.0);
    }

    #[test]
    fn test_invalid_period_gives_no_result() {
        for period in [0, -3] {
            let config = ProjectionConfig { period, ..twelve_percent_config() };
            assert_eq!(run(&config), Err(ConfigError::InvalidPeriod { period }));
            assert!(ProjectionEngine::new(config).is_err());
        }
    }

    #[test]
    fn test_zero_rates_are_linear() {
        let config = ProjectionConfig::new(500.0, 75.0, 25.0, 36)
            .with_tiers(TierSchedule::new(vec![
                RateTier::new("a", 0.0, 0.0),
                RateTier::new("b", 1000.0, 0.0),
            ]))
            .with_bonus(BonusRule::min_contribution(0.0, 10.0));

        let result = run(&config).expect("valid config");
        for (n, month) in result.months.iter().enumerate() {
            assert_eq!(month.in_month.interest, 0.0);
            assert_eq!(month.ending_balance, 500.0 + (n as f64 + 1.0) * 50.0);
        }
    }

    #[test]
    fn test_bonus_window_follows_account_age() {
        let config = ProjectionConfig::new(1200.0, 0.0, 0.0, 4)
            .with_bonus(BonusRule::in_account_age(0.12, Some(1), Some(2)));

        let result = run(&config).expect("valid config");
        let rates: Vec<f64> = result.months.iter().map(|m| m.in_month.rate).collect();
        assert_eq!(rates, vec![0.0, 0.12, 0.12, 0.0]);
        assert_eq!(result.months[0].in_month.interest, 0.0);
        assert_relative_eq!(result.months[1].in_month.interest, 12.0, epsilon = 1e-9);
    }

    #[test]
    fn test_min_contribution_bonus_uses_gross_contribution() {
        // Net contribution is 0, but the gross contribution meets the threshold
        let config = ProjectionConfig::new(1200.0, 100.0, 100.0, 1)
            .with_bonus(BonusRule::min_contribution(0.12, 100.0));

        let month = run(&config).expect("valid config").months[0];
        assert_relative_eq!(month.in_month.rate, 0.12);
        assert_relative_eq!(month.in_month.interest, 12.0, epsilon = 1e-9);
    }

    #[test]
    fn test_negative_balance_accrues_at_combined_rate() {
        let config = ProjectionConfig::new(100.0, 0.0, 150.0, 3)
            .with_tiers(TierSchedule::flat(0.12))
            .with_bonus(BonusRule::in_account_age(0.05, None, None));

        let result = run(&config).expect("valid config");
        let first = &result.months[0];
        // Tier rate is 0 below zero balance, the bonus still applies
        assert_relative_eq!(first.in_month.rate, 0.05);
        assert_relative_eq!(first.in_month.interest, -50.0 * 0.05 / 12.0, epsilon = 1e-12);
        assert_relative_eq!(first.ending_balance, -50.0 - 50.0 * 0.05 / 12.0, epsilon = 1e-12);

        for month in &result.months {
            let balance = month.starting_balance + month.in_month.invested;
            assert!(balance < 0.0);
            assert_relative_eq!(month.in_month.interest, balance * 0.05 / 12.0, epsilon = 1e-12);
            assert_relative_eq!(month.ending_balance, balance + month.in_month.interest, epsilon = 1e-12);
        }
        assert!(result.months[2].total.interest < result.months[0].total.interest);
    }

    #[test]
    fn test_negative_balance_without_bonus_earns_nothing() {
        let config = ProjectionConfig::new(100.0, 0.0, 150.0, 2).with_tiers(TierSchedule::flat(0.12));

        let result = run(&config).expect("valid config");
        let endings: Vec<f64> = result.months.iter().map(|m| m.ending_balance).collect();
        assert_eq!(endings, vec![-50.0, -200.0]);
        assert!(result.months.iter().all(|m| m.in_month.interest == 0.0));
    }

    #[test]
    fn test_nan_initial_balance_flows_through() {
        let config = ProjectionConfig::new(f64::NAN, 100.0, 0.0, 3).with_tiers(TierSchedule::flat(0.12));
        assert!(config.validate().is_ok());

        let result = run(&config).expect("NaN is not a validation error");
        assert_eq!(result.len(), 3);
        assert!(result.months.iter().all(|m| m.ending_balance.is_nan()));
    }

    #[test]
    fn test_huge_period_does_not_reserve_every_month() {
        let config = ProjectionConfig { period: i64::from(u32::MAX), ..twelve_percent_config() };
        let engine = ProjectionEngine::new(config).expect("valid config");
        assert_eq!(engine.preallocated_months(), MAX_PREALLOCATED_MONTHS as usize);

        let short = ProjectionEngine::new(twelve_percent_config()).expect("valid config");
        assert_eq!(short.preallocated_months(), 2);
    }

    #[test]
    fn test_non_finite_values_propagate() {
        let config = ProjectionConfig::new(f64::MAX, 0.0, 0.0, 2).with_tiers(TierSchedule::flat(24.0));
        let result = run(&config).expect("valid config");
        assert_eq!(result.len(), 2);
        assert!(result.months.iter().all(|m| !m.ending_balance.is_finite()));
    }

    #[test]
    fn test_step_is_pure() {
        let engine = ProjectionEngine::new(twelve_percent_config()).expect("valid config");
        let state = ProjectionState::from_config(engine.config());
        assert_eq!(engine.step(&state), engine.step(&state));
    }

    #[test]
    fn test_same_config_same_result() {
        let config = twelve_percent_config()
            .with_bonus(BonusRule::in_account_age(0.004, Some(0), Some(5)));
        let config = ProjectionConfig { period: 60, ..config };
        assert_eq!(run(&config), run(&config));
    }

    fn arbitrary_config() -> impl Strategy<Value = ProjectionConfig> {
        (
            0u32..100_000,
            0u32..2_000,
            0u32..2_000,
            1i64..121,
            0u32..1_000,
            0u32..1_000,
            0u32..500,
        )
            .prop_map(|(initial, contribution, withdrawals, period, base_bp, upper_bp, bonus_bp)| {
                ProjectionConfig::new(initial as f64, contribution as f64, withdrawals as f64, period)
                    .with_tiers(TierSchedule::new(vec![
                        RateTier::new("base", 0.0, base_bp as f64 / 10_000.0),
                        RateTier::new("upper", 25_000.0, upper_bp as f64 / 10_000.0),
                    ]))
                    .with_bonus(BonusRule::min_contribution(bonus_bp as f64 / 10_000.0, 500.0))
                    .with_bonus(BonusRule::in_account_age(bonus_bp as f64 / 20_000.0, Some(0), Some(11)))
            })
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_sequence_invariants_hold(config in arbitrary_config()) {
            let result = run(&config).expect("generated configs are valid");
            prop_assert_eq!(result.len() as i64, config.period);

            let mut interest_sum = 0.0;
            let mut invested_sum = 0.0;
            for (i, month) in result.months.iter().enumerate() {
                prop_assert_eq!(month.idx as usize, i);
                let expected_start = if i == 0 {
                    config.initial_balance
                } else {
                    result.months[i - 1].ending_balance
                };
                prop_assert_eq!(month.starting_balance, expected_start);

                interest_sum += month.in_month.interest;
                invested_sum += month.in_month.invested;
                prop_assert!((month.total.interest - interest_sum).abs() <= 1e-6);
                prop_assert!((month.total.invested - invested_sum).abs() <= 1e-6);
            }
        }
    }
}
