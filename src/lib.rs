//! Savings Projection - deterministic month-by-month balance projection engine
//!
//! This library provides:
//! - Blended base rates from balance-banded interest tiers
//! - Stackable bonus-interest rules (minimum contribution, account age window)
//! - Monthly projections with running interest and contribution totals
//! - Batch runs of independent scenarios in parallel

pub mod error;
pub mod rates;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use error::{ConfigError, LoadError};
pub use rates::{BonusRule, RateSchedule, RateTier, TierSchedule};
pub use projection::{run, MonthData, ProjectionConfig, ProjectionEngine, ProjectionResult};
pub use scenario::ScenarioRunner;
