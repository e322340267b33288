//! Error types for configuration validation and loading

use thiserror::Error;

/// Reasons a projection configuration is rejected before any month is projected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid period: expected a positive number of months, got {period}")]
    InvalidPeriod { period: i64 },

    #[error("Invalid tier ordering at index {index}: min {min} must be greater than previous min {previous_min}")]
    InvalidTierOrdering {
        index: usize,
        previous_min: f64,
        min: f64,
    },

    #[error("Invalid bonus range at index {index}: minMonth {min_month} > maxMonth {max_month}")]
    InvalidBonusRange {
        index: usize,
        min_month: u32,
        max_month: u32,
    },

    #[error("Initial balance must be non-negative, got {initial_balance}")]
    NegativeInitialBalance { initial_balance: f64 },
}

/// Failures reading configuration or rate tables from disk
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Invalid(#[from] ConfigError),
}
