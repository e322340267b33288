//! Projection engine for month-by-month balance projections

mod state;
mod engine;
mod cashflows;
mod config;

pub use state::ProjectionState;
pub use engine::{run, ProjectionEngine, MONTHS_PER_YEAR};
pub use cashflows::{InMonth, MonthData, MonthTotals, ProjectionResult, ProjectionSummary};
pub use config::ProjectionConfig;
