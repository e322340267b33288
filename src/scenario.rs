//! Scenario runner for batch projections
//!
//! Holds a base configuration and runs variants of it. Each run owns its own
//! configuration, so independent runs execute in parallel without coordination.

use rayon::prelude::*;

use crate::error::ConfigError;
use crate::projection::{run, ProjectionConfig, ProjectionResult};

/// Runs many independent projections derived from a base configuration
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(base_config);
///
/// // Compare monthly contributions
/// let results = runner.sweep_contributions(&[100.0, 250.0, 500.0]);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_config: ProjectionConfig,
}

impl ScenarioRunner {
    pub fn new(base_config: ProjectionConfig) -> Self {
        Self { base_config }
    }

    /// Run the base configuration alone
    pub fn run(&self) -> Result<ProjectionResult, ConfigError> {
        run(&self.base_config)
    }

    /// Run every configuration in parallel; results keep the input order
    pub fn run_scenarios(&self, configs: &[ProjectionConfig]) -> Vec<Result<ProjectionResult, ConfigError>> {
        log::debug!("Running {} scenarios", configs.len());
        configs.par_iter().map(run).collect()
    }

    /// Base configuration with each monthly contribution in turn
    pub fn sweep_contributions(&self, contributions: &[f64]) -> Vec<Result<ProjectionResult, ConfigError>> {
        let configs: Vec<ProjectionConfig> = contributions
            .iter()
            .map(|&contribution| ProjectionConfig {
                contribution,
                ..self.base_config.clone()
            })
            .collect();
        self.run_scenarios(&configs)
    }

    /// Base configuration over each horizon in turn
    pub fn sweep_periods(&self, periods: &[i64]) -> Vec<Result<ProjectionResult, ConfigError>> {
        let configs: Vec<ProjectionConfig> = periods
            .iter()
            .map(|&period| ProjectionConfig {
                period,
                ..self.base_config.clone()
            })
            .collect();
        self.run_scenarios(&configs)
    }

    pub fn base_config(&self) -> &ProjectionConfig {
        &self.base_config
    }

    pub fn base_config_mut(&mut self) -> &mut ProjectionConfig {
        &mut self.base_config
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new(ProjectionConfig::default())
    }
}
