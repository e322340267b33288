//! AWS Lambda handler for running projections
//!
//! Accepts a projection configuration as the JSON event and returns every
//! projected month plus a summary. Validation failures come back in the
//! `error` field with no months.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use savings_projection::{
    projection::{self, MonthData, ProjectionConfig, ProjectionSummary},
    ConfigError,
};
use serde::Serialize;

/// Response body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResponse {
    pub months: Vec<MonthData>,
    pub summary: Option<ProjectionSummary>,
    pub execution_time_ms: u64,
    pub error: Option<String>,
}

impl ProjectionResponse {
    fn rejected(err: ConfigError) -> Self {
        Self {
            months: Vec::new(),
            summary: None,
            execution_time_ms: 0,
            error: Some(err.to_string()),
        }
    }
}

async fn handler(event: LambdaEvent<ProjectionConfig>) -> Result<ProjectionResponse, Error> {
    let start = std::time::Instant::now();
    let config = event.payload;
    log::info!(
        "Projection request: period={}, tiers={}, bonuses={}",
        config.period,
        config.rates.tiers.len(),
        config.rates.bonuses.len()
    );

    let result = match projection::run(&config) {
        Ok(result) => result,
        Err(err) => {
            log::warn!("Rejected projection request: {}", err);
            return Ok(ProjectionResponse::rejected(err));
        }
    };

    let summary = result.summary();
    Ok(ProjectionResponse {
        months: result.months,
        summary: Some(summary),
        execution_time_ms: start.elapsed().as_millis() as u64,
        error: None,
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_response_has_error_and_no_months() {
        let response = ProjectionResponse::rejected(ConfigError::InvalidPeriod { period: 0 });
        let json = serde_json::to_value(&response).expect("serialize");

        assert_eq!(json["months"], serde_json::json!([]));
        assert!(json["summary"].is_null());
        assert_eq!(
            json["error"],
            "Invalid period: expected a positive number of months, got 0"
        );
        assert_eq!(json["executionTimeMs"], 0);
    }
}
