//! CSV-based tier table loader
//!
//! Expected header: `tier_id,min,rate`, one row per band.

use std::io::Read;
use std::path::Path;

use csv::Reader;

use super::tiers::{RateTier, TierSchedule};
use crate::error::LoadError;

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct TierRow {
    tier_id: String,
    min: f64,
    rate: f64,
}

impl From<TierRow> for RateTier {
    fn from(row: TierRow) -> Self {
        RateTier::new(row.tier_id, row.min, row.rate)
    }
}

/// Load a tier schedule from a CSV file and check its ordering
pub fn load_tiers<P: AsRef<Path>>(path: P) -> Result<TierSchedule, LoadError> {
    let reader = Reader::from_path(path.as_ref())?;
    let schedule = collect_tiers(reader)?;
    log::debug!(
        "Loaded {} tiers from {}",
        schedule.len(),
        path.as_ref().display()
    );
    Ok(schedule)
}

/// Load a tier schedule from any reader (e.g., string buffer, request body)
pub fn load_tiers_from_reader<R: Read>(reader: R) -> Result<TierSchedule, LoadError> {
    collect_tiers(Reader::from_reader(reader))
}

fn collect_tiers<R: Read>(mut reader: Reader<R>) -> Result<TierSchedule, LoadError> {
    let mut tiers = Vec::new();
    for result in reader.deserialize() {
        let row: TierRow = result?;
        tiers.push(RateTier::from(row));
    }

    let schedule = TierSchedule::new(tiers);
    schedule.validate()?;
    Ok(schedule)
}
