//! Balance-banded interest tiers and blended rate resolution

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A balance band and the annual rate earned on the portion of balance inside it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateTier {
    /// Lower bound of the band (inclusive)
    pub min: f64,
    /// Annual fractional rate (0.05 = 5%/year)
    pub rate: f64,
    pub tier_id: String,
}

impl RateTier {
    pub fn new(tier_id: impl Into<String>, min: f64, rate: f64) -> Self {
        Self {
            min,
            rate,
            tier_id: tier_id.into(),
        }
    }
}

/// Portion of a balance that falls inside one tier's band
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierPortion {
    pub tier_id: String,
    pub portion: f64,
    pub rate: f64,
}

impl TierPortion {
    /// Annual interest earned by this portion alone
    pub fn annual_interest(&self) -> f64 {
        self.portion * self.rate
    }
}

/// Tiers sorted ascending by `min`
///
/// The last tier's band extends to infinity. Balance below the lowest `min`
/// sits outside every band and earns nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierSchedule {
    tiers: Vec<RateTier>,
}

impl TierSchedule {
    pub fn new(tiers: Vec<RateTier>) -> Self {
        Self { tiers }
    }

    /// Single tier paying `rate` on the whole balance
    pub fn flat(rate: f64) -> Self {
        Self::new(vec![RateTier::new("flat", 0.0, rate)])
    }

    pub fn tiers(&self) -> &[RateTier] {
        &self.tiers
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Check mins are strictly ascending (which also rules out duplicates)
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, pair) in self.tiers.windows(2).enumerate() {
            let (previous, current) = (&pair[0], &pair[1]);
            // Negated so NaN mins are rejected too
            if !(current.min > previous.min) {
                return Err(ConfigError::InvalidTierOrdering {
                    index: index + 1,
                    previous_min: previous.min,
                    min: current.min,
                });
            }
        }
        Ok(())
    }

    /// Split `balance` across the tier bands
    ///
    /// Bands that receive none of the balance are left out.
    pub fn allocate(&self, balance: f64) -> Vec<TierPortion> {
        band_portions(balance, &self.tiers)
            .map(|(tier, portion)| TierPortion {
                tier_id: tier.tier_id.clone(),
                portion,
                rate: tier.rate,
            })
            .collect()
    }

    /// Blended annual rate: sum of portion * rate over the bands, divided by balance
    pub fn resolve(&self, balance: f64) -> f64 {
        resolve_blended_rate(balance, &self.tiers)
    }
}

/// Blended base annual rate for `balance` over `tiers`
///
/// Returns 0 for a non-positive balance or an empty tier list.
pub fn resolve_blended_rate(balance: f64, tiers: &[RateTier]) -> f64 {
    if balance <= 0.0 || tiers.is_empty() {
        return 0.0;
    }

    let weighted: f64 = band_portions(balance, tiers)
        .map(|(tier, portion)| portion * tier.rate)
        .sum();

    weighted / balance
}

/// Each tier paired with the part of `balance` inside `[min, next.min)`
fn band_portions(balance: f64, tiers: &[RateTier]) -> impl Iterator<Item = (&RateTier, f64)> {
    tiers
        .iter()
        .enumerate()
        .take_while(move |(_, tier)| balance > tier.min)
        .filter_map(move |(i, tier)| {
            let upper = tiers.get(i + 1).map(|next| next.min).unwrap_or(f64::INFINITY);
            let portion = balance.min(upper) - tier.min.max(0.0);
            (portion > 0.0).then_some((tier, portion))
        })
}
