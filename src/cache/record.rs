//! Price Record Module
//!
//! Defines a single cached price observation with freshness checks.

use serde::{Deserialize, Serialize};

use crate::catalog::ItemId;

/// Price in the game's currency unit.
pub type Price = u64;

// == Price Record ==
/// One cached price observation. Serialized as `{id, name, price, timestamp}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Item the price belongs to
    #[serde(rename = "id")]
    pub item_id: ItemId,
    /// Display name, kept for reporting only
    #[serde(rename = "name")]
    pub display_name: String,
    /// Observed price
    pub price: Price,
    /// Observation time (Unix seconds)
    #[serde(rename = "timestamp")]
    pub observed_at: i64,
}

impl PriceRecord {
    // == Constructor ==
    pub fn new(item_id: ItemId, display_name: impl Into<String>, price: Price, observed_at: i64) -> Self {
        Self {
            item_id,
            display_name: display_name.into(),
            price,
            observed_at,
        }
    }

    // == Is Fresh ==
    /// Checks if the record is still usable at `now`.
    ///
    /// Boundary condition: a record observed exactly `max_age_secs` ago is
    /// still fresh; one second older is stale. Timestamps far enough in the
    /// past to overflow the subtraction count as stale.
    pub fn is_fresh(&self, now: i64, max_age_secs: i64) -> bool {
        now.saturating_sub(self.observed_at) <= max_age_secs
    }

    // == Age ==
    /// Seconds elapsed since the observation, clamped at zero.
    pub fn age_secs(&self, now: i64) -> i64 {
        now.saturating_sub(self.observed_at).max(0)
    }
}
