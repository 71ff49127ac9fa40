//! Pricing service DTOs
//!
//! Shape of the `/aggregated/{region}/{ids}` response body. Only the fields
//! the appraiser reads are modelled; everything else is ignored.

use serde::Deserialize;

use crate::cache::Price;
use crate::catalog::ItemId;

/// Top-level response. A body without `results` fails to deserialize.
#[derive(Debug, Clone, Deserialize)]
pub struct AggregatedResponse {
    pub results: Vec<AggregatedResult>,
    /// Ids the service could not price
    #[serde(rename = "failedItems", default)]
    pub failed_items: Vec<ItemId>,
}

/// Aggregated market data for one item.
#[derive(Debug, Clone, Deserialize)]
pub struct AggregatedResult {
    #[serde(rename = "itemId")]
    pub item_id: ItemId,
    /// Normal-quality market data
    #[serde(default)]
    pub nq: QualityStats,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QualityStats {
    #[serde(rename = "averageSalePrice", default)]
    pub average_sale_price: ScopedPrices,
}

/// Average sale price at each scope the service publishes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScopedPrices {
    pub world: Option<PricePoint>,
    /// Data center (cross-world group)
    pub dc: Option<PricePoint>,
    pub region: Option<PricePoint>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PricePoint {
    pub price: f64,
}

impl AggregatedResult {
    /// Picks the data center average, falling back to the region average.
    ///
    /// Prices are truncated to whole units; non-finite or negative numbers
    /// count as absent.
    pub fn selected_price(&self) -> Option<Price> {
        let prices = &self.nq.average_sale_price;
        prices
            .dc
            .as_ref()
            .and_then(PricePoint::as_price)
            .or_else(|| prices.region.as_ref().and_then(PricePoint::as_price))
    }
}

impl PricePoint {
    fn as_price(&self) -> Option<Price> {
        if self.price.is_finite() && self.price >= 0.0 {
            Some(self.price.trunc() as Price)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> AggregatedResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_dc_price_preferred() {
        let resp = parse(
            r#"{"results": [{"itemId": 1, "nq": {"averageSalePrice": {
                "world": {"price": 10}, "dc": {"price": 200.9}, "region": {"price": 300}
            }}}]}"#,
        );
        assert_eq!(resp.results[0].selected_price(), Some(200));
    }

    #[test]
    fn test_region_fallback() {
        let resp = parse(
            r#"{"results": [{"itemId": 1, "nq": {"averageSalePrice": {
                "region": {"price": 300}
            }}}]}"#,
        );
        assert_eq!(resp.results[0].selected_price(), Some(300));
    }

    #[test]
    fn test_world_only_is_absent() {
        let resp = parse(
            r#"{"results": [{"itemId": 1, "nq": {"averageSalePrice": {
                "world": {"price": 10}
            }}}]}"#,
        );
        assert_eq!(resp.results[0].selected_price(), None);
    }

    #[test]
    fn test_negative_dc_price_falls_back() {
        let resp = parse(
            r#"{"results": [{"itemId": 1, "nq": {"averageSalePrice": {
                "dc": {"price": -5}, "region": {"price": 42}
            }}}]}"#,
        );
        assert_eq!(resp.results[0].selected_price(), Some(42));
    }

    #[test]
    fn test_missing_nq_is_absent() {
        let resp = parse(r#"{"results": [{"itemId": 9}], "failedItems": [3]}"#);
        assert_eq!(resp.results[0].selected_price(), None);
        assert_eq!(resp.failed_items, vec![3]);
    }

    #[test]
    fn test_missing_results_rejected() {
        let result = serde_json::from_str::<AggregatedResponse>(r#"{"error": "rate limited"}"#);
        assert!(result.is_err());
    }
}
