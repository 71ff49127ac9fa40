//! Universalis Client
//!
//! HTTP implementation of [`PriceSource`] against the aggregated market endpoint.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use tracing::debug;

use super::{check_batch_size, PriceSource};
use crate::cache::Price;
use crate::catalog::ItemId;
use crate::config::Config;
use crate::error::{AppraiseError, Result};
use crate::models::AggregatedResponse;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Market price client bound to one data center or region.
#[derive(Debug, Clone)]
pub struct UniversalisClient {
    client: Client,
    base: Url,
    region: String,
}

impl UniversalisClient {
    // == Constructor ==
    pub fn new(base_url: &str, region: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| AppraiseError::Config(format!("invalid base URL '{}': {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(AppraiseError::Config(format!(
                "base URL '{}' cannot carry a path",
                base_url
            )));
        }

        let region = region.into();
        if region.trim().is_empty() {
            return Err(AppraiseError::Config("region must not be empty".to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppraiseError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base,
            region,
        })
    }

    /// Creates a client from configuration for the given region.
    pub fn from_config(config: &Config, region: &str) -> Result<Self> {
        Self::new(
            &config.base_url,
            region,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Builds `{base}/aggregated/{region}/{id,id,...}`.
    fn endpoint(&self, item_ids: &[ItemId]) -> Result<Url> {
        let ids = item_ids
            .iter()
            .map(ItemId::to_string)
            .collect::<Vec<_>>()
            .join(",");

        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| AppraiseError::Config(format!("base URL '{}' cannot carry a path", self.base)))?
            .pop_if_empty()
            .push("aggregated")
            .push(&self.region)
            .push(&ids);
        Ok(url)
    }
}

#[async_trait]
impl PriceSource for UniversalisClient {
    async fn fetch_batch(&self, item_ids: &[ItemId]) -> Result<HashMap<ItemId, Price>> {
        check_batch_size(item_ids)?;
        let url = self.endpoint(item_ids)?;
        debug!("Requesting {} prices from {}", item_ids.len(), url);

        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| AppraiseError::RemoteUnavailable(format!("request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| AppraiseError::RemoteUnavailable(format!("non-success status: {}", e)))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| AppraiseError::RemoteUnavailable(format!("read body failed: {}", e)))?;

        let parsed: AggregatedResponse = serde_json::from_slice(&body).map_err(|e| {
            AppraiseError::RemoteUnavailable(format!("unexpected response from {}: {}", url, e))
        })?;

        if !parsed.failed_items.is_empty() {
            debug!("Service reported {} unpriceable items", parsed.failed_items.len());
        }

        let requested: HashSet<ItemId> = item_ids.iter().copied().collect();
        let mut prices = HashMap::with_capacity(parsed.results.len());
        for result in &parsed.results {
            if !requested.contains(&result.item_id) {
                debug!("Ignoring unrequested item {} in response", result.item_id);
                continue;
            }
            if let Some(price) = result.selected_price() {
                prices.insert(result.item_id, price);
            }
        }

        Ok(prices)
    }
}
