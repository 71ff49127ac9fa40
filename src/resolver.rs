//! Price Resolver
//!
//! Serves what it can from the price cache, fetches the rest from the remote
//! source in service-sized chunks, and writes fresh observations back.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::cache::{Price, PriceCache, PriceRecord};
use crate::catalog::{ItemCatalog, ItemId};
use crate::error::Result;
use crate::remote::{PriceSource, MAX_BATCH_SIZE};

/// Prices resolved for one batch. A missing key means the price is unknown.
pub type ResolvedPriceMap = HashMap<ItemId, Price>;

/// What to do when a remote chunk fails with `RemoteUnavailable`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RemoteFailurePolicy {
    /// Leave the chunk's ids unresolved and carry on
    #[default]
    Degrade,
    /// Propagate the error and stop the run
    Abort,
}

// == Price Resolver ==
pub struct PriceResolver<'a, S: PriceSource + ?Sized> {
    source: &'a S,
    catalog: &'a ItemCatalog,
    request_delay: Duration,
    failure_policy: RemoteFailurePolicy,
}

impl<'a, S: PriceSource + ?Sized> PriceResolver<'a, S> {
    pub fn new(source: &'a S, catalog: &'a ItemCatalog) -> Self {
        Self {
            source,
            catalog,
            request_delay: Duration::ZERO,
            failure_policy: RemoteFailurePolicy::default(),
        }
    }

    /// Pause inserted between consecutive remote calls.
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    pub fn with_failure_policy(mut self, policy: RemoteFailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    // == Resolve ==
    /// Resolves prices for `item_ids` as of `now`.
    ///
    /// Duplicate ids are resolved once. Ids the remote source has no price
    /// for are absent from the result. Remote chunks run strictly one after
    /// another.
    pub async fn resolve(
        &self,
        item_ids: &[ItemId],
        cache: &mut PriceCache,
        now: DateTime<Utc>,
    ) -> Result<ResolvedPriceMap> {
        let mut resolved = ResolvedPriceMap::new();
        if item_ids.is_empty() {
            return Ok(resolved);
        }

        let timestamp = now.timestamp();
        let mut seen = HashSet::with_capacity(item_ids.len());
        let mut misses = Vec::new();
        for &id in item_ids {
            if !seen.insert(id) {
                continue;
            }
            match cache.lookup(id, timestamp) {
                Some(price) => {
                    resolved.insert(id, price);
                }
                None => misses.push(id),
            }
        }

        if misses.is_empty() {
            return Ok(resolved);
        }

        let chunk_count = misses.len().div_ceil(MAX_BATCH_SIZE);
        info!(
            "Fetching {} prices from remote source in {} batch(es)",
            misses.len(),
            chunk_count
        );

        for (index, chunk) in misses.chunks(MAX_BATCH_SIZE).enumerate() {
            if index > 0 && !self.request_delay.is_zero() {
                tokio::time::sleep(self.request_delay).await;
            }

            let prices = match self.source.fetch_batch(chunk).await {
                Ok(prices) => prices,
                Err(e) if e.is_fatal() || self.failure_policy == RemoteFailurePolicy::Abort => {
                    return Err(e);
                }
                Err(e) => {
                    warn!(
                        "Batch {}/{} failed, {} items left unpriced: {}",
                        index + 1,
                        chunk_count,
                        chunk.len(),
                        e
                    );
                    continue;
                }
            };

            for &id in chunk {
                let Some(&price) = prices.get(&id) else {
                    continue;
                };
                let Some(name) = self.catalog.name_of(id) else {
                    warn!("Item {} has no catalog name, skipping its price", id);
                    continue;
                };
                cache.upsert(PriceRecord::new(id, name, price, timestamp));
                resolved.insert(id, price);
            }
        }

        Ok(resolved)
    }
}
