//! Appraisal Orchestration
//!
//! Maps housing list lines to catalog ids, resolves their prices chunk by
//! chunk and totals the result.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::aggregate::{aggregate, PricedLine, Totals};
use crate::cache::{CacheStats, Price, PriceCache};
use crate::catalog::{ItemCatalog, ItemId};
use crate::config::Config;
use crate::error::{AppraiseError, Result};
use crate::housing::{read_housing_list, LineItem};
use crate::remote::{PriceSource, UniversalisClient, MAX_BATCH_SIZE};
use crate::resolver::{PriceResolver, RemoteFailurePolicy};

/// Outcome of pricing one housing list.
#[derive(Debug, Clone)]
pub struct Appraisal {
    /// Data center or region the prices come from
    pub region: String,
    pub cutoff: Price,
    pub priced: PricedList,
    pub cache_stats: CacheStats,
}

/// Lines of one list with their prices and totals.
#[derive(Debug, Clone, Default)]
pub struct PricedList {
    /// Catalogued lines with their resolved price, in list order
    pub lines: Vec<PricedLine>,
    pub totals: Totals,
    /// Line names with no catalog entry
    pub unknown_names: Vec<String>,
}

// == Appraiser ==
pub struct Appraiser<'a, S: PriceSource + ?Sized> {
    catalog: &'a ItemCatalog,
    resolver: PriceResolver<'a, S>,
}

impl<'a, S: PriceSource + ?Sized> Appraiser<'a, S> {
    pub fn new(source: &'a S, catalog: &'a ItemCatalog, config: &Config) -> Self {
        let policy = if config.abort_on_remote_error {
            RemoteFailurePolicy::Abort
        } else {
            RemoteFailurePolicy::Degrade
        };
        let resolver = PriceResolver::new(source, catalog)
            .with_request_delay(Duration::from_millis(config.request_delay_ms))
            .with_failure_policy(policy);

        Self { catalog, resolver }
    }

    /// Prices `items` against `cache` as of `now`.
    pub async fn appraise(
        &self,
        items: &[LineItem],
        cache: &mut PriceCache,
        cutoff: Price,
        now: DateTime<Utc>,
    ) -> Result<PricedList> {
        let mut unknown_names = Vec::new();
        let mut mapped: Vec<(&LineItem, ItemId)> = Vec::with_capacity(items.len());
        for item in items {
            match self.catalog.id_of(&item.name) {
                Some(id) => mapped.push((item, id)),
                None => {
                    warn!("{}", AppraiseError::UnknownItemName(item.name.clone()));
                    unknown_names.push(item.name.clone());
                }
            }
        }

        let mut lines = Vec::with_capacity(mapped.len());
        for chunk in mapped.chunks(MAX_BATCH_SIZE) {
            let ids: Vec<ItemId> = chunk.iter().map(|(_, id)| *id).collect();
            let resolved = self.resolver.resolve(&ids, cache, now).await?;
            for (item, id) in chunk {
                lines.push(PricedLine::new(
                    item.name.clone(),
                    item.quantity,
                    resolved.get(id).copied(),
                ));
            }
        }

        let totals = aggregate(&lines, cutoff);
        Ok(PricedList {
            lines,
            totals,
            unknown_names,
        })
    }
}

/// Prices a saved housing list end to end and persists the cache.
///
/// Fails before any remote work when the homes directory or list is missing,
/// the catalog cannot be read, or the cache is corrupt. The cache is written
/// only after a successful appraisal.
pub async fn appraise_list(
    config: &Config,
    list_name: &str,
    region: &str,
    cutoff: Price,
) -> Result<Appraisal> {
    if !config.homes_dir.is_dir() {
        return Err(AppraiseError::SaveDirMissing(
            config.homes_dir.display().to_string(),
        ));
    }
    let items = read_housing_list(&config.homes_dir.join(list_name))?;
    info!("Read {} lines from {}", items.len(), list_name);

    let catalog = ItemCatalog::load(&config.items_db_path())?;
    let cache_path = config.price_cache_path();
    let mut cache = PriceCache::load(&cache_path, config.price_max_age_secs)?;
    info!(
        "Loaded {} cached prices, fresh for {}s",
        cache.len(),
        cache.max_age_secs()
    );

    let client = UniversalisClient::from_config(config, region)?;
    let appraiser = Appraiser::new(&client, &catalog, config);
    let priced = appraiser
        .appraise(&items, &mut cache, cutoff, Utc::now())
        .await?;

    cache.persist(&cache_path)?;

    Ok(Appraisal {
        region: client.region().to_string(),
        cutoff,
        priced,
        cache_stats: cache.stats(),
    })
}
