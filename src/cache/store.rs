//! Price Cache Store Module
//!
//! In-memory price table keyed by item id, with freshness-aware reads and a
//! JSON document on disk.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cache::{CacheStats, Price, PriceRecord};
use crate::catalog::ItemId;
use crate::error::{AppraiseError, Result};

// == Price Cache ==
/// Price table holding at most one record per item id.
///
/// Records are kept ordered by id so persisted documents diff cleanly.
#[derive(Debug)]
pub struct PriceCache {
    /// Records by item id
    records: BTreeMap<ItemId, PriceRecord>,
    /// Usage statistics for this run
    stats: CacheStats,
    /// Freshness window in seconds (inclusive)
    max_age_secs: i64,
}

impl PriceCache {
    // == Constructor ==
    /// Creates an empty cache with the given freshness window.
    pub fn new(max_age_secs: i64) -> Self {
        Self {
            records: BTreeMap::new(),
            stats: CacheStats::new(),
            max_age_secs,
        }
    }

    /// Builds a cache from previously persisted records.
    ///
    /// Duplicate ids collapse to the most recent observation.
    pub fn from_records(records: Vec<PriceRecord>, max_age_secs: i64) -> Self {
        let mut cache = Self::new(max_age_secs);
        for record in records {
            match cache.records.get(&record.item_id) {
                Some(existing) if existing.observed_at >= record.observed_at => {
                    warn!("Dropping older duplicate cache record for item {}", record.item_id);
                }
                Some(_) => {
                    warn!("Replacing older duplicate cache record for item {}", record.item_id);
                    cache.records.insert(record.item_id, record);
                }
                None => {
                    cache.records.insert(record.item_id, record);
                }
            }
        }
        cache.stats.set_total_records(cache.records.len());
        cache
    }

    // == Lookup ==
    /// Returns the cached price if the record is fresh at `now` (Unix seconds).
    ///
    /// Stale records are ignored, not removed.
    pub fn lookup(&mut self, item_id: ItemId, now: i64) -> Option<Price> {
        match self.records.get(&item_id) {
            Some(record) if record.is_fresh(now, self.max_age_secs) => {
                self.stats.record_hit();
                Some(record.price)
            }
            Some(record) => {
                debug!(
                    "Cached price for item {} is stale ({}s old)",
                    item_id,
                    record.age_secs(now)
                );
                self.stats.record_miss();
                None
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Upsert ==
    /// Stores an observation, overwriting price and timestamp in place if the
    /// id is already cached.
    pub fn upsert(&mut self, record: PriceRecord) {
        if let Some(existing) = self.records.get_mut(&record.item_id) {
            existing.price = record.price;
            existing.observed_at = record.observed_at;
            self.stats.record_refresh();
        } else {
            self.records.insert(record.item_id, record);
            self.stats.record_insert();
        }
        self.stats.set_total_records(self.records.len());
    }

    // == Get ==
    /// Returns the raw record regardless of freshness.
    pub fn get(&self, item_id: ItemId) -> Option<&PriceRecord> {
        self.records.get(&item_id)
    }

    /// Iterates records in ascending id order.
    pub fn records(&self) -> impl Iterator<Item = &PriceRecord> {
        self.records.values()
    }

    // == Load ==
    /// Loads the persisted cache.
    ///
    /// A missing file yields an empty cache. Any other read or parse failure
    /// is reported as `CacheLoadCorruption`.
    pub fn load(path: &Path, max_age_secs: i64) -> Result<Self> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No price cache at {}, starting empty", path.display());
                return Ok(Self::new(max_age_secs));
            }
            Err(e) => {
                return Err(AppraiseError::CacheLoadCorruption(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let records: Vec<PriceRecord> = serde_json::from_str(&json).map_err(|e| {
            AppraiseError::CacheLoadCorruption(format!("{}: {}", path.display(), e))
        })?;

        let cache = Self::from_records(records, max_age_secs);
        info!("Loaded {} cached prices from {}", cache.len(), path.display());
        Ok(cache)
    }

    // == Persist ==
    /// Writes all records, sorted by id, replacing the previous document.
    ///
    /// The document is written to a sibling temp file first and then renamed
    /// over the target.
    pub fn persist(&self, path: &Path) -> Result<()> {
        let records: Vec<&PriceRecord> = self.records.values().collect();

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        records
            .serialize(&mut serializer)
            .map_err(|e| AppraiseError::CacheWrite(e.to_string()))?;

        let tmp_path = temp_path_for(path);
        fs::write(&tmp_path, &buf)
            .map_err(|e| AppraiseError::CacheWrite(format!("{}: {}", tmp_path.display(), e)))?;
        if let Err(e) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(AppraiseError::CacheWrite(format!("{}: {}", path.display(), e)));
        }

        info!("Saved {} cached prices to {}", records.len(), path.display());
        Ok(())
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_records(self.records.len());
        stats
    }

    pub fn max_age_secs(&self) -> i64 {
        self.max_age_secs
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "item_prices.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = 86_400;
    const NOW: i64 = 1_700_000_000;

    #[test]
    fn test_cache_new() {
        let cache = PriceCache::new(DAY);
        assert!(cache.is_empty());
        assert_eq!(cache.max_age_secs(), DAY);
    }

    #[test]
    fn test_lookup_fresh_and_stale() {
        let mut cache = PriceCache::new(DAY);
        cache.upsert(PriceRecord::new(1, "Garden Lamp", 500, NOW - DAY));
        cache.upsert(PriceRecord::new(2, "Oak Table", 900, NOW - DAY - 1));

        assert_eq!(cache.lookup(1, NOW), Some(500));
        assert_eq!(cache.lookup(2, NOW), None);
        assert_eq!(cache.lookup(3, NOW), None);

        // Stale records stay in place
        assert_eq!(cache.len(), 2);
        assert!(cache.get(2).is_some());

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let mut cache = PriceCache::new(DAY);
        let record = PriceRecord::new(7, "Wooden Stool", 120, NOW);

        cache.upsert(record.clone());
        cache.upsert(record);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(7).unwrap().price, 120);
    }

    #[test]
    fn test_upsert_overwrites_price_and_timestamp() {
        let mut cache = PriceCache::new(DAY);
        cache.upsert(PriceRecord::new(7, "Wooden Stool", 120, NOW - 2 * DAY));
        assert_eq!(cache.lookup(7, NOW), None);

        cache.upsert(PriceRecord::new(7, "Wooden Stool", 150, NOW));
        assert_eq!(cache.lookup(7, NOW), Some(150));

        let stats = cache.stats();
        assert_eq!(stats.inserts, 1);
        assert_eq!(stats.refreshes, 1);
        assert_eq!(stats.total_records, 1);
    }

    #[test]
    fn test_from_records_keeps_newest_duplicate() {
        let cache = PriceCache::from_records(
            vec![
                PriceRecord::new(3, "Lamp", 10, NOW - 100),
                PriceRecord::new(3, "Lamp", 20, NOW),
                PriceRecord::new(3, "Lamp", 30, NOW - 50),
            ],
            DAY,
        );
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(3).unwrap().price, 20);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cache = PriceCache::load(&dir.path().join("item_prices.json"), DAY).unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_load_corrupt_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("item_prices.json");
        fs::write(&path, "{ not json").unwrap();

        let result = PriceCache::load(&path, DAY);
        assert!(matches!(result, Err(AppraiseError::CacheLoadCorruption(_))));
    }

    #[test]
    fn test_load_wrong_shape_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("item_prices.json");
        fs::write(&path, r#"[{"id": 1, "price": 5}]"#).unwrap();

        let result = PriceCache::load(&path, DAY);
        assert!(matches!(result, Err(AppraiseError::CacheLoadCorruption(_))));
    }

    #[test]
    fn test_load_minimum_timestamp_is_stale() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("item_prices.json");
        fs::write(
            &path,
            r#"[{"id": 1, "name": "Garden Lamp", "price": 5, "timestamp": -9223372036854775808}]"#,
        )
        .unwrap();

        let mut cache = PriceCache::load(&path, DAY).unwrap();
        assert_eq!(cache.lookup(1, NOW), None);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_persist_then_load_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("item_prices.json");

        let mut cache = PriceCache::new(DAY);
        cache.upsert(PriceRecord::new(30, "C", 3, NOW));
        cache.upsert(PriceRecord::new(10, "A", 1, NOW - 5));
        cache.upsert(PriceRecord::new(20, "B", 2, NOW - 10));
        cache.persist(&path).unwrap();

        let loaded = PriceCache::load(&path, DAY).unwrap();
        let triples: Vec<(ItemId, Price, i64)> = loaded
            .records()
            .map(|r| (r.item_id, r.price, r.observed_at))
            .collect();
        assert_eq!(triples, vec![(10, 1, NOW - 5), (20, 2, NOW - 10), (30, 3, NOW)]);

        // Document itself is ordered by id
        let raw: Vec<serde_json::Value> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let ids: Vec<u64> = raw.iter().map(|v| v["id"].as_u64().unwrap()).collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }

    #[test]
    fn test_persist_replaces_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("item_prices.json");
        fs::write(&path, "stale garbage that is much longer than the new document").unwrap();

        let mut cache = PriceCache::new(DAY);
        cache.upsert(PriceRecord::new(1, "A", 1, NOW));
        cache.persist(&path).unwrap();

        let loaded = PriceCache::load(&path, DAY).unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_persist_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("item_prices.json");

        let cache = PriceCache::new(DAY);
        assert!(matches!(cache.persist(&path), Err(AppraiseError::CacheWrite(_))));
    }
}
