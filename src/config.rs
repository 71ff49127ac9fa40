//! Configuration Module
//!
//! Handles loading and managing appraiser configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::warn;

use crate::cache::DEFAULT_MAX_AGE_SECS;

/// Public pricing service endpoint
pub const DEFAULT_BASE_URL: &str = "https://universalis.app/api/v2";

/// Appraiser configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the item catalog and the price cache
    pub data_dir: PathBuf,
    /// Catalog file name inside `data_dir`
    pub items_db_file: String,
    /// Price cache file name inside `data_dir`
    pub price_cache_file: String,
    /// Directory of saved housing lists
    pub homes_dir: PathBuf,
    /// Pricing service base URL
    pub base_url: String,
    /// Data center or region used when none is given
    pub default_region: String,
    /// Maximum age in seconds for a cached price to count as fresh
    pub price_max_age_secs: i64,
    /// Pause in milliseconds between consecutive remote calls
    pub request_delay_ms: u64,
    /// Per-request HTTP timeout in seconds
    pub request_timeout_secs: u64,
    /// Abort the run on the first failed remote batch instead of degrading
    pub abort_on_remote_error: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DATA_DIR` - Catalog and cache directory (default: ./data)
    /// - `ITEMS_DB_FILE` - Catalog file name (default: items_db.json)
    /// - `PRICE_CACHE_FILE` - Cache file name (default: item_prices.json)
    /// - `HOMES_DIR` - Housing list directory (default: ./homes)
    /// - `UNIVERSALIS_BASE_URL` - Pricing service base URL
    /// - `DEFAULT_REGION` - Data center or region (default: Aether)
    /// - `PRICE_MAX_AGE_SECS` - Cache freshness window (default: 86400)
    /// - `REQUEST_DELAY_MS` - Pause between remote calls (default: 100)
    /// - `REQUEST_TIMEOUT_SECS` - HTTP timeout (default: 30)
    /// - `ABORT_ON_REMOTE_ERROR` - Strict remote failure policy, accepts
    ///   true/false, 1/0, yes/no, on/off (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            items_db_file: env::var("ITEMS_DB_FILE").unwrap_or(defaults.items_db_file),
            price_cache_file: env::var("PRICE_CACHE_FILE").unwrap_or(defaults.price_cache_file),
            homes_dir: env::var("HOMES_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.homes_dir),
            base_url: env::var("UNIVERSALIS_BASE_URL").unwrap_or(defaults.base_url),
            default_region: env::var("DEFAULT_REGION").unwrap_or(defaults.default_region),
            price_max_age_secs: parse_var("PRICE_MAX_AGE_SECS")
                .unwrap_or(defaults.price_max_age_secs),
            request_delay_ms: parse_var("REQUEST_DELAY_MS").unwrap_or(defaults.request_delay_ms),
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS")
                .unwrap_or(defaults.request_timeout_secs),
            abort_on_remote_error: parse_flag("ABORT_ON_REMOTE_ERROR")
                .unwrap_or(defaults.abort_on_remote_error),
        }
    }

    /// Full path of the item catalog.
    pub fn items_db_path(&self) -> PathBuf {
        self.data_dir.join(&self.items_db_file)
    }

    /// Full path of the persisted price cache.
    pub fn price_cache_path(&self) -> PathBuf {
        self.data_dir.join(&self.price_cache_file)
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    let parsed = raw.trim().parse().ok();
    if parsed.is_none() {
        warn!("Ignoring {}={:?}: not a valid value", name, raw);
    }
    parsed
}

fn parse_flag(name: &str) -> Option<bool> {
    let raw = env::var(name).ok()?;
    let parsed = parse_bool(&raw);
    if parsed.is_none() {
        warn!("Ignoring {}={:?}: expected true/false, 1/0, yes/no or on/off", name, raw);
    }
    parsed
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            items_db_file: "items_db.json".to_string(),
            price_cache_file: "item_prices.json".to_string(),
            homes_dir: PathBuf::from("./homes"),
            base_url: DEFAULT_BASE_URL.to_string(),
            default_region: "Aether".to_string(),
            price_max_age_secs: DEFAULT_MAX_AGE_SECS,
            request_delay_ms: 100,
            request_timeout_secs: 30,
            abort_on_remote_error: false,
        }
    }
}
