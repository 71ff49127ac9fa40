//! Cache Module
//!
//! Provides the time-bounded price cache persisted between runs.

mod record;
mod stats;
mod store;


// Re-export public types
pub use record::{Price, PriceRecord};
pub use stats::CacheStats;
pub use store::PriceCache;

// == Public Constants ==
/// Default freshness window for cached prices (24 hours)
pub const DEFAULT_MAX_AGE_SECS: i64 = 86_400;
