//! Remote Price Source Module
//!
//! Abstraction over the market pricing service plus its HTTP implementation.

mod universalis;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::cache::Price;
use crate::catalog::ItemId;
use crate::error::{AppraiseError, Result};

pub use universalis::UniversalisClient;

// == Public Constants ==
/// Most ids the pricing service accepts in one call
pub const MAX_BATCH_SIZE: usize = 100;

// == Price Source ==
/// Best-effort batch price lookup.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetches prices for 1..=`MAX_BATCH_SIZE` ids.
    ///
    /// Ids without a discoverable price are absent from the returned map.
    /// Transport and protocol failures are `RemoteUnavailable`; a batch of
    /// the wrong size is `InvalidBatchSize`.
    async fn fetch_batch(&self, item_ids: &[ItemId]) -> Result<HashMap<ItemId, Price>>;
}

/// Rejects empty batches and batches above the service ceiling.
pub fn check_batch_size(item_ids: &[ItemId]) -> Result<()> {
    if item_ids.is_empty() || item_ids.len() > MAX_BATCH_SIZE {
        return Err(AppraiseError::InvalidBatchSize(item_ids.len()));
    }
    Ok(())
}
