//! Appraisal report DTO
//!
//! JSON shape printed by `--json`.

use serde::Serialize;

use crate::app::Appraisal;
use crate::cache::Price;

/// Machine-readable summary of one appraisal.
#[derive(Debug, Clone, Serialize)]
pub struct AppraisalReport {
    pub region: String,
    /// Price ceiling, absent when disabled
    pub cutoff: Option<Price>,
    pub item_subtotal: u64,
    pub dye_subtotal: u64,
    pub grand_total: u64,
    /// Catalogued lines without a known price
    pub unpriced: Vec<String>,
    /// Lines priced above the cutoff
    pub excluded: Vec<String>,
    /// Lines with no catalog entry
    pub unknown_names: Vec<String>,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub cache_hit_rate: f64,
}

impl AppraisalReport {
    pub fn new(appraisal: &Appraisal) -> Self {
        let totals = &appraisal.priced.totals;
        let stats = &appraisal.cache_stats;
        Self {
            region: appraisal.region.clone(),
            cutoff: (appraisal.cutoff > 0).then_some(appraisal.cutoff),
            item_subtotal: totals.item_subtotal,
            dye_subtotal: totals.dye_subtotal,
            grand_total: totals.grand_total(),
            unpriced: totals.unpriced.clone(),
            excluded: totals.excluded.clone(),
            unknown_names: appraisal.priced.unknown_names.clone(),
            cache_hits: stats.hits,
            cache_misses: stats.misses,
            cache_hit_rate: stats.hit_rate(),
        }
    }
}
