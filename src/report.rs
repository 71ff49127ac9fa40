//! Console Report
//!
//! Human-readable breakdown of an appraisal.

use std::fmt;

use crate::app::Appraisal;

/// Formats an amount with thousands separators, e.g. `1,234,567 Gil`.
pub fn format_gil(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push_str(" Gil");
    out
}

/// Console view of an appraisal.
pub struct Breakdown<'a>(pub &'a Appraisal);

impl fmt::Display for Breakdown<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let appraisal = self.0;
        let totals = &appraisal.priced.totals;

        writeln!(f)?;
        writeln!(f, "Prices from {}", appraisal.region)?;
        if appraisal.cutoff > 0 {
            writeln!(f, "Cutoff: {}", format_gil(appraisal.cutoff))?;
        }
        writeln!(f, "  Items:  {}", format_gil(totals.item_subtotal))?;
        writeln!(f, "  Dyes:   {}", format_gil(totals.dye_subtotal))?;
        writeln!(f, "Approximate Total: {}", format_gil(totals.grand_total()))?;

        if totals.excluded_count() > 0 {
            writeln!(
                f,
                "Excluded above cutoff ({}): {}",
                totals.excluded_count(),
                totals.excluded.join(", ")
            )?;
        }
        if !totals.unpriced.is_empty() {
            writeln!(f, "No price found: {}", totals.unpriced.join(", "))?;
        }
        if !appraisal.priced.unknown_names.is_empty() {
            writeln!(
                f,
                "Unknown items: {}",
                appraisal.priced.unknown_names.join(", ")
            )?;
        }

        let stats = &appraisal.cache_stats;
        write!(
            f,
            "Cache: {} hits, {} misses, {} records",
            stats.hits, stats.misses, stats.total_records
        )
    }
}

/// Renders the breakdown printed at the end of a run.
pub fn render(appraisal: &Appraisal) -> String {
    Breakdown(appraisal).to_string()
}
