//! Total Aggregator
//!
//! Folds priced line items into furniture and dye subtotals.

use serde::Serialize;
use tracing::warn;

use crate::cache::Price;

/// Display-name suffix token marking a dye
pub const DYE_SUFFIX: &str = "Dye";

/// One line of the housing list with its resolved price, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    pub name: String,
    pub quantity: u64,
    pub price: Option<Price>,
}

impl PricedLine {
    pub fn new(name: impl Into<String>, quantity: u64, price: Option<Price>) -> Self {
        Self {
            name: name.into(),
            quantity,
            price,
        }
    }
}

// == Totals ==
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    /// Furniture and other non-dye items
    pub item_subtotal: u64,
    pub dye_subtotal: u64,
    /// Lines with no known price
    pub unknown_count: usize,
    /// Names of lines with no known price, in input order
    pub unpriced: Vec<String>,
    /// Names of lines priced above the cutoff, in input order
    pub excluded: Vec<String>,
}

impl Totals {
    pub fn grand_total(&self) -> u64 {
        self.item_subtotal.saturating_add(self.dye_subtotal)
    }

    pub fn excluded_count(&self) -> usize {
        self.excluded.len()
    }
}

/// True when the last whitespace-delimited token of `name` is exactly `Dye`.
pub fn is_dye(name: &str) -> bool {
    name.split_whitespace().next_back() == Some(DYE_SUFFIX)
}

// == Aggregate ==
/// Sums `price * quantity` per category.
///
/// Unknown prices are counted and skipped. With `cutoff > 0`, lines priced
/// strictly above the cutoff are left out of both subtotals.
pub fn aggregate<'a, I>(lines: I, cutoff: Price) -> Totals
where
    I: IntoIterator<Item = &'a PricedLine>,
{
    let mut totals = Totals::default();

    for line in lines {
        let Some(price) = line.price else {
            warn!("Could not get a price for {}", line.name);
            totals.unknown_count += 1;
            totals.unpriced.push(line.name.clone());
            continue;
        };

        if cutoff > 0 && price > cutoff {
            warn!("Excluding {} (price {} above cutoff {})", line.name, price, cutoff);
            totals.excluded.push(line.name.clone());
            continue;
        }

        let value = price.saturating_mul(line.quantity);
        if is_dye(&line.name) {
            totals.dye_subtotal = totals.dye_subtotal.saturating_add(value);
        } else {
            totals.item_subtotal = totals.item_subtotal.saturating_add(value);
        }
    }

    totals
}
