use log::debug;

use crate::models::holding::Holding;
use crate::models::ledger::{CompletedEntry, PendingEntry};
use crate::models::portfolio::RunningPortfolio;

/// Merges the results of successive passes into the running portfolio.
///
/// Pure in-memory bookkeeping with no I/O. Callers serialise merges.
pub struct AggregationService;

impl AggregationService {
    pub fn new() -> Self {
        Self
    }

    /// Merge holdings by asset code.
    ///
    /// Unknown codes are appended in incoming order. Known codes have their
    /// balance, value, proceeds and cost basis summed; the gain percentage
    /// follows from the summed figures, never from adding percentages.
    pub fn merge_holdings(&self, portfolio: &mut RunningPortfolio, incoming: Vec<Holding>) {
        for holding in incoming {
            match portfolio.holdings.iter_mut().find(|h| h.code == holding.code) {
                Some(existing) => {
                    debug!("Merging holding {} into existing record", holding.code);
                    existing.absorb(&holding);
                }
                None => portfolio.holdings.push(holding),
            }
        }
    }

    /// Append ledger entries, preserving arrival order.
    pub fn merge_ledger(
        &self,
        portfolio: &mut RunningPortfolio,
        completed: Vec<CompletedEntry>,
        pending: Vec<PendingEntry>,
    ) {
        portfolio.completed.extend(completed);
        portfolio.pending.extend(pending);
    }
}

impl Default for AggregationService {
    fn default() -> Self {
        Self::new()
    }
}
