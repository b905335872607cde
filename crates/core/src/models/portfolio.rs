use serde::{Deserialize, Serialize};

use super::holding::Holding;
use super::ledger::{CompletedEntry, PendingEntry};

/// Accumulated results of every pass in the current session.
///
/// Created empty, grown by the aggregation service, read by presentation,
/// dropped at exit. Nothing here is ever written to disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunningPortfolio {
    /// One record per asset code, in first-seen order
    pub holdings: Vec<Holding>,

    /// Settled trades in arrival order
    pub completed: Vec<CompletedEntry>,

    /// Open orders in arrival order
    pub pending: Vec<PendingEntry>,
}

impl RunningPortfolio {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn holding(&self, code: &str) -> Option<&Holding> {
        self.holdings.iter().find(|h| h.code == code)
    }

    /// Sum of all holding values.
    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.holdings.iter().map(|h| h.value).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty() && self.completed.is_empty() && self.pending.is_empty()
    }
}
