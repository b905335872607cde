use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::holding::Holding;
use super::transaction::ActionType;

/// A settled trade, converted to the display currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedEntry {
    pub code: String,
    pub action_type: ActionType,
    pub amount: f64,
    /// Gross value of the trade, fee included
    pub transaction_value: f64,
    pub fee: f64,
    /// Net value after the fee
    pub received_value: f64,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
}

/// An open order, converted to the display currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingEntry {
    pub code: String,
    pub action_type: ActionType,
    pub amount: f64,
    /// Inverse of the converted trigger rate
    pub implied_trigger: f64,
    pub received_value: f64,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
}

/// A record the engine could not process, with the reason.
/// `reference` identifies the input (asset id, history position).
#[derive(Debug)]
pub struct RejectedRecord {
    pub reference: String,
    pub error: CoreError,
}

impl RejectedRecord {
    pub fn new(reference: impl Into<String>, error: CoreError) -> Self {
        Self {
            reference: reference.into(),
            error,
        }
    }
}

impl std::fmt::Display for RejectedRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.reference, self.error)
    }
}

/// Output of one holdings valuation pass.
#[derive(Debug, Default)]
pub struct HoldingsReport {
    pub holdings: Vec<Holding>,
    pub rejected: Vec<RejectedRecord>,
}

/// Output of one ledger normalisation pass, oldest entry first.
#[derive(Debug, Default)]
pub struct LedgerReport {
    pub completed: Vec<CompletedEntry>,
    pub pending: Vec<PendingEntry>,
    pub rejected: Vec<RejectedRecord>,
}
