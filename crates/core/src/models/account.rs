use serde::{Deserialize, Serialize};

use super::catalog::ReferenceCatalog;
use super::number;
use super::transaction::Transaction;

/// Available balance of one held asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    #[serde(deserialize_with = "number::id_lenient")]
    pub asset_id: u64,

    #[serde(deserialize_with = "number::f64_lenient")]
    pub available_balance: f64,
}

impl Balance {
    pub fn new(asset_id: u64, available_balance: f64) -> Self {
        Self {
            asset_id,
            available_balance,
        }
    }
}

/// Everything fetched for one session. Treated as an immutable snapshot:
/// the engine never refreshes it mid-pass.
#[derive(Debug, Clone, Default)]
pub struct AccountSnapshot {
    pub catalog: ReferenceCatalog,
    pub balances: Vec<Balance>,
    /// Account history as stored by the exchange, most recent first.
    pub transactions: Vec<Transaction>,
}

impl AccountSnapshot {
    pub fn new(
        catalog: ReferenceCatalog,
        balances: Vec<Balance>,
        transactions: Vec<Transaction>,
    ) -> Self {
        Self {
            catalog,
            balances,
            transactions,
        }
    }
}
