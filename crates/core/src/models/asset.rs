use serde::{Deserialize, Serialize};

use super::number;

/// An asset listed on the exchange (identity and metadata only).
///
/// Listed assets share their `id` space with [`TradedAsset`] and with
/// account balances, so the id is the join key across all three.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListedAsset {
    #[serde(deserialize_with = "number::id_lenient")]
    pub id: u64,

    /// Ticker code, e.g. "BTC", "USDT"
    pub code: String,

    /// Human-readable name, e.g. "Bitcoin"
    pub name: String,
}

impl ListedAsset {
    pub fn new(id: u64, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
            name: name.into(),
        }
    }
}

/// A tradable asset with its live quotes.
///
/// `buy` and `sell` are both expressed against the anchor currency
/// (AUD on the live exchange).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradedAsset {
    #[serde(deserialize_with = "number::id_lenient")]
    pub id: u64,

    pub code: String,

    #[serde(default)]
    pub name: String,

    /// Price at which the exchange sells to the user (ask)
    #[serde(deserialize_with = "number::f64_lenient")]
    pub buy: f64,

    /// Price at which the exchange buys from the user (bid)
    #[serde(deserialize_with = "number::f64_lenient")]
    pub sell: f64,
}

impl TradedAsset {
    pub fn new(id: u64, code: impl Into<String>, buy: f64, sell: f64) -> Self {
        Self {
            id,
            code: code.into(),
            name: String::new(),
            buy,
            sell,
        }
    }

    /// Anchor-relative mid-price: the average of the two quotes.
    #[must_use]
    pub fn mid_price(&self) -> f64 {
        (self.buy + self.sell) / 2.0
    }
}
