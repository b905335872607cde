use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::number;

/// The kind of account activity a transaction records.
///
/// Labels match the exchange's `actionType` strings exactly.
/// Anything unrecognised is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionType {
    MarketBuy,
    LimitBuy,
    StopLimitBuy,
    MarketSell,
    LimitSell,
    StopLimitSell,
    Deposit,
    Withdrawal,
    DustSell,
    Other(String),
}

impl ActionType {
    /// Market, limit and stop-limit buys.
    #[must_use]
    pub fn is_buy(&self) -> bool {
        matches!(
            self,
            ActionType::MarketBuy | ActionType::LimitBuy | ActionType::StopLimitBuy
        )
    }

    /// Market, limit and stop-limit sells. Dust sells are not part of the family.
    #[must_use]
    pub fn is_sell(&self) -> bool {
        matches!(
            self,
            ActionType::MarketSell | ActionType::LimitSell | ActionType::StopLimitSell
        )
    }

    /// Transfers and dust conversions, which never reach the ledger.
    #[must_use]
    pub fn is_excluded(&self) -> bool {
        matches!(
            self,
            ActionType::Deposit | ActionType::Withdrawal | ActionType::DustSell
        )
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            ActionType::MarketBuy => "Market Buy",
            ActionType::LimitBuy => "Limit Buy",
            ActionType::StopLimitBuy => "Stop Limit Buy",
            ActionType::MarketSell => "Market Sell",
            ActionType::LimitSell => "Limit Sell",
            ActionType::StopLimitSell => "Stop Limit Sell",
            ActionType::Deposit => "Deposit",
            ActionType::Withdrawal => "Withdrawal",
            ActionType::DustSell => "Dust Sell",
            ActionType::Other(label) => label,
        }
    }
}

impl From<String> for ActionType {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Market Buy" => ActionType::MarketBuy,
            "Limit Buy" => ActionType::LimitBuy,
            "Stop Limit Buy" => ActionType::StopLimitBuy,
            "Market Sell" => ActionType::MarketSell,
            "Limit Sell" => ActionType::LimitSell,
            "Stop Limit Sell" => ActionType::StopLimitSell,
            "Deposit" => ActionType::Deposit,
            "Withdrawal" => ActionType::Withdrawal,
            "Dust Sell" => ActionType::DustSell,
            _ => ActionType::Other(label),
        }
    }
}

impl From<&str> for ActionType {
    fn from(label: &str) -> Self {
        ActionType::from(label.to_string())
    }
}

impl From<ActionType> for String {
    fn from(action: ActionType) -> Self {
        match action {
            ActionType::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Settlement state of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionStatus {
    Complete,
    Pending,
    Failed,
    Other(String),
}

impl TransactionStatus {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            TransactionStatus::Complete => "Complete",
            TransactionStatus::Pending => "Pending",
            TransactionStatus::Failed => "Failed",
            TransactionStatus::Other(label) => label,
        }
    }
}

impl From<String> for TransactionStatus {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Complete" => TransactionStatus::Complete,
            "Pending" => TransactionStatus::Pending,
            "Failed" => TransactionStatus::Failed,
            _ => TransactionStatus::Other(label),
        }
    }
}

impl From<&str> for TransactionStatus {
    fn from(label: &str) -> Self {
        TransactionStatus::from(label.to_string())
    }
}

impl From<TransactionStatus> for String {
    fn from(status: TransactionStatus) -> Self {
        match status {
            TransactionStatus::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One entry of the account history.
///
/// **Assumption**: `trigger` is always quoted against the stablecoin
/// (USDT), whatever the primary asset of the trade actually was. The
/// exchange does not guarantee this and it is not checked per record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Id of the asset bought, sold or transferred
    #[serde(deserialize_with = "number::id_lenient")]
    pub asset: u64,

    #[serde(deserialize_with = "number::f64_lenient")]
    pub amount: f64,

    /// Exchange rate at the time of the trade
    #[serde(default, deserialize_with = "number::f64_or_zero")]
    pub trigger: f64,

    pub action_type: ActionType,

    pub status: TransactionStatus,

    /// Value at trade time in units of `primary_asset` / `quantity_asset`
    #[serde(default, deserialize_with = "number::f64_opt")]
    pub quantity: Option<f64>,

    #[serde(default, deserialize_with = "number::id_opt")]
    pub primary_asset: Option<u64>,

    #[serde(default, deserialize_with = "number::id_opt")]
    pub quantity_asset: Option<u64>,

    /// Last update, epoch milliseconds on the wire
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub updated: Option<DateTime<Utc>>,
}

impl Transaction {
    pub fn new(
        asset: u64,
        amount: f64,
        trigger: f64,
        action_type: impl Into<ActionType>,
        status: impl Into<TransactionStatus>,
    ) -> Self {
        Self {
            asset,
            amount,
            trigger,
            action_type: action_type.into(),
            status: status.into(),
            quantity: None,
            primary_asset: None,
            quantity_asset: None,
            updated: None,
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == TransactionStatus::Complete
    }
}
