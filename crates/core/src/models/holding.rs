use serde::{Deserialize, Serialize, Serializer};

use crate::errors::CoreError;

/// Current position in one asset, valued in the display currency.
///
/// The gain percentage is not stored: it is always derived from
/// `value`, `sold_proceeds` and `cost_basis`, so merged holdings
/// report a correct aggregate gain. The serialized form carries it as
/// `gain_pct`, `null` when the cost basis is zero.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Holding {
    pub code: String,

    pub name: String,

    /// Units held (available balance)
    pub balance: f64,

    /// Market value at the current sell quote
    pub value: f64,

    /// Fee-adjusted proceeds of all completed sells
    pub sold_proceeds: f64,

    /// Fee-adjusted spend of all completed buys
    pub cost_basis: f64,
}

impl Holding {
    /// Total gain in percent: `100 * (value + sold_proceeds) / cost_basis`.
    ///
    /// Fails with `DivisionByZero` when nothing was ever bought
    /// (e.g. the position came in through a deposit).
    pub fn gain_pct(&self) -> Result<f64, CoreError> {
        if self.cost_basis == 0.0 {
            return Err(CoreError::DivisionByZero(format!(
                "cost basis of {} is zero",
                self.code
            )));
        }
        Ok(100.0 * (self.value + self.sold_proceeds) / self.cost_basis)
    }

    /// Fold another snapshot of the same asset into this one.
    pub fn absorb(&mut self, other: &Holding) {
        self.balance += other.balance;
        self.value += other.value;
        self.sold_proceeds += other.sold_proceeds;
        self.cost_basis += other.cost_basis;
    }
}

/// Flat record handed to exporters, with the derived gain filled in.
#[derive(Serialize)]
struct HoldingRecord<'a> {
    code: &'a str,
    name: &'a str,
    balance: f64,
    value: f64,
    sold_proceeds: f64,
    cost_basis: f64,
    gain_pct: Option<f64>,
}

impl Serialize for Holding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        HoldingRecord {
            code: &self.code,
            name: &self.name,
            balance: self.balance,
            value: self.value,
            sold_proceeds: self.sold_proceeds,
            cost_basis: self.cost_basis,
            gain_pct: self.gain_pct().ok(),
        }
        .serialize(serializer)
    }
}
