use log::{debug, warn};

use crate::errors::CoreError;
use crate::models::account::Balance;
use crate::models::catalog::ReferenceCatalog;
use crate::models::holding::Holding;
use crate::models::ledger::{HoldingsReport, RejectedRecord};
use crate::models::settings::EngineConfig;
use crate::models::transaction::Transaction;
use crate::services::currency_service::CurrencyService;

/// Values the account's balances in a display currency and attaches the
/// fee-adjusted cost basis and sale proceeds from the trade history.
///
/// Balances whose asset cannot be resolved in the catalog (not listed, or
/// listed but not traded) are skipped silently: they cannot be priced.
pub struct ValuationService {
    config: EngineConfig,
    currency_service: CurrencyService,
}

impl ValuationService {
    pub fn new(config: EngineConfig) -> Self {
        let currency_service = CurrencyService::new(config.anchor_currency.clone());
        Self {
            config,
            currency_service,
        }
    }

    /// Produce one holding per positive, resolvable balance, in balance order.
    ///
    /// Fails as a whole only if the display currency or the stablecoin
    /// cannot be priced. Individual unusable trades are reported in
    /// `rejected` and left out of the totals.
    pub fn valuate(
        &self,
        balances: &[Balance],
        catalog: &ReferenceCatalog,
        transactions: &[Transaction],
        display_currency: &str,
    ) -> Result<HoldingsReport, CoreError> {
        // 1. Pass-wide conversion factors
        let display_ratio = self.currency_service.mid_price(catalog, display_currency)?;
        let stablecoin_ratio = self.currency_service.ratio(
            catalog,
            &self.config.anchor_currency,
            &self.config.stablecoin,
        )?;
        // stablecoin-denominated trade value → display currency
        let trade_factor = stablecoin_ratio / display_ratio;

        let mut report = HoldingsReport::default();

        for balance in balances {
            if balance.available_balance <= 0.0 {
                continue;
            }

            // 2. Resolve identity and quote
            let Some(listed) = catalog.listed_by_id(balance.asset_id) else {
                warn!("Skipping balance of unlisted asset id {}", balance.asset_id);
                continue;
            };
            let Some(traded) = catalog.traded_by_id(balance.asset_id) else {
                warn!("Skipping balance of untraded asset {}", listed.code);
                continue;
            };

            // 3. Market value at the sell quote
            let value = balance.available_balance * traded.sell / display_ratio;

            // 4. Cost basis and proceeds from completed trades of this asset
            let (cost_basis, sold_proceeds) =
                self.trade_totals(balance.asset_id, transactions, trade_factor, &mut report.rejected);

            report.holdings.push(Holding {
                code: listed.code.clone(),
                name: listed.name.clone(),
                balance: balance.available_balance,
                value,
                sold_proceeds,
                cost_basis,
            });
        }

        debug!(
            "Valued {} holdings in {display_currency} ({} trades rejected)",
            report.holdings.len(),
            report.rejected.len()
        );
        Ok(report)
    }

    /// Sum `(cost_basis, sold_proceeds)` over completed buys and sells of `asset_id`.
    fn trade_totals(
        &self,
        asset_id: u64,
        transactions: &[Transaction],
        trade_factor: f64,
        rejected: &mut Vec<RejectedRecord>,
    ) -> (f64, f64) {
        let fee = self.config.fee_rate;
        let mut cost_basis = 0.0;
        let mut sold_proceeds = 0.0;

        for (idx, tx) in transactions.iter().enumerate() {
            if tx.asset != asset_id || !tx.is_complete() {
                continue;
            }

            if tx.action_type.is_buy() {
                cost_basis += (1.0 + fee) * tx.amount * tx.trigger * trade_factor;
            } else if tx.action_type.is_sell() {
                if tx.trigger == 0.0 {
                    let error = CoreError::DivisionByZero(format!(
                        "{} of asset {asset_id} has a zero trigger",
                        tx.action_type
                    ));
                    warn!("Ignoring history[{idx}] in cost basis: {error}");
                    rejected.push(RejectedRecord::new(format!("history[{idx}]"), error));
                    continue;
                }
                sold_proceeds += (1.0 - fee) * tx.amount / tx.trigger * trade_factor;
            }
        }

        (cost_basis, sold_proceeds)
    }
}
