use log::{debug, warn};

use crate::errors::CoreError;
use crate::models::catalog::ReferenceCatalog;
use crate::models::ledger::{CompletedEntry, LedgerReport, PendingEntry, RejectedRecord};
use crate::models::settings::EngineConfig;
use crate::models::transaction::{Transaction, TransactionStatus};
use crate::services::currency_service::CurrencyService;

/// Values of one trade in the stablecoin, before display conversion.
struct TradeValues {
    transaction_value: f64,
    fee: f64,
    received_value: f64,
}

/// Turns the raw account history into fee-annotated ledger entries
/// valued in the display currency.
///
/// History is stored most recent first; entries are emitted oldest first.
/// Deposits, withdrawals, dust sells and failed transactions are dropped.
pub struct LedgerService {
    config: EngineConfig,
    currency_service: CurrencyService,
}

impl LedgerService {
    pub fn new(config: EngineConfig) -> Self {
        let currency_service = CurrencyService::new(config.anchor_currency.clone());
        Self {
            config,
            currency_service,
        }
    }

    /// Split the history into completed and pending entries.
    ///
    /// Fails as a whole only when the display currency cannot be related to
    /// the stablecoin. A transaction that cannot be rendered (unknown asset,
    /// unsupported action, zero trigger) is rejected on its own.
    pub fn normalize(
        &self,
        transactions: &[Transaction],
        catalog: &ReferenceCatalog,
        display_currency: &str,
    ) -> Result<LedgerReport, CoreError> {
        // stablecoin amount × ratio = display amount
        let ratio = self
            .currency_service
            .ratio(catalog, display_currency, &self.config.stablecoin)?;

        let mut report = LedgerReport::default();

        for (idx, tx) in transactions.iter().enumerate().rev() {
            if tx.action_type.is_excluded() || tx.status == TransactionStatus::Failed {
                continue;
            }

            if let Err(error) = self.emit(tx, catalog, ratio, &mut report) {
                warn!("Rejected history[{idx}]: {error}");
                report.rejected.push(RejectedRecord::new(format!("history[{idx}]"), error));
            }
        }

        debug!(
            "Normalised ledger in {display_currency}: {} completed, {} pending, {} rejected",
            report.completed.len(),
            report.pending.len(),
            report.rejected.len()
        );
        Ok(report)
    }

    fn emit(
        &self,
        tx: &Transaction,
        catalog: &ReferenceCatalog,
        ratio: f64,
        report: &mut LedgerReport,
    ) -> Result<(), CoreError> {
        let code = catalog
            .traded_by_id(tx.asset)
            .map(|a| a.code.clone())
            .ok_or(CoreError::UnresolvedAsset(tx.asset))?;

        let values = self.trade_values(tx)?;
        let trigger = tx.trigger / ratio;

        if tx.is_complete() {
            report.completed.push(CompletedEntry {
                code,
                action_type: tx.action_type.clone(),
                amount: tx.amount,
                transaction_value: values.transaction_value * ratio,
                fee: values.fee * ratio,
                received_value: values.received_value * ratio,
                updated: tx.updated,
            });
        } else {
            report.pending.push(PendingEntry {
                code,
                action_type: tx.action_type.clone(),
                amount: tx.amount,
                implied_trigger: 1.0 / trigger,
                received_value: values.received_value * ratio,
                updated: tx.updated,
            });
        }
        Ok(())
    }

    fn trade_values(&self, tx: &Transaction) -> Result<TradeValues, CoreError> {
        let fee_rate = self.config.fee_rate;
        let is_sell = tx.action_type.is_sell();

        if !is_sell && !tx.action_type.is_buy() {
            return Err(CoreError::UnsupportedActionType(tx.action_type.to_string()));
        }
        // Sells divide by the trigger; pending entries report its inverse.
        if tx.trigger == 0.0 && (is_sell || !tx.is_complete()) {
            return Err(CoreError::DivisionByZero(format!(
                "{} of asset {} has a zero trigger",
                tx.action_type, tx.asset
            )));
        }

        if is_sell {
            let transaction_value = tx.amount / tx.trigger;
            let fee = transaction_value * fee_rate;
            Ok(TradeValues {
                transaction_value,
                fee,
                received_value: transaction_value - fee,
            })
        } else {
            let received_value = tx.amount * tx.trigger;
            let fee = received_value * fee_rate;
            Ok(TradeValues {
                transaction_value: received_value + fee,
                fee,
                received_value,
            })
        }
    }
}
