pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use log::info;
use models::{
    account::AccountSnapshot,
    catalog::{normalize_code, ReferenceCatalog},
    holding::Holding,
    ledger::{CompletedEntry, PendingEntry, RejectedRecord},
    portfolio::RunningPortfolio,
    settings::EngineConfig,
};
use providers::traits::ExchangeDataSource;
use services::{
    aggregation_service::AggregationService, currency_service::CurrencyService,
    ledger_service::LedgerService, valuation_service::ValuationService,
};

use errors::CoreError;

/// Main entry point for the Swyftx portfolio core library.
/// Holds one session's account snapshot, the running results, and the
/// services that produce them.
#[must_use]
pub struct PortfolioTracker {
    config: EngineConfig,
    snapshot: AccountSnapshot,
    portfolio: RunningPortfolio,
    currency_service: CurrencyService,
    valuation_service: ValuationService,
    ledger_service: LedgerService,
    aggregation_service: AggregationService,
}

impl std::fmt::Debug for PortfolioTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioTracker")
            .field("config", &self.config)
            .field("traded_assets", &self.snapshot.catalog.traded().len())
            .field("balances", &self.snapshot.balances.len())
            .field("transactions", &self.snapshot.transactions.len())
            .field("holdings", &self.portfolio.holdings.len())
            .finish()
    }
}

impl PortfolioTracker {
    /// Check the exchange is up, log in, and fetch the session snapshot.
    ///
    /// The caller keeps ownership of `source` and is responsible for
    /// logging out when done.
    pub async fn connect(
        source: &dyn ExchangeDataSource,
        config: EngineConfig,
    ) -> Result<Self, CoreError> {
        let status = source.server_status().await?;
        if !status.is_available() {
            return Err(CoreError::ServerUnavailable(status.describe()));
        }
        info!("{}: {}", source.name(), status.describe());

        source.authenticate().await?;
        let snapshot = Self::fetch_snapshot(source).await?;
        Ok(Self::from_snapshot(snapshot, config))
    }

    /// Fetch the four session collections from `source`.
    pub async fn fetch_snapshot(
        source: &dyn ExchangeDataSource,
    ) -> Result<AccountSnapshot, CoreError> {
        let listed = source.listed_assets().await?;
        let traded = source.traded_assets().await?;
        let balances = source.balances().await?;
        let transactions = source.transactions().await?;
        info!(
            "Fetched {} listed / {} traded assets, {} balances, {} transactions",
            listed.len(),
            traded.len(),
            balances.len(),
            transactions.len()
        );

        let catalog = ReferenceCatalog::new(listed, traded)?;
        Ok(AccountSnapshot::new(catalog, balances, transactions))
    }

    /// Build a tracker over an already-fetched snapshot (offline use, tests).
    pub fn from_snapshot(snapshot: AccountSnapshot, config: EngineConfig) -> Self {
        Self {
            currency_service: CurrencyService::new(config.anchor_currency.clone()),
            valuation_service: ValuationService::new(config.clone()),
            ledger_service: LedgerService::new(config.clone()),
            aggregation_service: AggregationService::new(),
            portfolio: RunningPortfolio::new(),
            snapshot,
            config,
        }
    }

    // ── Reporting passes ────────────────────────────────────────────

    /// Whether `code` can be used as a display currency.
    #[must_use]
    pub fn exists_currency(&self, code: &str) -> bool {
        self.currency_service
            .exists_currency(&self.snapshot.catalog, &normalize_code(code))
    }

    /// Value the balances in `currency` and merge them into the running portfolio.
    /// Returns the records the pass had to reject.
    pub fn report_holdings(&mut self, currency: &str) -> Result<Vec<RejectedRecord>, CoreError> {
        let code = self.checked_currency(currency)?;
        let report = self.valuation_service.valuate(
            &self.snapshot.balances,
            &self.snapshot.catalog,
            &self.snapshot.transactions,
            &code,
        )?;
        self.aggregation_service
            .merge_holdings(&mut self.portfolio, report.holdings);
        Ok(report.rejected)
    }

    /// Normalise the history in `currency` and append it to the running ledger.
    /// Returns the records the pass had to reject.
    pub fn report_transactions(
        &mut self,
        currency: &str,
    ) -> Result<Vec<RejectedRecord>, CoreError> {
        let code = self.checked_currency(currency)?;
        let report = self.ledger_service.normalize(
            &self.snapshot.transactions,
            &self.snapshot.catalog,
            &code,
        )?;
        self.aggregation_service
            .merge_ledger(&mut self.portfolio, report.completed, report.pending);
        Ok(report.rejected)
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn snapshot(&self) -> &AccountSnapshot {
        &self.snapshot
    }

    pub fn portfolio(&self) -> &RunningPortfolio {
        &self.portfolio
    }

    #[must_use]
    pub fn holdings(&self) -> &[Holding] {
        &self.portfolio.holdings
    }

    #[must_use]
    pub fn completed(&self) -> &[CompletedEntry] {
        &self.portfolio.completed
    }

    #[must_use]
    pub fn pending(&self) -> &[PendingEntry] {
        &self.portfolio.pending
    }

    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.portfolio.total_value()
    }

    // ── Export ──────────────────────────────────────────────────────

    /// Export the running ledger as CSV, completed entries first.
    /// Columns: status, code, action_type, amount, transaction_value, fee,
    /// implied_trigger, received_value, updated
    #[must_use]
    pub fn export_ledger_to_csv(&self) -> String {
        let mut csv = String::from(
            "status,code,action_type,amount,transaction_value,fee,implied_trigger,received_value,updated\n",
        );
        for entry in &self.portfolio.completed {
            csv.push_str(&format!(
                "completed,{},{},{},{},{},,{},{}\n",
                csv_field(&entry.code),
                csv_field(entry.action_type.label()),
                entry.amount,
                entry.transaction_value,
                entry.fee,
                entry.received_value,
                entry.updated.map(|t| t.to_rfc3339()).unwrap_or_default(),
            ));
        }
        for entry in &self.portfolio.pending {
            csv.push_str(&format!(
                "pending,{},{},{},,,{},{},{}\n",
                csv_field(&entry.code),
                csv_field(entry.action_type.label()),
                entry.amount,
                entry.implied_trigger,
                entry.received_value,
                entry.updated.map(|t| t.to_rfc3339()).unwrap_or_default(),
            ));
        }
        csv
    }

    /// Export the running portfolio (holdings and both ledgers) as pretty JSON.
    pub fn export_to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.portfolio)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize portfolio: {e}")))
    }

    // ── Internal ────────────────────────────────────────────────────

    fn checked_currency(&self, currency: &str) -> Result<String, CoreError> {
        let code = normalize_code(currency);
        if !self
            .currency_service
            .exists_currency(&self.snapshot.catalog, &code)
        {
            return Err(CoreError::UnknownCurrency(code));
        }
        Ok(code)
    }
}

/// Quote a CSV field containing commas, quotes or newlines.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
