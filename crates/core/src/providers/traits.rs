use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::account::Balance;
use crate::models::asset::{ListedAsset, TradedAsset};
use crate::models::server::ServerStatus;
use crate::models::transaction::Transaction;

/// Source of reference and account data for one session.
///
/// The engine never talks to the network itself; everything it needs is
/// fetched through this trait once, up front. Tests plug in an in-memory
/// implementation, the CLI uses [`super::swyftx::SwyftxClient`].
#[async_trait]
pub trait ExchangeDataSource: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    /// Connectivity and maintenance state of the exchange.
    async fn server_status(&self) -> Result<ServerStatus, CoreError>;

    /// Obtain an access token for the account endpoints.
    async fn authenticate(&self) -> Result<(), CoreError>;

    /// Invalidate the current access token. Returns the server's verdict.
    async fn logout(&self) -> Result<bool, CoreError>;

    async fn listed_assets(&self) -> Result<Vec<ListedAsset>, CoreError>;

    /// Tradable assets with buy/sell quotes against the anchor currency.
    async fn traded_assets(&self) -> Result<Vec<TradedAsset>, CoreError>;

    /// Requires authentication.
    async fn balances(&self) -> Result<Vec<Balance>, CoreError>;

    /// Full account history, most recent first. Requires authentication.
    async fn transactions(&self) -> Result<Vec<Transaction>, CoreError>;
}
