use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Mutex;
use std::time::Duration;

use super::traits::ExchangeDataSource;
use crate::errors::CoreError;
use crate::models::account::Balance;
use crate::models::asset::{ListedAsset, TradedAsset};
use crate::models::server::ServerStatus;
use crate::models::settings::ClientSettings;
use crate::models::transaction::Transaction;

const PROVIDER: &str = "Swyftx";

/// Swyftx REST API client.
///
/// - **Public**: `info/`, `markets/assets/`, `markets/info/basic/`
/// - **Authenticated**: `user/balance/`, `history/all/` (bearer token from
///   `auth/refresh/`, invalidated by `auth/logout/`)
///
/// Market data is always read from the live API; account data from
/// `ClientSettings::account_url` (live or demo).
pub struct SwyftxClient {
    client: Client,
    settings: ClientSettings,
    /// Access token, set by `authenticate`, cleared by `logout`.
    token: Mutex<Option<String>>,
}

impl SwyftxClient {
    pub fn new(settings: ClientSettings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            settings,
            token: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Decode an API response body.
    ///
    /// The exchange reports failures as a JSON object with an `error` key
    /// (often with a 200 status), so that is checked before decoding.
    pub fn decode_response<T: DeserializeOwned>(
        body: serde_json::Value,
        what: &str,
    ) -> Result<T, CoreError> {
        if let Some(error) = body.get("error") {
            return Err(CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("{what} request failed: {error}"),
            });
        }
        serde_json::from_value(body).map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to parse {what}: {e}"),
        })
    }

    fn bearer(&self) -> Result<String, CoreError> {
        self.token
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .ok_or_else(|| CoreError::Authentication("not logged in".into()))
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> Result<T, CoreError> {
        let body: serde_json::Value = request
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("Invalid JSON in {what} response: {e}"),
            })?;
        Self::decode_response(body, what)
    }

    async fn get_public<T: DeserializeOwned>(&self, path: &str) -> Result<T, CoreError> {
        let url = format!("{}{path}", self.settings.api_url);
        debug!("GET {url}");
        self.fetch(self.client.get(&url), path).await
    }

    async fn get_account<T: DeserializeOwned>(&self, path: &str) -> Result<T, CoreError> {
        let token = self.bearer()?;
        let url = format!("{}{path}", self.settings.account_url);
        debug!("GET {url} (authenticated)");
        self.fetch(self.client.get(&url).bearer_auth(token), path)
            .await
    }
}

// ── Swyftx API response types ───────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    access_token: Option<String>,
}

#[derive(Deserialize)]
struct LogoutResponse {
    #[serde(default)]
    success: bool,
}

#[async_trait]
impl ExchangeDataSource for SwyftxClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn server_status(&self) -> Result<ServerStatus, CoreError> {
        self.get_public("info/").await
    }

    async fn authenticate(&self) -> Result<(), CoreError> {
        let url = format!("{}auth/refresh/", self.settings.api_url);
        let request = self
            .client
            .post(&url)
            .form(&[("apiKey", self.settings.api_key.as_str())]);

        let resp: RefreshResponse = self.fetch(request, "auth/refresh/").await?;
        let token = resp
            .access_token
            .ok_or_else(|| CoreError::Authentication("no access token in response".into()))?;

        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = Some(token);
        info!("Authenticated with {PROVIDER}");
        Ok(())
    }

    async fn logout(&self) -> Result<bool, CoreError> {
        let token = self.bearer()?;
        let url = format!("{}auth/logout/", self.settings.api_url);
        let resp: LogoutResponse = self
            .fetch(self.client.post(&url).bearer_auth(token), "auth/logout/")
            .await?;

        if resp.success {
            *self.token.lock().unwrap_or_else(|e| e.into_inner()) = None;
            info!("Logged out of {PROVIDER}");
        }
        Ok(resp.success)
    }

    async fn listed_assets(&self) -> Result<Vec<ListedAsset>, CoreError> {
        self.get_public("markets/assets/").await
    }

    async fn traded_assets(&self) -> Result<Vec<TradedAsset>, CoreError> {
        self.get_public("markets/info/basic/").await
    }

    async fn balances(&self) -> Result<Vec<Balance>, CoreError> {
        self.get_account("user/balance/").await
    }

    async fn transactions(&self) -> Result<Vec<Transaction>, CoreError> {
        self.get_account("history/all/").await
    }
}
