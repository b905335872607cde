use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::CoreError;

/// Flat taker fee charged on every trade.
pub const DEFAULT_FEE_RATE: f64 = 0.006;

/// Currency every traded-asset quote is expressed in.
pub const DEFAULT_ANCHOR_CURRENCY: &str = "AUD";

/// Unit in which transaction `trigger` rates are assumed to be quoted.
pub const DEFAULT_STABLECOIN: &str = "USDT";

pub const DEFAULT_DISPLAY_CURRENCY: &str = "USDT";

pub const LIVE_API_URL: &str = "https://api.swyftx.com.au/";
pub const DEMO_API_URL: &str = "https://api.demo.swyftx.com.au/";

/// Environment variable checked before the key file.
pub const API_KEY_ENV: &str = "SWYFTX_API_KEY";
pub const DEFAULT_KEY_FILE: &str = "api_key.dat";

/// Constants of the valuation engine, passed into every pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub anchor_currency: String,
    pub stablecoin: String,
    pub fee_rate: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            anchor_currency: DEFAULT_ANCHOR_CURRENCY.to_string(),
            stablecoin: DEFAULT_STABLECOIN.to_string(),
            fee_rate: DEFAULT_FEE_RATE,
        }
    }
}

/// Connection settings for the exchange client.
///
/// Public market data always comes from the live API. Account data
/// (balances, history) comes from `account_url`, which points at the demo
/// environment when demo mode is on.
#[derive(Clone, PartialEq)]
pub struct ClientSettings {
    pub api_url: String,
    pub account_url: String,
    pub api_key: String,
}

// Keep the key out of logs.
impl std::fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSettings")
            .field("api_url", &self.api_url)
            .field("account_url", &self.account_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl ClientSettings {
    pub fn new(demo: bool, api_key: impl Into<String>) -> Result<Self, CoreError> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(CoreError::Config("API key is empty".into()));
        }
        let account_url = if demo { DEMO_API_URL } else { LIVE_API_URL };
        Ok(Self {
            api_url: LIVE_API_URL.to_string(),
            account_url: account_url.to_string(),
            api_key,
        })
    }

    /// Read the API key from the first line of `path`.
    pub fn from_key_file(demo: bool, path: &Path) -> Result<Self, CoreError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Config(format!("Cannot read API key file {}: {e}", path.display()))
        })?;
        let key = contents.lines().next().unwrap_or_default();
        Self::new(demo, key)
    }

    /// `SWYFTX_API_KEY` if set and non-empty, otherwise the key file.
    pub fn load(demo: bool, key_file: &Path) -> Result<Self, CoreError> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Self::new(demo, key),
            _ => Self::from_key_file(demo, key_file),
        }
    }
}
