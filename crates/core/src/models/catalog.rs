use std::collections::HashSet;

use crate::errors::CoreError;

use super::asset::{ListedAsset, TradedAsset};

/// Normalise a user-supplied currency code ("usdt " → "USDT").
#[must_use]
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Read-only reference data fetched once per session:
/// listed assets (metadata) and traded assets (live quotes).
#[derive(Debug, Clone, Default)]
pub struct ReferenceCatalog {
    listed: Vec<ListedAsset>,
    traded: Vec<TradedAsset>,
}

impl ReferenceCatalog {
    /// Build a catalog. Traded codes must be unique within the set.
    pub fn new(listed: Vec<ListedAsset>, traded: Vec<TradedAsset>) -> Result<Self, CoreError> {
        let mut seen = HashSet::with_capacity(traded.len());
        for asset in &traded {
            if !seen.insert(asset.code.as_str()) {
                return Err(CoreError::ValidationError(format!(
                    "Duplicate traded asset code '{}'",
                    asset.code
                )));
            }
        }
        Ok(Self { listed, traded })
    }

    #[must_use]
    pub fn listed(&self) -> &[ListedAsset] {
        &self.listed
    }

    #[must_use]
    pub fn traded(&self) -> &[TradedAsset] {
        &self.traded
    }

    #[must_use]
    pub fn listed_by_id(&self, id: u64) -> Option<&ListedAsset> {
        self.listed.iter().find(|a| a.id == id)
    }

    #[must_use]
    pub fn traded_by_id(&self, id: u64) -> Option<&TradedAsset> {
        self.traded.iter().find(|a| a.id == id)
    }

    #[must_use]
    pub fn traded_by_code(&self, code: &str) -> Option<&TradedAsset> {
        self.traded.iter().find(|a| a.code == code)
    }
}
