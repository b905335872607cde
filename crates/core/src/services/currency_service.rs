use crate::errors::CoreError;
use crate::models::catalog::ReferenceCatalog;

/// Converts between any two currency codes known to the catalog.
///
/// Every traded-asset quote is anchor-relative, so each code has a single
/// mid-price against the anchor (the anchor itself is 1). The ratio between
/// two codes is the quotient of their mid-prices:
///
/// `ratio(from, to) = mid(to) / mid(from)`
///
/// e.g. with USDT at 1.48/1.50 AUD, `ratio("AUD", "USDT") == 1.49`.
/// Only mid-prices are used; bid, ask and last-trade prices never enter
/// a conversion.
pub struct CurrencyService {
    anchor_currency: String,
}

impl CurrencyService {
    pub fn new(anchor_currency: impl Into<String>) -> Self {
        Self {
            anchor_currency: anchor_currency.into(),
        }
    }

    #[must_use]
    pub fn anchor_currency(&self) -> &str {
        &self.anchor_currency
    }

    /// The anchor, or any traded code.
    #[must_use]
    pub fn exists_currency(&self, catalog: &ReferenceCatalog, code: &str) -> bool {
        code == self.anchor_currency || catalog.traded_by_code(code).is_some()
    }

    /// Anchor-relative mid-price of `code`.
    pub fn mid_price(&self, catalog: &ReferenceCatalog, code: &str) -> Result<f64, CoreError> {
        if code == self.anchor_currency {
            return Ok(1.0);
        }

        let asset = catalog
            .traded_by_code(code)
            .ok_or_else(|| CoreError::UnknownCurrency(code.to_string()))?;

        let mid = asset.mid_price();
        if mid.is_nan() || mid <= 0.0 {
            return Err(CoreError::InvalidQuote {
                code: code.to_string(),
                mid,
            });
        }
        Ok(mid)
    }

    /// Conversion ratio between two codes. Both must resolve; there is no
    /// fallback value for a missing code.
    pub fn ratio(&self, catalog: &ReferenceCatalog, from: &str, to: &str) -> Result<f64, CoreError> {
        let from_mid = self.mid_price(catalog, from)?;
        let to_mid = self.mid_price(catalog, to)?;
        Ok(to_mid / from_mid)
    }
}
