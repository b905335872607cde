use thiserror::Error;

/// Unified error type for the entire swyftx-portfolio-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Valuation engine ────────────────────────────────────────────
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Invalid quote for {code}: mid-price {mid} is not positive")]
    InvalidQuote { code: String, mid: f64 },

    #[error("Asset id {0} is not present in the reference catalog")]
    UnresolvedAsset(u64),

    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    #[error("Unsupported action type: {0}")]
    UnsupportedActionType(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Server unavailable: {0}")]
    ServerUnavailable(String),

    // ── Configuration / I/O ─────────────────────────────────────────
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File I/O error: {0}")]
    FileIO(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Input validation ────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl CoreError {
    /// `true` for the per-record failures of a valuation or ledger pass.
    #[must_use]
    pub fn is_record_level(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidQuote { .. }
                | CoreError::UnresolvedAsset(_)
                | CoreError::DivisionByZero(_)
                | CoreError::UnsupportedActionType(_)
        )
    }
}

// ── Conversions ─────────────────────────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        let kind = if e.is_timeout() {
            "request timed out"
        } else if e.is_connect() {
            "connection failed"
        } else {
            "request failed"
        };
        // Messages never include the request URL.
        CoreError::Network(format!("{kind}: {}", e.without_url()))
    }
}
