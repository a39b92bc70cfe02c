use thiserror::Error;

/// Unified error type for the entire gridline-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// Domain failures (not enough cookies, unknown ids, locked upgrades) are
/// ordinary `Err` values the caller is expected to handle — never panics.
/// An early collection attempt is not represented here at all: it is a
/// successful `CollectOutcome::OnCooldown`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Ledger / Trading ────────────────────────────────────────────
    #[error("Insufficient cookies: need {needed:.2}, have {available:.2}")]
    InsufficientFunds { needed: f64, available: f64 },

    #[error("Unknown asset: {0}")]
    UnknownAsset(String),

    #[error("Insufficient holdings of {asset}: tried to sell {requested}, hold {held}")]
    InsufficientHoldings {
        asset: String,
        requested: u32,
        held: u32,
    },

    // ── City / Investment ───────────────────────────────────────────
    #[error("Unknown city point: {0}")]
    UnknownPoint(u32),

    #[error("City point {point} has no upgrade at index {index}")]
    UnknownUpgrade { point: u32, index: usize },

    #[error("Upgrade requires level {required}, point is at level {current}")]
    UpgradeLocked { required: u32, current: u32 },

    #[error("No area investment defined for category: {0}")]
    UnknownArea(String),

    // ── Collection ──────────────────────────────────────────────────
    #[error("Unknown cookie source: {0}")]
    UnknownSource(String),

    // ── Validation ──────────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    // ── Storage ─────────────────────────────────────────────────────
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Randomness ──────────────────────────────────────────────────
    #[error("Randomness source failed: {0}")]
    Randomness(String),

    // ── Backend / Network ───────────────────────────────────────────
    #[error("Backend error ({endpoint}): {message}")]
    Backend { endpoint: String, message: String },

    #[error("Network error: {0}")]
    Network(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::StoreUnavailable(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Sanitize error message: strip query parameters from URLs.
        // reqwest errors often contain full request URLs.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
