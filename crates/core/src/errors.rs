use thiserror::Error;

/// Unified error type for the entire stock-dashboard-core library.
/// Every public fallible function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Local validation (no network call was made) ─────────────────
    #[error("Validation failed: {0}")]
    Validation(String),

    // ── Backend-reported failure (status != "success") ──────────────
    #[error("API error ({endpoint}): {message}")]
    Api {
        endpoint: String,
        message: String,
    },

    // ── Transport / parsing ─────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl CoreError {
    /// Whether this error was produced without issuing a network request.
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(self, CoreError::Validation(_))
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            CoreError::Deserialization(e.to_string())
        } else {
            CoreError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
