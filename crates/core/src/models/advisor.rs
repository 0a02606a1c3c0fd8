use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sentiment score sent to the advisor when no sentiment has been fetched.
pub const DEFAULT_SENTIMENT_SCORE: f64 = -0.3;

/// Reference price sent to the advisor when no symbol has been selected.
pub const DEFAULT_REFERENCE_PRICE: f64 = 100.0;

/// Transactions context is not wired up yet; the backend receives this
/// fixed string until a transaction log exists.
pub const TRANSACTIONS_PLACEHOLDER: &str = "No recent transactions";

/// Composite request submitted to the AI advisor endpoint.
///
/// Assembled from a point-in-time snapshot of every other component:
/// the current question, the typed sentiment score, the selected reference
/// price, the FULL accumulated gainers list (not just the visible page),
/// the portfolio, and the cached Sharpe value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvisorRequest {
    pub question: String,
    pub sentiment_score: f64,
    pub price: f64,
    pub gainers_list: Vec<String>,
    pub portfolio: HashMap<String, u32>,
    pub sharpe_value: f64,
    pub transactions: String,
}

/// A successful advisor reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorAnswer {
    /// Free-text answer from the model.
    pub answer: String,

    /// Sharpe classification label computed by the backend.
    pub classification: String,
}
