use serde::{Deserialize, Serialize};

/// Number of records fetched per gainers page. The offset cursor advances
/// by this amount after every successful fetch, even a short one.
pub const GAINERS_PAGE_SIZE: u32 = 5;

/// One top-gainer row as served by the backend.
///
/// Immutable once fetched; accumulated into an append-only sequence in
/// fetch order as pagination advances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GainerRecord {
    /// Ticker symbol (backend document id).
    pub symbol: String,

    /// Last traded price.
    pub price: f64,

    /// Signed percentage change.
    pub change: f64,
}
