use serde::{Deserialize, Serialize};

/// Order quantity pre-filled next to each autocomplete match.
pub const DEFAULT_ORDER_QUANTITY: u32 = 1;

/// A ranked autocomplete match for a symbol search.
///
/// Ephemeral: the match set is replaced wholesale on every query and never
/// cached across queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolMatch {
    /// Ticker symbol.
    pub symbol: String,

    /// Company display name (may be empty if the backend has none).
    pub name: String,
}
