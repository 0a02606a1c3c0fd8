use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The authoritative symbol → quantity mapping for the session.
///
/// Created empty at session start and mutated only through explicit
/// buy/sell/replace operations (see `PortfolioService`). Quantities are
/// positive by construction: an entry that would drop to zero is removed
/// instead of being stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portfolio {
    /// Current holdings. Symbols are case-sensitive identifiers as the
    /// backend serves them (e.g. "AAPL").
    pub holdings: HashMap<String, u32>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quantity held for a symbol, 0 if absent.
    #[must_use]
    pub fn quantity(&self, symbol: &str) -> u32 {
        self.holdings.get(symbol).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Number of distinct symbols held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    /// Held symbols in deterministic (sorted) order, for display.
    #[must_use]
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.holdings.keys().map(String::as_str).collect();
        symbols.sort_unstable();
        symbols
    }
}
