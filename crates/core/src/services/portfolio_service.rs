use std::collections::HashMap;

use crate::errors::CoreError;
use crate::models::portfolio::Portfolio;

/// Buy/sell/replace logic for the portfolio mapping.
///
/// Pure business logic — no I/O, no API calls. Easy to test. All mutations
/// are synchronous point-in-time updates; there is no partial-application
/// window.
pub struct PortfolioService;

impl PortfolioService {
    pub fn new() -> Self {
        Self
    }

    /// Add `quantity` of `symbol` to the holdings, creating the entry if
    /// absent. Rejects a zero quantity with a validation error.
    pub fn buy(
        &self,
        portfolio: &mut Portfolio,
        symbol: &str,
        quantity: u32,
    ) -> Result<(), CoreError> {
        if quantity == 0 {
            return Err(CoreError::Validation(
                "Buy quantity must be a positive integer".into(),
            ));
        }
        if symbol.trim().is_empty() {
            return Err(CoreError::Validation("Buy symbol must not be empty".into()));
        }

        *portfolio.holdings.entry(symbol.to_string()).or_insert(0) += quantity;
        Ok(())
    }

    /// Subtract `quantity` of `symbol`, removing the entry entirely when the
    /// result would drop to zero or below. Rejects a zero quantity or an
    /// absent symbol; a rejected sell leaves the portfolio untouched.
    pub fn sell(
        &self,
        portfolio: &mut Portfolio,
        symbol: &str,
        quantity: u32,
    ) -> Result<(), CoreError> {
        if quantity == 0 {
            return Err(CoreError::Validation(
                "Sell quantity must be a positive integer".into(),
            ));
        }
        let held = match portfolio.holdings.get_mut(symbol) {
            Some(held) => held,
            None => {
                return Err(CoreError::Validation(format!(
                    "Cannot sell {symbol} — not in portfolio"
                )));
            }
        };

        if *held > quantity {
            *held -= quantity;
        } else {
            // Selling everything (or more) clamps to removal.
            portfolio.holdings.remove(symbol);
        }
        Ok(())
    }

    /// Wholesale replacement of the holdings, used after a successful upload.
    /// Entries not present in `mapping` are gone afterwards.
    pub fn replace_all(&self, portfolio: &mut Portfolio, mapping: HashMap<String, u32>) {
        portfolio.holdings = mapping;
        portfolio.holdings.retain(|_, qty| *qty > 0);
    }
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new()
    }
}
