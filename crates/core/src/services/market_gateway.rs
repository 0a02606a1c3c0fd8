use tracing::{debug, warn};

use crate::api::traits::DashboardApi;
use crate::errors::CoreError;
use crate::models::market::SymbolMatch;
use crate::services::sequence::{RequestSequence, RequestToken};

/// Minimum trimmed query length before a search request is issued.
const MIN_QUERY_LEN: usize = 2;

/// Stateless-per-call symbol search with stale-response protection.
///
/// Every keystroke past the threshold issues a fresh request with no
/// cancellation, so responses can arrive out of order. Each request carries
/// a [`RequestToken`]; a response whose token is no longer the latest issued
/// one is discarded instead of overwriting newer results.
#[derive(Debug, Default)]
pub struct MarketGateway {
    matches: Vec<SymbolMatch>,
    seq: RequestSequence,
}

impl MarketGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a search. Returns `None` (and clears any displayed matches)
    /// when the trimmed query is under the threshold — no request should be
    /// issued in that case.
    pub fn begin(&mut self, query: &str) -> Option<RequestToken> {
        let trimmed = query.trim();
        if trimmed.chars().count() < MIN_QUERY_LEN {
            self.matches.clear();
            // A response still in flight for the prior longer query must not
            // repopulate the cleared list.
            self.seq.supersede();
            return None;
        }
        Some(self.seq.issue())
    }

    /// Apply a response for the request identified by `token`. Returns
    /// `false` if the response was stale and dropped.
    pub fn apply(&mut self, token: RequestToken, matches: Vec<SymbolMatch>) -> bool {
        if !self.seq.is_current(token) {
            warn!(?token, "discarding stale autocomplete response");
            return false;
        }
        self.matches = matches;
        true
    }

    /// Convenience wrapper: begin, fetch, apply.
    ///
    /// Returns the match set now on display. Since `&mut self` is held across
    /// the await this path cannot race with itself; frontends that interleave
    /// requests drive `begin`/`apply` directly.
    pub async fn search(
        &mut self,
        api: &dyn DashboardApi,
        query: &str,
    ) -> Result<&[SymbolMatch], CoreError> {
        let token = match self.begin(query) {
            Some(token) => token,
            None => return Ok(&self.matches),
        };
        let matches = api.autocomplete(query.trim()).await?;
        debug!(query = query.trim(), count = matches.len(), "autocomplete results");
        self.apply(token, matches);
        Ok(&self.matches)
    }

    /// Matches currently on display (latest applied response).
    #[must_use]
    pub fn matches(&self) -> &[SymbolMatch] {
        &self.matches
    }
}
