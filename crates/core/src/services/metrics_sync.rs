use tracing::{debug, warn};

use crate::api::traits::DashboardApi;
use crate::errors::CoreError;
use crate::models::metrics::MetricsSnapshot;
use crate::models::portfolio::Portfolio;
use crate::services::sequence::{RequestSequence, RequestToken};

/// Keeps backend-derived metrics in step with the portfolio.
///
/// Triggered on every portfolio change, including the portfolio becoming
/// empty. The Sharpe ratio of the most recently applied snapshot is cached
/// for the advisor. A mutation is never blocked on the fetch it triggers, so
/// multiple fetches can be outstanding; stale responses are discarded by
/// request token.
#[derive(Debug, Default)]
pub struct MetricsSynchronizer {
    snapshot: Option<MetricsSnapshot>,
    latest_sharpe: f64,
    last_error: Option<String>,
    seq: RequestSequence,
}

impl MetricsSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// React to a portfolio change.
    ///
    /// An empty portfolio clears the displayed metrics and resets the cached
    /// Sharpe to 0 synchronously — no network round-trip — and returns
    /// `None`. Otherwise a token for the required fetch is issued.
    pub fn begin(&mut self, portfolio: &Portfolio) -> Option<RequestToken> {
        if portfolio.is_empty() {
            self.snapshot = None;
            self.latest_sharpe = 0.0;
            self.last_error = None;
            // An in-flight fetch for the previously non-empty portfolio must
            // not land on top of the reset.
            self.seq.supersede();
            return None;
        }
        Some(self.seq.issue())
    }

    /// Apply the outcome of a metrics fetch started with `token`.
    ///
    /// On success the snapshot and cached Sharpe are updated; on failure the
    /// prior values stay untouched (nothing was partially applied) and the
    /// error is retained for the renderer. Stale responses are dropped.
    /// Returns `true` only when a fresh snapshot was applied.
    pub fn apply(
        &mut self,
        token: RequestToken,
        result: Result<MetricsSnapshot, CoreError>,
    ) -> bool {
        if !self.seq.is_current(token) {
            warn!(?token, "discarding stale metrics response");
            return false;
        }
        match result {
            Ok(snapshot) => {
                debug!(sharpe = snapshot.sharpe_ratio, "metrics updated");
                self.latest_sharpe = snapshot.sharpe_ratio;
                self.snapshot = Some(snapshot);
                self.last_error = None;
                true
            }
            Err(e) => {
                warn!(error = %e, "metrics fetch failed; keeping prior values");
                self.last_error = Some(e.to_string());
                false
            }
        }
    }

    /// Begin + fetch + apply in one step, for the common serialized path.
    /// Fetch failures are absorbed here (the triggering mutation already
    /// succeeded) and surface through [`Self::last_error`].
    pub async fn refresh(&mut self, api: &dyn DashboardApi, portfolio: &Portfolio) {
        let token = match self.begin(portfolio) {
            Some(token) => token,
            None => return,
        };
        let result = api.portfolio_metrics(portfolio).await;
        self.apply(token, result);
    }

    /// Latest applied metrics, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<&MetricsSnapshot> {
        self.snapshot.as_ref()
    }

    /// Cached Sharpe value for the advisor; 0 when the portfolio is empty
    /// or no metrics have been fetched yet.
    #[must_use]
    pub fn latest_sharpe(&self) -> f64 {
        self.latest_sharpe
    }

    /// Message of the most recent failed fetch, cleared by the next success
    /// or by the portfolio emptying.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
