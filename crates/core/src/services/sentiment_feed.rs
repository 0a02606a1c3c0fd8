use tracing::debug;

use crate::api::traits::DashboardApi;
use crate::errors::CoreError;
use crate::models::sentiment::{SentimentSource, SentimentSummary};

/// Holds the latest news-sentiment summary.
///
/// Two independent triggers (stored analysis and local-model analysis)
/// fetch a summary; each replaces the prior one in place. No history is
/// retained. The average score is exposed as a typed value for the advisor.
#[derive(Debug, Default)]
pub struct SentimentFeed {
    latest: Option<SentimentSummary>,
}

impl SentimentFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a fresh summary from `source` and replace the current one.
    /// On failure the prior summary is kept.
    pub async fn refresh(
        &mut self,
        api: &dyn DashboardApi,
        source: SentimentSource,
    ) -> Result<&SentimentSummary, CoreError> {
        let summary = api.sentiment(source).await?;
        debug!(?source, avg_score = summary.avg_score, "sentiment refreshed");
        Ok(&*self.latest.insert(summary))
    }

    /// Latest fetched summary, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&SentimentSummary> {
        self.latest.as_ref()
    }

    /// Typed average score for the advisor; `None` before the first fetch.
    #[must_use]
    pub fn avg_score(&self) -> Option<f64> {
        self.latest.as_ref().map(|s| s.avg_score)
    }
}
