use async_trait::async_trait;
use std::collections::HashMap;

use crate::errors::CoreError;
use crate::models::advisor::{AdvisorAnswer, AdvisorRequest};
use crate::models::gainers::GainerRecord;
use crate::models::market::SymbolMatch;
use crate::models::metrics::MetricsSnapshot;
use crate::models::portfolio::Portfolio;
use crate::models::sentiment::{SentimentSource, SentimentSummary};

/// Trait abstraction over the dashboard backend.
///
/// The real backend is a JSON-over-HTTP service (`HttpDashboardApi`); tests
/// substitute recording mocks. Keeping every endpoint behind this seam means
/// the orchestration logic never touches the wire format directly.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait DashboardApi: Send + Sync {
    /// Fetch one page of top gainers starting at `offset`.
    async fn top_gainers(&self, offset: u32, limit: u32) -> Result<Vec<GainerRecord>, CoreError>;

    /// Ranked symbol matches for a search query.
    async fn autocomplete(&self, query: &str) -> Result<Vec<SymbolMatch>, CoreError>;

    /// Upload a portfolio file; returns the backend-parsed symbol → quantity
    /// summary on success.
    async fn upload_portfolio(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<HashMap<String, u32>, CoreError>;

    /// Derive aggregate metrics for the given portfolio snapshot.
    async fn portfolio_metrics(&self, portfolio: &Portfolio)
        -> Result<MetricsSnapshot, CoreError>;

    /// Submit a composed question to the AI advisor.
    async fn ask_advisor(&self, request: &AdvisorRequest) -> Result<AdvisorAnswer, CoreError>;

    /// Fetch the latest news-sentiment summary from the given source.
    async fn sentiment(&self, source: SentimentSource) -> Result<SentimentSummary, CoreError>;
}
