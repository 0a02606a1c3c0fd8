pub mod api;
pub mod errors;
pub mod models;
pub mod services;

use api::http::HttpDashboardApi;
use api::traits::DashboardApi;
use models::{
    advisor::AdvisorAnswer,
    gainers::GainerRecord,
    market::SymbolMatch,
    metrics::MetricsSnapshot,
    portfolio::Portfolio,
    sentiment::{SentimentSource, SentimentSummary},
};
use services::{
    advisor_service::AdvisorService, gainers_feed::GainersFeed, market_gateway::MarketGateway,
    metrics_sync::MetricsSynchronizer, portfolio_service::PortfolioService,
    sentiment_feed::SentimentFeed,
};

use errors::CoreError;

/// Main entry point for the stock dashboard core.
///
/// Owns the session's entire orchestration state — the portfolio, the
/// accumulated gainers feed, the latest sentiment summary, the metrics
/// cache, and the advisor — and coordinates the asynchronous backend calls
/// that keep them consistent. Lifetime is the session; nothing persists.
///
/// The rendering layer reads state through the `#[must_use]` getters and
/// drives mutations through the async methods. Any portfolio mutation
/// triggers a metrics resync; a failed resync never fails the mutation that
/// caused it (see [`StockDashboard::metrics_error`]).
#[must_use]
pub struct StockDashboard {
    api: Box<dyn DashboardApi>,
    portfolio: Portfolio,
    portfolio_service: PortfolioService,
    gainers: GainersFeed,
    market: MarketGateway,
    metrics: MetricsSynchronizer,
    sentiment: SentimentFeed,
    advisor: AdvisorService,
}

impl std::fmt::Debug for StockDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StockDashboard")
            .field("holdings", &self.portfolio.len())
            .field("gainers", &self.gainers.records().len())
            .field("gainers_offset", &self.gainers.offset())
            .field("latest_sharpe", &self.metrics.latest_sharpe())
            .finish()
    }
}

impl StockDashboard {
    /// Create a dashboard over any backend implementation (real or mock).
    /// State starts empty; call [`StockDashboard::start`] to load the
    /// initial gainers page.
    pub fn new(api: Box<dyn DashboardApi>) -> Self {
        Self {
            api,
            portfolio: Portfolio::new(),
            portfolio_service: PortfolioService::new(),
            gainers: GainersFeed::new(),
            market: MarketGateway::new(),
            metrics: MetricsSynchronizer::new(),
            sentiment: SentimentFeed::new(),
            advisor: AdvisorService::new(),
        }
    }

    /// Create a dashboard talking JSON-over-HTTP to `base_url`.
    pub fn connect(base_url: impl Into<String>) -> Self {
        Self::new(Box::new(HttpDashboardApi::new(base_url)))
    }

    /// Eager startup work: load the first gainers page.
    pub async fn start(&mut self) -> Result<(), CoreError> {
        self.gainers.load_next_page(self.api.as_ref()).await?;
        Ok(())
    }

    // ── Portfolio ───────────────────────────────────────────────────

    /// Buy `quantity` of `symbol`. Rejects a zero quantity without touching
    /// any state; a successful buy triggers a metrics resync.
    pub async fn buy(&mut self, symbol: &str, quantity: u32) -> Result<(), CoreError> {
        self.portfolio_service
            .buy(&mut self.portfolio, symbol, quantity)?;
        self.resync_metrics().await;
        Ok(())
    }

    /// Sell `quantity` of `symbol`; selling the full holding (or more)
    /// removes the entry. Rejected sells (zero quantity, absent symbol)
    /// leave the portfolio untouched and trigger no metrics fetch.
    pub async fn sell(&mut self, symbol: &str, quantity: u32) -> Result<(), CoreError> {
        self.portfolio_service
            .sell(&mut self.portfolio, symbol, quantity)?;
        self.resync_metrics().await;
        Ok(())
    }

    /// Upload a portfolio file. On backend success the parsed summary
    /// replaces the holdings wholesale and metrics resync; on any failure
    /// the current portfolio is untouched.
    pub async fn upload_portfolio(
        &mut self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<(), CoreError> {
        if bytes.is_empty() {
            return Err(CoreError::Validation("Please upload a file first".into()));
        }
        let summary = self.api.upload_portfolio(file_name, bytes).await?;
        self.portfolio_service
            .replace_all(&mut self.portfolio, summary);
        self.resync_metrics().await;
        Ok(())
    }

    /// Read-only view of the current holdings.
    #[must_use]
    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    // ── Gainers feed ────────────────────────────────────────────────

    /// Load and append the next gainers page; returns the new records.
    pub async fn load_more_gainers(&mut self) -> Result<&[GainerRecord], CoreError> {
        self.gainers.load_next_page(self.api.as_ref()).await
    }

    /// All gainers accumulated so far, in fetch order.
    #[must_use]
    pub fn gainers(&self) -> &[GainerRecord] {
        self.gainers.records()
    }

    /// Current pagination cursor of the gainers feed.
    #[must_use]
    pub fn gainers_offset(&self) -> u32 {
        self.gainers.offset()
    }

    /// Select a gainer row: seeds the advisor question and reference price.
    /// Returns the suggested question, or `None` for an out-of-range index.
    pub fn select_gainer(&mut self, index: usize) -> Option<&str> {
        let record = self.gainers.records().get(index)?.clone();
        self.advisor.seed_from_gainer(&record);
        self.advisor.suggested_question()
    }

    // ── Symbol search ───────────────────────────────────────────────

    /// Search for symbols. Queries under 2 trimmed characters clear the
    /// match list without a network call. Returns the matches on display.
    pub async fn search_symbols(&mut self, query: &str) -> Result<&[SymbolMatch], CoreError> {
        self.market.search(self.api.as_ref(), query).await
    }

    /// Autocomplete matches currently on display.
    #[must_use]
    pub fn search_matches(&self) -> &[SymbolMatch] {
        self.market.matches()
    }

    /// Select an autocomplete match (the row itself, not its buy control):
    /// seeds the advisor question; the reference price falls back to the
    /// default since matches carry no price. Returns the suggested question.
    pub fn select_match(&mut self, index: usize) -> Option<&str> {
        let m = self.market.matches().get(index)?.clone();
        self.advisor.seed_from_match(&m);
        self.advisor.suggested_question()
    }

    // ── Metrics ─────────────────────────────────────────────────────

    /// Latest applied metrics, if any.
    #[must_use]
    pub fn metrics(&self) -> Option<&MetricsSnapshot> {
        self.metrics.snapshot()
    }

    /// Cached Sharpe value consumed by the advisor. 0 while the portfolio
    /// is empty or before the first metrics fetch completes.
    #[must_use]
    pub fn latest_sharpe(&self) -> f64 {
        self.metrics.latest_sharpe()
    }

    /// Error from the most recent failed metrics fetch, if any. Metrics
    /// failures never fail the mutation that triggered them.
    #[must_use]
    pub fn metrics_error(&self) -> Option<&str> {
        self.metrics.last_error()
    }

    // ── Sentiment ───────────────────────────────────────────────────

    /// Fetch and replace the sentiment summary from the given source.
    pub async fn refresh_sentiment(
        &mut self,
        source: SentimentSource,
    ) -> Result<&SentimentSummary, CoreError> {
        self.sentiment.refresh(self.api.as_ref(), source).await
    }

    /// Latest sentiment summary, if any has been fetched.
    #[must_use]
    pub fn sentiment(&self) -> Option<&SentimentSummary> {
        self.sentiment.latest()
    }

    // ── Advisor ─────────────────────────────────────────────────────

    /// Submit a question to the AI advisor.
    ///
    /// The request snapshots the rest of the dashboard: typed sentiment
    /// score (default -0.3 before the first sentiment fetch), selected
    /// reference price (default 100), the ENTIRE accumulated gainers list,
    /// the portfolio, and the cached Sharpe value. An empty question fails
    /// locally with no network call.
    pub async fn ask_advisor(&mut self, question: &str) -> Result<&AdvisorAnswer, CoreError> {
        self.advisor
            .ask(
                self.api.as_ref(),
                question,
                self.sentiment.avg_score(),
                self.gainers.symbols(),
                &self.portfolio,
                self.metrics.latest_sharpe(),
            )
            .await
    }

    /// Question suggested by the most recent gainer/match selection.
    #[must_use]
    pub fn suggested_question(&self) -> Option<&str> {
        self.advisor.suggested_question()
    }

    /// Latest successful advisor answer, if any.
    #[must_use]
    pub fn advisor_answer(&self) -> Option<&AdvisorAnswer> {
        self.advisor.latest_answer()
    }

    /// Message from the most recent failed advisor ask, if any.
    #[must_use]
    pub fn advisor_error(&self) -> Option<&str> {
        self.advisor.last_error()
    }

    // ── Internal ────────────────────────────────────────────────────

    /// Derived-state side effect of every portfolio mutation. Never fails:
    /// the empty case resets synchronously, fetch failures are retained in
    /// the synchronizer and surfaced read-only.
    async fn resync_metrics(&mut self) {
        self.metrics.refresh(self.api.as_ref(), &self.portfolio).await;
    }
}
