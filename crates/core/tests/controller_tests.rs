// ═══════════════════════════════════════════════════════════════════
// Controller Tests — StockDashboard facade end-to-end over a recording
// mock backend: mutation side effects, derived metrics, advisor snapshots
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use stock_dashboard_core::api::traits::DashboardApi;
use stock_dashboard_core::errors::CoreError;
use stock_dashboard_core::models::advisor::{AdvisorAnswer, AdvisorRequest};
use stock_dashboard_core::models::gainers::{GainerRecord, GAINERS_PAGE_SIZE};
use stock_dashboard_core::models::market::SymbolMatch;
use stock_dashboard_core::models::metrics::MetricsSnapshot;
use stock_dashboard_core::models::portfolio::Portfolio;
use stock_dashboard_core::models::sentiment::{NewsItem, SentimentSource, SentimentSummary};
use stock_dashboard_core::StockDashboard;

// ═══════════════════════════════════════════════════════════════════
// Test Helpers — recording backend
// ═══════════════════════════════════════════════════════════════════

fn gainer(symbol: &str, price: f64, change: f64) -> GainerRecord {
    GainerRecord {
        symbol: symbol.into(),
        price,
        change,
    }
}

fn page(symbols: &[&str]) -> Vec<GainerRecord> {
    symbols
        .iter()
        .enumerate()
        .map(|(i, s)| gainer(s, 50.0 + i as f64, 2.0))
        .collect()
}

/// Backend mock that records every endpoint hit and the last advisor
/// request it received.
#[derive(Default)]
struct RecordingApi {
    calls: Mutex<Vec<&'static str>>,
    gainers_pages: Mutex<VecDeque<Vec<GainerRecord>>>,
    matches: Mutex<Vec<SymbolMatch>>,
    upload_summary: Mutex<Option<HashMap<String, u32>>>,
    metrics: Mutex<Option<MetricsSnapshot>>,
    fail_metrics: AtomicBool,
    sentiment: Mutex<Option<SentimentSummary>>,
    last_advisor_request: Mutex<Option<AdvisorRequest>>,
}

impl RecordingApi {
    fn record(&self, endpoint: &'static str) {
        self.calls.lock().unwrap().push(endpoint);
    }

    fn calls_to(&self, endpoint: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| **c == endpoint)
            .count()
    }

    fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl DashboardApi for RecordingApi {
    async fn top_gainers(&self, _offset: u32, _limit: u32) -> Result<Vec<GainerRecord>, CoreError> {
        self.record("/top-gainers");
        Ok(self
            .gainers_pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default())
    }

    async fn autocomplete(&self, _query: &str) -> Result<Vec<SymbolMatch>, CoreError> {
        self.record("/autocomplete-symbols");
        Ok(self.matches.lock().unwrap().clone())
    }

    async fn upload_portfolio(
        &self,
        _file_name: &str,
        _bytes: Vec<u8>,
    ) -> Result<HashMap<String, u32>, CoreError> {
        self.record("/upload");
        self.upload_summary
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| CoreError::Api {
                endpoint: "/upload".into(),
                message: "Invalid file type".into(),
            })
    }

    async fn portfolio_metrics(
        &self,
        _portfolio: &Portfolio,
    ) -> Result<MetricsSnapshot, CoreError> {
        self.record("/portfolio-metrics");
        if self.fail_metrics.load(Ordering::SeqCst) {
            return Err(CoreError::Network("timeout".into()));
        }
        self.metrics
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| CoreError::Api {
                endpoint: "/portfolio-metrics".into(),
                message: "Empty portfolio".into(),
            })
    }

    async fn ask_advisor(&self, request: &AdvisorRequest) -> Result<AdvisorAnswer, CoreError> {
        self.record("/ask-llm");
        *self.last_advisor_request.lock().unwrap() = Some(request.clone());
        Ok(AdvisorAnswer {
            answer: "Diversify.".into(),
            classification: "Good".into(),
        })
    }

    async fn sentiment(&self, source: SentimentSource) -> Result<SentimentSummary, CoreError> {
        self.record(match source {
            SentimentSource::Stored => "/analyze-sentiment",
            SentimentSource::Local => "/analyze-news-local",
        });
        self.sentiment
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| CoreError::Network("unreachable".into()))
    }
}

fn dashboard() -> (Arc<RecordingApi>, StockDashboard) {
    let api = Arc::new(RecordingApi::default());
    let dash = StockDashboard::new(Box::new(SharedApi(api.clone())));
    (api, dash)
}

/// Lets the test keep a handle on the mock the dashboard owns.
struct SharedApi(Arc<RecordingApi>);

#[async_trait]
impl DashboardApi for SharedApi {
    async fn top_gainers(&self, offset: u32, limit: u32) -> Result<Vec<GainerRecord>, CoreError> {
        self.0.top_gainers(offset, limit).await
    }
    async fn autocomplete(&self, query: &str) -> Result<Vec<SymbolMatch>, CoreError> {
        self.0.autocomplete(query).await
    }
    async fn upload_portfolio(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<HashMap<String, u32>, CoreError> {
        self.0.upload_portfolio(file_name, bytes).await
    }
    async fn portfolio_metrics(
        &self,
        portfolio: &Portfolio,
    ) -> Result<MetricsSnapshot, CoreError> {
        self.0.portfolio_metrics(portfolio).await
    }
    async fn ask_advisor(&self, request: &AdvisorRequest) -> Result<AdvisorAnswer, CoreError> {
        self.0.ask_advisor(request).await
    }
    async fn sentiment(&self, source: SentimentSource) -> Result<SentimentSummary, CoreError> {
        self.0.sentiment(source).await
    }
}

fn metrics(avg: f64, sharpe: f64) -> MetricsSnapshot {
    MetricsSnapshot {
        average_performance: avg,
        sharpe_ratio: sharpe,
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Portfolio mutations and derived metrics
// ═══════════════════════════════════════════════════════════════════

mod mutations {
    use super::*;

    #[tokio::test]
    async fn buy_accumulates_and_resyncs_metrics() {
        let (api, mut dash) = dashboard();
        *api.metrics.lock().unwrap() = Some(metrics(2.5, 1.1));

        dash.buy("AAPL", 10).await.unwrap();
        dash.buy("AAPL", 5).await.unwrap();

        assert_eq!(dash.portfolio().quantity("AAPL"), 15);
        assert_eq!(api.calls_to("/portfolio-metrics"), 2);
    }

    #[tokio::test]
    async fn buy_zero_quantity_is_local_failure() {
        let (api, mut dash) = dashboard();

        let err = dash.buy("AAPL", 0).await.unwrap_err();
        assert!(err.is_local());
        assert!(dash.portfolio().is_empty());
        assert_eq!(api.total_calls(), 0);
    }

    #[tokio::test]
    async fn sell_to_empty_resets_sharpe_without_fetch() {
        let (api, mut dash) = dashboard();
        *api.metrics.lock().unwrap() = Some(metrics(2.5, 1.1));

        dash.buy("AAPL", 10).await.unwrap();
        assert_eq!(dash.latest_sharpe(), 1.1);

        dash.sell("AAPL", 10).await.unwrap();

        assert!(dash.portfolio().is_empty());
        assert_eq!(dash.latest_sharpe(), 0.0);
        assert!(dash.metrics().is_none());
        // Only the buy fetched metrics; emptying resets synchronously.
        assert_eq!(api.calls_to("/portfolio-metrics"), 1);
    }

    #[tokio::test]
    async fn sell_absent_symbol_is_noop_without_fetch() {
        let (api, mut dash) = dashboard();

        assert!(dash.sell("AAPL", 1).await.is_err());
        assert!(dash.portfolio().is_empty());
        assert_eq!(api.total_calls(), 0);
    }

    #[tokio::test]
    async fn metrics_snapshot_and_cache_agree() {
        let (api, mut dash) = dashboard();
        *api.metrics.lock().unwrap() = Some(metrics(2.5, 1.1));

        dash.buy("AAPL", 5).await.unwrap();

        let snapshot = dash.metrics().unwrap();
        assert_eq!(snapshot.average_performance, 2.5);
        assert_eq!(snapshot.sharpe_ratio, 1.1);
        assert_eq!(dash.latest_sharpe(), 1.1);
    }

    #[tokio::test]
    async fn metrics_failure_keeps_prior_and_surfaces_error() {
        let (api, mut dash) = dashboard();
        *api.metrics.lock().unwrap() = Some(metrics(2.5, 1.1));
        dash.buy("AAPL", 5).await.unwrap();

        api.fail_metrics.store(true, Ordering::SeqCst);
        // The mutation itself still succeeds.
        dash.buy("MSFT", 1).await.unwrap();

        assert_eq!(dash.portfolio().quantity("MSFT"), 1);
        assert_eq!(dash.latest_sharpe(), 1.1);
        assert_eq!(dash.metrics().unwrap().sharpe_ratio, 1.1);
        assert!(dash.metrics_error().unwrap().contains("timeout"));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Gainers feed pagination
// ═══════════════════════════════════════════════════════════════════

mod gainers {
    use super::*;

    #[tokio::test]
    async fn start_loads_first_page_eagerly() {
        let (api, mut dash) = dashboard();
        api.gainers_pages
            .lock()
            .unwrap()
            .push_back(page(&["A", "B", "C", "D", "E"]));

        dash.start().await.unwrap();

        assert_eq!(dash.gainers().len(), 5);
        assert_eq!(dash.gainers_offset(), GAINERS_PAGE_SIZE);
        assert_eq!(api.calls_to("/top-gainers"), 1);
    }

    #[tokio::test]
    async fn two_pages_accumulate_to_ten() {
        let (api, mut dash) = dashboard();
        api.gainers_pages
            .lock()
            .unwrap()
            .push_back(page(&["A", "B", "C", "D", "E"]));
        api.gainers_pages
            .lock()
            .unwrap()
            .push_back(page(&["F", "G", "H", "I", "J"]));

        dash.start().await.unwrap();
        dash.load_more_gainers().await.unwrap();

        assert_eq!(dash.gainers_offset(), 10);
        assert_eq!(dash.gainers().len(), 10);
    }

    #[tokio::test]
    async fn select_gainer_seeds_question_and_price() {
        let (api, mut dash) = dashboard();
        api.gainers_pages
            .lock()
            .unwrap()
            .push_back(vec![gainer("NVDA", 901.25, 4.0)]);
        dash.start().await.unwrap();

        let question = dash.select_gainer(0).unwrap().to_string();
        assert_eq!(question, "What is the prediction for NVDA?");
        assert_eq!(dash.suggested_question(), Some(question.as_str()));

        dash.ask_advisor(&question).await.unwrap();
        let req = api.last_advisor_request.lock().unwrap().clone().unwrap();
        assert_eq!(req.price, 901.25);
    }

    #[tokio::test]
    async fn select_out_of_range_is_none() {
        let (_api, mut dash) = dashboard();
        assert!(dash.select_gainer(3).is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Symbol search
// ═══════════════════════════════════════════════════════════════════

mod search {
    use super::*;

    #[tokio::test]
    async fn short_query_clears_without_network() {
        let (api, mut dash) = dashboard();
        *api.matches.lock().unwrap() = vec![SymbolMatch {
            symbol: "AAPL".into(),
            name: "Apple".into(),
        }];

        dash.search_symbols("aa").await.unwrap();
        assert_eq!(dash.search_matches().len(), 1);

        dash.search_symbols("a").await.unwrap();
        assert!(dash.search_matches().is_empty());
        assert_eq!(api.calls_to("/autocomplete-symbols"), 1);
    }

    #[tokio::test]
    async fn select_match_seeds_with_default_price() {
        let (api, mut dash) = dashboard();
        *api.matches.lock().unwrap() = vec![SymbolMatch {
            symbol: "TSLA".into(),
            name: "Tesla".into(),
        }];

        dash.search_symbols("ts").await.unwrap();
        let question = dash.select_match(0).unwrap().to_string();
        assert_eq!(question, "What is the prediction for TSLA?");

        dash.ask_advisor(&question).await.unwrap();
        let req = api.last_advisor_request.lock().unwrap().clone().unwrap();
        assert_eq!(req.price, 100.0);
    }

    #[tokio::test]
    async fn buy_from_match_row_updates_portfolio() {
        // The buy control inside a result row goes straight to the
        // portfolio without seeding the advisor.
        let (api, mut dash) = dashboard();
        *api.metrics.lock().unwrap() = Some(metrics(1.0, 0.5));

        dash.buy("TSLA", 1).await.unwrap();
        assert_eq!(dash.portfolio().quantity("TSLA"), 1);
        assert!(dash.suggested_question().is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Upload
// ═══════════════════════════════════════════════════════════════════

mod upload {
    use super::*;

    #[tokio::test]
    async fn successful_upload_replaces_wholesale() {
        let (api, mut dash) = dashboard();
        *api.metrics.lock().unwrap() = Some(metrics(2.0, 0.9));
        dash.buy("OLD", 3).await.unwrap();

        let mut summary = HashMap::new();
        summary.insert("AAPL".to_string(), 10);
        summary.insert("MSFT".to_string(), 2);
        *api.upload_summary.lock().unwrap() = Some(summary.clone());

        dash.upload_portfolio("holdings.csv", b"Symbol,Quantity\n".to_vec())
            .await
            .unwrap();

        assert_eq!(dash.portfolio().holdings, summary);
        assert_eq!(dash.portfolio().quantity("OLD"), 0);
        // Buy and upload each resynced metrics.
        assert_eq!(api.calls_to("/portfolio-metrics"), 2);
    }

    #[tokio::test]
    async fn backend_rejection_leaves_portfolio() {
        let (api, mut dash) = dashboard();
        *api.metrics.lock().unwrap() = Some(metrics(2.0, 0.9));
        dash.buy("AAPL", 5).await.unwrap();

        let err = dash
            .upload_portfolio("notes.txt", b"hello".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Api { .. }));
        assert_eq!(dash.portfolio().quantity("AAPL"), 5);
    }

    #[tokio::test]
    async fn missing_file_is_local_failure() {
        let (api, mut dash) = dashboard();

        let err = dash
            .upload_portfolio("empty.csv", Vec::new())
            .await
            .unwrap_err();
        assert!(err.is_local());
        assert_eq!(api.total_calls(), 0);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Advisor
// ═══════════════════════════════════════════════════════════════════

mod advisor {
    use super::*;

    #[tokio::test]
    async fn empty_question_makes_no_network_call() {
        let (api, mut dash) = dashboard();

        let err = dash.ask_advisor("   ").await.unwrap_err();
        assert!(err.is_local());
        assert_eq!(api.total_calls(), 0);
        assert!(dash.advisor_answer().is_none());
    }

    #[tokio::test]
    async fn request_defaults_before_any_fetches() {
        let (api, mut dash) = dashboard();

        dash.ask_advisor("What should I do?").await.unwrap();

        let req = api.last_advisor_request.lock().unwrap().clone().unwrap();
        assert_eq!(req.sentiment_score, -0.3);
        assert_eq!(req.price, 100.0);
        assert_eq!(req.sharpe_value, 0.0);
        assert_eq!(req.transactions, "No recent transactions");
        assert!(req.gainers_list.is_empty());
        assert!(req.portfolio.is_empty());
    }

    #[tokio::test]
    async fn gainers_list_spans_full_accumulation() {
        let (api, mut dash) = dashboard();
        api.gainers_pages
            .lock()
            .unwrap()
            .push_back(page(&["A", "B", "C", "D", "E"]));
        api.gainers_pages
            .lock()
            .unwrap()
            .push_back(page(&["F", "G", "H", "I", "J"]));

        dash.start().await.unwrap();
        dash.load_more_gainers().await.unwrap();
        dash.ask_advisor("Outlook?").await.unwrap();

        let req = api.last_advisor_request.lock().unwrap().clone().unwrap();
        // Everything accumulated, not just the last visible page.
        assert_eq!(req.gainers_list.len(), 10);
    }

    #[tokio::test]
    async fn request_snapshots_sentiment_and_sharpe() {
        let (api, mut dash) = dashboard();
        *api.metrics.lock().unwrap() = Some(metrics(2.5, 1.1));
        *api.sentiment.lock().unwrap() = Some(SentimentSummary {
            avg_score: 0.42,
            news: vec![NewsItem {
                title: "rally".into(),
                url: "https://example.com".into(),
            }],
        });

        dash.buy("AAPL", 5).await.unwrap();
        dash.refresh_sentiment(SentimentSource::Stored).await.unwrap();
        dash.ask_advisor("Keep holding?").await.unwrap();

        let req = api.last_advisor_request.lock().unwrap().clone().unwrap();
        assert_eq!(req.sentiment_score, 0.42);
        assert_eq!(req.sharpe_value, 1.1);
        assert_eq!(req.portfolio.get("AAPL"), Some(&5));

        let answer = dash.advisor_answer().unwrap();
        assert_eq!(answer.answer, "Diversify.");
        assert_eq!(answer.classification, "Good");
    }

    #[tokio::test]
    async fn sentiment_sources_hit_distinct_endpoints() {
        let (api, mut dash) = dashboard();
        *api.sentiment.lock().unwrap() = Some(SentimentSummary {
            avg_score: 0.1,
            news: vec![],
        });

        dash.refresh_sentiment(SentimentSource::Stored).await.unwrap();
        dash.refresh_sentiment(SentimentSource::Local).await.unwrap();

        assert_eq!(api.calls_to("/analyze-sentiment"), 1);
        assert_eq!(api.calls_to("/analyze-news-local"), 1);
    }
}
