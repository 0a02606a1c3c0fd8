use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use super::traits::DashboardApi;
use crate::errors::CoreError;
use crate::models::advisor::{AdvisorAnswer, AdvisorRequest};
use crate::models::gainers::GainerRecord;
use crate::models::market::SymbolMatch;
use crate::models::metrics::MetricsSnapshot;
use crate::models::portfolio::Portfolio;
use crate::models::sentiment::{NewsItem, SentimentSource, SentimentSummary};

/// JSON-over-HTTP implementation of [`DashboardApi`].
///
/// The backend wraps most replies in a `{status, ...}` envelope and uses
/// Mongo-style `_id` keys; both quirks stay inside this file. Business
/// failures (`status != "success"`) map to `CoreError::Api`, transport and
/// parse failures to `CoreError::Network` / `CoreError::Deserialization`.
pub struct HttpDashboardApi {
    client: Client,
    base_url: String,
}

impl HttpDashboardApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

// ── Wire types ──────────────────────────────────────────────────────

#[derive(Deserialize)]
struct GainerDto {
    #[serde(rename = "_id")]
    symbol: String,
    price: f64,
    change: f64,
}

#[derive(Deserialize)]
struct MatchDto {
    #[serde(rename = "_id")]
    symbol: String,
    #[serde(default)]
    name: String,
}

#[derive(Deserialize)]
struct AutocompleteResponse {
    status: String,
    #[serde(default)]
    matches: Vec<MatchDto>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct UploadResponse {
    status: String,
    /// Quantities arrive as floats: the backend sums the uploaded file's
    /// Quantity column numerically before returning it.
    #[serde(default)]
    summary: HashMap<String, f64>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Serialize)]
struct MetricsRequest<'a> {
    portfolio: &'a HashMap<String, u32>,
}

#[derive(Deserialize)]
struct MetricsResponse {
    status: String,
    #[serde(default)]
    average_performance: Option<f64>,
    #[serde(default)]
    sharpe_ratio: Option<f64>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct AdvisorResponse {
    status: String,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    classification: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct SentimentResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    news: Vec<NewsItemDto>,
    #[serde(default)]
    avg_score: Option<f64>,
}

#[derive(Deserialize)]
struct NewsItemDto {
    title: String,
    url: String,
}

/// Reject backend-reported failures uniformly.
fn check_status(endpoint: &str, status: &str, message: Option<String>) -> Result<(), CoreError> {
    if status == "success" {
        Ok(())
    } else {
        Err(CoreError::Api {
            endpoint: endpoint.to_string(),
            message: message.unwrap_or_else(|| format!("backend reported status '{status}'")),
        })
    }
}

fn missing_field(endpoint: &str, field: &str) -> CoreError {
    CoreError::Deserialization(format!("{endpoint}: missing '{field}' in success response"))
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl DashboardApi for HttpDashboardApi {
    async fn top_gainers(&self, offset: u32, limit: u32) -> Result<Vec<GainerRecord>, CoreError> {
        let url = self.url("/top-gainers");
        let page: Vec<GainerDto> = self
            .client
            .get(&url)
            .query(&[("offset", offset), ("limit", limit)])
            .send()
            .await?
            .json()
            .await?;

        Ok(page
            .into_iter()
            .map(|g| GainerRecord {
                symbol: g.symbol,
                price: g.price,
                change: g.change,
            })
            .collect())
    }

    async fn autocomplete(&self, query: &str) -> Result<Vec<SymbolMatch>, CoreError> {
        let url = self.url("/autocomplete-symbols");
        let resp: AutocompleteResponse = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await?
            .json()
            .await?;

        check_status("/autocomplete-symbols", &resp.status, resp.message)?;
        Ok(resp
            .matches
            .into_iter()
            .map(|m| SymbolMatch {
                symbol: m.symbol,
                name: m.name,
            })
            .collect())
    }

    async fn upload_portfolio(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<HashMap<String, u32>, CoreError> {
        let url = self.url("/upload");
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let resp: UploadResponse = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await?
            .json()
            .await?;

        check_status("/upload", &resp.status, resp.message)?;

        // Round fractional quantities to whole shares; drop anything that
        // rounds to zero so the portfolio invariant holds.
        Ok(resp
            .summary
            .into_iter()
            .filter_map(|(symbol, qty)| {
                let rounded = qty.round();
                if rounded >= 1.0 {
                    Some((symbol, rounded as u32))
                } else {
                    None
                }
            })
            .collect())
    }

    async fn portfolio_metrics(
        &self,
        portfolio: &Portfolio,
    ) -> Result<MetricsSnapshot, CoreError> {
        let url = self.url("/portfolio-metrics");
        let resp: MetricsResponse = self
            .client
            .post(&url)
            .json(&MetricsRequest {
                portfolio: &portfolio.holdings,
            })
            .send()
            .await?
            .json()
            .await?;

        check_status("/portfolio-metrics", &resp.status, resp.message)?;
        Ok(MetricsSnapshot {
            average_performance: resp
                .average_performance
                .ok_or_else(|| missing_field("/portfolio-metrics", "average_performance"))?,
            sharpe_ratio: resp
                .sharpe_ratio
                .ok_or_else(|| missing_field("/portfolio-metrics", "sharpe_ratio"))?,
        })
    }

    async fn ask_advisor(&self, request: &AdvisorRequest) -> Result<AdvisorAnswer, CoreError> {
        let url = self.url("/ask-llm");
        let resp: AdvisorResponse = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await?
            .json()
            .await?;

        check_status("/ask-llm", &resp.status, resp.message)?;
        Ok(AdvisorAnswer {
            answer: resp
                .answer
                .ok_or_else(|| missing_field("/ask-llm", "answer"))?,
            classification: resp
                .classification
                .ok_or_else(|| missing_field("/ask-llm", "classification"))?,
        })
    }

    async fn sentiment(&self, source: SentimentSource) -> Result<SentimentSummary, CoreError> {
        let path = match source {
            SentimentSource::Stored => "/analyze-sentiment",
            SentimentSource::Local => "/analyze-news-local",
        };
        let url = self.url(path);
        let resp: SentimentResponse = self.client.get(&url).send().await?.json().await?;

        // The sentiment routes only carry a status envelope on failure.
        if let Some(status) = resp.status.as_deref() {
            check_status(path, status, resp.message)?;
        }

        Ok(SentimentSummary {
            avg_score: resp
                .avg_score
                .ok_or_else(|| missing_field(path, "avg_score"))?,
            news: resp
                .news
                .into_iter()
                .map(|n| NewsItem {
                    title: n.title,
                    url: n.url,
                })
                .collect(),
        })
    }
}
