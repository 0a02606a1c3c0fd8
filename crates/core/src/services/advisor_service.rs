use tracing::debug;

use crate::api::traits::DashboardApi;
use crate::errors::CoreError;
use crate::models::advisor::{
    AdvisorAnswer, AdvisorRequest, DEFAULT_REFERENCE_PRICE, DEFAULT_SENTIMENT_SCORE,
    TRANSACTIONS_PLACEHOLDER,
};
use crate::models::gainers::GainerRecord;
use crate::models::market::SymbolMatch;
use crate::models::portfolio::Portfolio;

/// Assembles and submits composite questions to the AI advisor.
///
/// The request is a point-in-time snapshot of every other component: typed
/// sentiment score, selected reference price, the full accumulated gainers
/// list, the portfolio, and the cached Sharpe value. Also tracks the
/// selection seed (question suggestion + reference price) set by clicking a
/// gainer row or an autocomplete match.
#[derive(Debug, Default)]
pub struct AdvisorService {
    reference_price: Option<f64>,
    suggested_question: Option<String>,
    latest: Option<AdvisorAnswer>,
    last_error: Option<String>,
}

impl AdvisorService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the next question from a selected gainer row. Clears any
    /// previously displayed answer or error.
    pub fn seed_from_gainer(&mut self, record: &GainerRecord) {
        self.seed(&record.symbol, Some(record.price));
    }

    /// Seed the next question from a selected autocomplete match. Matches
    /// carry no price, so the reference price falls back to the default.
    pub fn seed_from_match(&mut self, m: &SymbolMatch) {
        self.seed(&m.symbol, None);
    }

    fn seed(&mut self, symbol: &str, price: Option<f64>) {
        self.suggested_question = Some(format!("What is the prediction for {symbol}?"));
        self.reference_price = price.filter(|p| *p > 0.0);
        self.latest = None;
        self.last_error = None;
    }

    /// Build the composite request. Fails locally (no network) when the
    /// trimmed question is empty.
    pub fn compose(
        &self,
        question: &str,
        sentiment_score: Option<f64>,
        gainers_list: Vec<String>,
        portfolio: &Portfolio,
        sharpe_value: f64,
    ) -> Result<AdvisorRequest, CoreError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(CoreError::Validation(
                "Please provide a valid question".into(),
            ));
        }

        Ok(AdvisorRequest {
            question: question.to_string(),
            sentiment_score: sentiment_score.unwrap_or(DEFAULT_SENTIMENT_SCORE),
            price: self.reference_price.unwrap_or(DEFAULT_REFERENCE_PRICE),
            gainers_list,
            portfolio: portfolio.holdings.clone(),
            sharpe_value,
            transactions: TRANSACTIONS_PLACEHOLDER.to_string(),
        })
    }

    /// Compose, submit, and record the outcome. Validation failures skip the
    /// network entirely; backend and transport failures are recorded and
    /// propagated.
    pub async fn ask(
        &mut self,
        api: &dyn DashboardApi,
        question: &str,
        sentiment_score: Option<f64>,
        gainers_list: Vec<String>,
        portfolio: &Portfolio,
        sharpe_value: f64,
    ) -> Result<&AdvisorAnswer, CoreError> {
        let request = self.compose(question, sentiment_score, gainers_list, portfolio, sharpe_value)?;
        debug!(question = %request.question, gainers = request.gainers_list.len(), "asking advisor");

        match api.ask_advisor(&request).await {
            Ok(answer) => {
                self.last_error = None;
                Ok(&*self.latest.insert(answer))
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Suggested question text from the most recent selection, if any.
    #[must_use]
    pub fn suggested_question(&self) -> Option<&str> {
        self.suggested_question.as_deref()
    }

    /// Reference price from the most recent selection, if one carried a price.
    #[must_use]
    pub fn reference_price(&self) -> Option<f64> {
        self.reference_price
    }

    /// Latest successful answer, if any.
    #[must_use]
    pub fn latest_answer(&self) -> Option<&AdvisorAnswer> {
        self.latest.as_ref()
    }

    /// Message of the most recent failed ask, cleared by the next success
    /// or selection.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
