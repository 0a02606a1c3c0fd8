use serde::{Deserialize, Serialize};

/// A news headline with its source link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub url: String,
}

/// Latest news-sentiment summary. Replaced wholesale on each fetch;
/// no merge with prior summaries, no history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    /// Average sentiment score, roughly in [-1, 1].
    pub avg_score: f64,

    /// Headlines the score was computed from, newest first.
    pub news: Vec<NewsItem>,
}

/// Coarse classification of a sentiment score, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentTone {
    Positive,
    Negative,
    Neutral,
}

impl SentimentSummary {
    #[must_use]
    pub fn tone(&self) -> SentimentTone {
        if self.avg_score > 0.0 {
            SentimentTone::Positive
        } else if self.avg_score < 0.0 {
            SentimentTone::Negative
        } else {
            SentimentTone::Neutral
        }
    }
}

/// Which backend analysis the sentiment summary comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentSource {
    /// Pre-computed scores stored on the backend (`/analyze-sentiment`).
    Stored,
    /// Scores computed on demand by the backend's local model
    /// (`/analyze-news-local`).
    Local,
}
