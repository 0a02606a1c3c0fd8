use serde::{Deserialize, Serialize};

/// Backend-computed aggregate metrics for the current portfolio.
///
/// Derived state: recomputed whenever the portfolio changes. The Sharpe
/// ratio is treated as an opaque scalar and cached for the advisor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Quantity-weighted average performance, in percent.
    pub average_performance: f64,

    /// Risk-adjusted return estimate for the portfolio.
    pub sharpe_ratio: f64,
}
