pub mod advisor_service;
pub mod gainers_feed;
pub mod market_gateway;
pub mod metrics_sync;
pub mod portfolio_service;
pub mod sentiment_feed;
pub mod sequence;
