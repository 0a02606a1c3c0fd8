pub mod advisor;
pub mod gainers;
pub mod market;
pub mod metrics;
pub mod portfolio;
pub mod sentiment;
