//! Provider adapters.

pub mod alphavantage;

pub use alphavantage::{parse_top_movers, AlphaVantageClient, ApiKey, ALPHAVANTAGE_QUERY_URL};
