//! # TopMovers Core
//!
//! Domain types, the Alpha Vantage client and result shaping behind the
//! `topmovers` tool.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Alpha Vantage `TOP_GAINERS_LOSERS` client |
//! | [`domain`] | `StockEntry`, `MoversSnapshot`, `Limit` |
//! | [`error`] | Validation and upstream error types |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`shaper`] | Per-category prefix truncation |
//! | [`source`] | `MoversSource` trait |
//!
//! ## Flow
//!
//! ```text
//! MoversSource::fetch_snapshot ──▶ HttpClient (one GET)
//!          │
//!          ▼
//!   parse_top_movers (error sentinels, then shape)
//!          │
//!          ▼
//!   shaper::shape(snapshot, limit)
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use topmovers_core::{shape, AlphaVantageClient, ApiKey, Limit, MoversSource};
//!
//! let client = AlphaVantageClient::new(ApiKey::new(std::env::var("ALPHA_VANTAGE_API_KEY")?)?);
//! let snapshot = client.fetch_snapshot().await?;
//! let top_five = shape(&snapshot, Limit::new(5)?);
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod shaper;
pub mod source;

pub use adapters::{parse_top_movers, AlphaVantageClient, ApiKey, ALPHAVANTAGE_QUERY_URL};
pub use domain::{Limit, MoversSnapshot, StockEntry, DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT};
pub use error::{UpstreamError, UpstreamErrorKind, ValidationError};
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use shaper::shape;
pub use source::{MoversSource, SnapshotFuture};
