//! # Domain Models
//!
//! Types describing one top movers snapshot as returned by the provider, plus
//! the validated per-category [`Limit`].
//!
//! | Type | Description |
//! |------|-------------|
//! | [`StockEntry`] | One ranked ticker row, fields passed through verbatim |
//! | [`MoversSnapshot`] | Gainers, losers, most active and the provider timestamp |
//! | [`Limit`] | Entries kept per category, 1..=20, default 10 |

mod limit;
mod models;

pub use limit::{Limit, DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT};
pub use models::{MoversSnapshot, StockEntry};
