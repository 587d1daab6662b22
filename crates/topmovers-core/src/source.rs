//! Upstream source contract.
//!
//! The tool handler depends on [`MoversSource`] rather than a concrete
//! provider so invocations can be exercised without the network.

use std::future::Future;
use std::pin::Pin;

use crate::{MoversSnapshot, UpstreamError};

/// Boxed future returned by [`MoversSource::fetch_snapshot`].
pub type SnapshotFuture<'a> =
    Pin<Box<dyn Future<Output = Result<MoversSnapshot, UpstreamError>> + Send + 'a>>;

/// Supplier of a fresh top movers snapshot.
///
/// Implementations hold no per-call state: every call performs its own fetch
/// and concurrent calls are independent. Dropping the returned future aborts
/// the underlying request.
pub trait MoversSource: Send + Sync {
    /// Short provider name used in logs.
    fn name(&self) -> &'static str;

    /// Fetches the current snapshot. Never retries.
    fn fetch_snapshot(&self) -> SnapshotFuture<'_>;
}
