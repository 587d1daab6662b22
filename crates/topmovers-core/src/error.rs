use thiserror::Error;

use crate::domain::{MAX_LIMIT, MIN_LIMIT};

/// Validation errors for caller-supplied values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("limit {value} is out of range, expected {min}..={max}")]
    LimitOutOfRange { value: u32, min: u32, max: u32 },

    #[error("api key cannot be empty")]
    EmptyApiKey,
}

impl ValidationError {
    pub(crate) const fn limit_out_of_range(value: u32) -> Self {
        Self::LimitOutOfRange {
            value,
            min: MIN_LIMIT,
            max: MAX_LIMIT,
        }
    }
}

/// Coarse classification of [`UpstreamError`], handy for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamErrorKind {
    Transport,
    Provider,
    RateLimited,
    Schema,
}

impl UpstreamErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Provider => "provider",
            Self::RateLimited => "rate_limited",
            Self::Schema => "schema",
        }
    }
}

/// Failure of a single upstream snapshot fetch.
///
/// Every variant is terminal for the invocation; nothing is retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    /// Non-success HTTP status or a connection-level failure.
    #[error("Alpha Vantage API error: {0}")]
    Transport(String),

    /// The provider reported a semantic error in an `"Error Message"` field.
    #[error("Alpha Vantage API error: {0}")]
    Provider(String),

    /// The provider returned its `"Note"` throttling sentinel.
    #[error("API rate limit exceeded. Please try again later.")]
    RateLimited,

    /// The body did not have the expected top movers shape.
    #[error("Unexpected response format from Alpha Vantage API: {0}")]
    Schema(String),
}

impl UpstreamError {
    pub const fn kind(&self) -> UpstreamErrorKind {
        match self {
            Self::Transport(_) => UpstreamErrorKind::Transport,
            Self::Provider(_) => UpstreamErrorKind::Provider,
            Self::RateLimited => UpstreamErrorKind::RateLimited,
            Self::Schema(_) => UpstreamErrorKind::Schema,
        }
    }
}
