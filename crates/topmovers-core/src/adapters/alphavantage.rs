use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::http_client::{HttpClient, HttpError, HttpRequest, ReqwestHttpClient};
use crate::source::{MoversSource, SnapshotFuture};
use crate::{MoversSnapshot, UpstreamError, ValidationError};

pub const ALPHAVANTAGE_QUERY_URL: &str = "https://www.alphavantage.co/query";
const TOP_MOVERS_FUNCTION: &str = "TOP_GAINERS_LOSERS";

const ERROR_MESSAGE_FIELD: &str = "Error Message";
const RATE_LIMIT_FIELD: &str = "Note";
const REQUIRED_FIELDS: [&str; 4] = [
    "top_gainers",
    "top_losers",
    "most_actively_traded",
    "last_updated",
];

const REDACTED_PREFIX_LEN: usize = 8;

/// Alpha Vantage API key. `Debug` only shows a short prefix.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into().trim().to_owned();
        if value.is_empty() {
            return Err(ValidationError::EmptyApiKey);
        }
        Ok(Self(value))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// First few characters followed by an ellipsis, safe for logs.
    pub fn redacted(&self) -> String {
        let prefix: String = self.0.chars().take(REDACTED_PREFIX_LEN).collect();
        format!("{prefix}...")
    }
}

impl Debug for ApiKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ApiKey").field(&self.redacted()).finish()
    }
}

/// Client for the Alpha Vantage `TOP_GAINERS_LOSERS` function.
#[derive(Clone)]
pub struct AlphaVantageClient {
    http_client: Arc<dyn HttpClient>,
    api_key: ApiKey,
}

impl AlphaVantageClient {
    pub fn new(api_key: ApiKey) -> Result<Self, HttpError> {
        Ok(Self::with_http_client(
            Arc::new(ReqwestHttpClient::new()?),
            api_key,
        ))
    }

    pub fn with_http_client(http_client: Arc<dyn HttpClient>, api_key: ApiKey) -> Self {
        Self {
            http_client,
            api_key,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{ALPHAVANTAGE_QUERY_URL}?function={TOP_MOVERS_FUNCTION}&apikey={}",
            urlencoding::encode(self.api_key.expose())
        )
    }

    async fn fetch(&self) -> Result<MoversSnapshot, UpstreamError> {
        let request = HttpRequest::get(self.endpoint()).with_header("accept", "application/json");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|error| UpstreamError::Transport(error.message().to_owned()))?;

        if !response.is_success() {
            tracing::debug!(status = response.status, "alphavantage returned non-success status");
            return Err(UpstreamError::Transport(response.status_text));
        }

        parse_top_movers(&response.body)
    }
}

impl Debug for AlphaVantageClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlphaVantageClient")
            .field("api_key", &self.api_key)
            .finish_non_exhaustive()
    }
}

impl MoversSource for AlphaVantageClient {
    fn name(&self) -> &'static str {
        "alphavantage"
    }

    fn fetch_snapshot(&self) -> SnapshotFuture<'_> {
        Box::pin(self.fetch())
    }
}

/// Classifies a `TOP_GAINERS_LOSERS` body.
///
/// Error sentinels are checked before the shape so a throttled or rejected
/// call never surfaces as a schema failure.
pub fn parse_top_movers(body: &str) -> Result<MoversSnapshot, UpstreamError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| UpstreamError::Schema(format!("body is not valid JSON ({e})")))?;

    let Value::Object(object) = value else {
        return Err(UpstreamError::Schema(String::from(
            "body is not a JSON object",
        )));
    };

    if let Some(message) = object.get(ERROR_MESSAGE_FIELD) {
        return Err(UpstreamError::Provider(sentinel_text(message)));
    }

    if object.contains_key(RATE_LIMIT_FIELD) {
        return Err(UpstreamError::RateLimited);
    }

    check_required_fields(&object)?;

    let body = Value::Object(object);
    let mut snapshot =
        MoversSnapshot::deserialize(&body).map_err(|e| UpstreamError::Schema(e.to_string()))?;
    snapshot.raw = Some(body);
    Ok(snapshot)
}

fn check_required_fields(object: &Map<String, Value>) -> Result<(), UpstreamError> {
    let missing = REQUIRED_FIELDS
        .iter()
        .filter(|field| !object.contains_key(**field))
        .copied()
        .collect::<Vec<_>>();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(UpstreamError::Schema(format!(
            "missing field(s) {}",
            missing.join(", ")
        )))
    }
}

fn sentinel_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
