//! The `topmovers` tool: fetch, shape, answer.
//!
//! Upstream failures are answered in-band with `isError: true`; only
//! malformed arguments become protocol errors.

use std::sync::Arc;

use rmcp::model::{CallToolResult, Content, JsonObject, Meta, Tool};
use rmcp::schemars;
use rmcp::ErrorData as McpError;
use serde::Deserialize;
use serde_json::{json, Value};
use topmovers_core::{shape, Limit, MoversSnapshot, MoversSource};
use tracing::Instrument;
use uuid::Uuid;

use crate::widget::WIDGET_URI;

pub const TOOL_NAME: &str = "topmovers";
const TOOL_TITLE: &str = "Top Stock Market Movers";
const TOOL_DESCRIPTION: &str = "Fetches and displays the top gaining, losing, and most actively \
traded stocks in the US market";

/// Arguments accepted by `topmovers`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, schemars::JsonSchema)]
#[schemars(crate = "rmcp::schemars")]
pub struct TopMoversParams {
    /// Number of stocks to display per category (default: 10)
    #[schemars(range(min = 1, max = 20))]
    pub limit: Option<u32>,
}

impl TopMoversParams {
    /// Decodes and range-checks call arguments, as the host schema would.
    pub fn resolve(arguments: Option<JsonObject>) -> Result<Limit, McpError> {
        let params: Self = serde_json::from_value(Value::Object(arguments.unwrap_or_default()))
            .map_err(|e| McpError::invalid_params(format!("invalid arguments: {e}"), None))?;
        Limit::resolve(params.limit)
            .map_err(|e| McpError::invalid_params(format!("invalid arguments: {e}"), None))
    }

    fn input_schema() -> Arc<JsonObject> {
        let schema = schemars::schema_for!(TopMoversParams);
        match serde_json::to_value(schema) {
            Ok(Value::Object(object)) => Arc::new(object),
            _ => Arc::new(JsonObject::new()),
        }
    }
}

/// Result of one invocation. There is no partial success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    Success {
        limit: Limit,
        shaped: MoversSnapshot,
        full: MoversSnapshot,
    },
    Failure {
        message: String,
    },
}

impl ToolOutcome {
    /// Human-readable line placed in `content`.
    pub fn summary(&self) -> String {
        match self {
            Self::Success { limit, full, .. } => format!(
                "Retrieved top {limit} gainers, losers, and most active stocks. Last updated: {}",
                full.last_updated
            ),
            Self::Failure { message } => format!("Error fetching top movers: {message}"),
        }
    }

    pub fn into_call_tool_result(self) -> CallToolResult {
        let content = vec![Content::text(self.summary())];
        match self {
            Self::Success { shaped, full, .. } => {
                let mut meta = JsonObject::new();
                meta.insert(String::from("fullData"), full.full_data());
                CallToolResult {
                    content,
                    structured_content: Some(serde_json::to_value(&shaped).unwrap_or(Value::Null)),
                    is_error: Some(false),
                    meta: Some(Meta(meta)),
                }
            }
            Self::Failure { .. } => CallToolResult {
                content,
                structured_content: None,
                is_error: Some(true),
                meta: None,
            },
        }
    }
}

/// Stateless handler; clones share the same upstream source.
#[derive(Clone)]
pub struct TopMoversTool {
    source: Arc<dyn MoversSource>,
}

impl TopMoversTool {
    pub fn new(source: Arc<dyn MoversSource>) -> Self {
        Self { source }
    }

    pub fn descriptor() -> Tool {
        let mut tool = Tool::new(TOOL_NAME, TOOL_DESCRIPTION, TopMoversParams::input_schema());
        tool.title = Some(String::from(TOOL_TITLE));
        if let Value::Object(meta) = json!({
            "openai/outputTemplate": WIDGET_URI,
            "openai/toolInvocation/invoking": "Fetching top market movers...",
            "openai/toolInvocation/invoked": "Displayed top market movers",
            "openai/widgetAccessible": true,
        }) {
            tool.meta = Some(Meta(meta));
        }
        tool
    }

    /// Fetches, shapes and packages one snapshot. Never fails.
    pub async fn handle(&self, limit: Limit) -> ToolOutcome {
        let span = tracing::info_span!(
            "topmovers",
            request_id = %Uuid::new_v4(),
            limit = limit.get(),
            source = self.source.name(),
        );

        async move {
            match self.source.fetch_snapshot().await {
                Ok(full) => {
                    let shaped = shape(&full, limit);
                    let (gainers, losers, active) = shaped.lens();
                    tracing::info!(gainers, losers, active, last_updated = %full.last_updated, "top movers fetched");
                    ToolOutcome::Success {
                        limit,
                        shaped,
                        full,
                    }
                }
                Err(error) => {
                    tracing::warn!(kind = error.kind().as_str(), %error, "top movers fetch failed");
                    ToolOutcome::Failure {
                        message: error.to_string(),
                    }
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Full `tools/call` path: argument validation, then [`Self::handle`].
    pub async fn call(&self, arguments: Option<JsonObject>) -> Result<CallToolResult, McpError> {
        let limit = TopMoversParams::resolve(arguments)?;
        Ok(self.handle(limit).await.into_call_tool_result())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arguments(value: Value) -> Option<JsonObject> {
        match value {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    #[test]
    fn absent_arguments_resolve_to_default_limit() {
        assert_eq!(TopMoversParams::resolve(None).expect("valid").get(), 10);
        assert_eq!(
            TopMoversParams::resolve(arguments(json!({}))).expect("valid").get(),
            10
        );
    }

    #[test]
    fn out_of_range_or_mistyped_limit_is_invalid_params() {
        for value in [json!({"limit": 0}), json!({"limit": 21}), json!({"limit": "5"}), json!({"limit": -1})] {
            assert!(TopMoversParams::resolve(arguments(value)).is_err());
        }
    }

    #[test]
    fn schema_advertises_bounds_and_description() {
        let schema = Value::Object((*TopMoversParams::input_schema()).clone());
        let limit = &schema["properties"]["limit"];

        assert_eq!(limit["minimum"], 1);
        assert_eq!(limit["maximum"], 20);
        assert_eq!(
            limit["description"],
            "Number of stocks to display per category (default: 10)"
        );
    }

    #[test]
    fn descriptor_points_at_the_widget() {
        let tool = TopMoversTool::descriptor();

        assert_eq!(tool.name, TOOL_NAME);
        assert_eq!(tool.title.as_deref(), Some(TOOL_TITLE));
        let meta = tool.meta.expect("meta present");
        assert_eq!(meta.0["openai/outputTemplate"], WIDGET_URI);
        assert_eq!(meta.0["openai/widgetAccessible"], true);
    }

    #[test]
    fn failure_outcome_prefixes_message() {
        let outcome = ToolOutcome::Failure {
            message: String::from("API rate limit exceeded. Please try again later."),
        };
        let result = outcome.into_call_tool_result();

        assert_eq!(result.is_error, Some(true));
        assert!(result.structured_content.is_none());
        let text = &result.content[0].as_text().expect("text content").text;
        assert_eq!(
            text,
            "Error fetching top movers: API rate limit exceeded. Please try again later."
        );
    }
}
