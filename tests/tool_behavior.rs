//! Behavior-driven tests for the `topmovers` MCP surface
//!
//! These tests verify WHAT a host sees when it lists, calls, and reads
//! through the server handler, with the upstream replaced by a canned source
//! or by the real Alpha Vantage client over a canned transport.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rmcp::model::{ErrorCode, JsonObject, ListToolsResult, ResourceContents};
use serde_json::{json, Value};
use topmovers_core::{
    AlphaVantageClient, ApiKey, HttpClient, HttpError, HttpRequest, HttpResponse, MoversSnapshot,
    MoversSource, SnapshotFuture, StockEntry, UpstreamError,
};
use topmovers_mcp::widget::WIDGET_URI;
use topmovers_mcp::{TopMoversServer, WidgetAssets};

struct CannedSource {
    result: Result<MoversSnapshot, UpstreamError>,
    calls: AtomicUsize,
}

impl CannedSource {
    fn new(result: Result<MoversSnapshot, UpstreamError>) -> Arc<Self> {
        Arc::new(Self {
            result,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MoversSource for CannedSource {
    fn name(&self) -> &'static str {
        "canned"
    }

    fn fetch_snapshot(&self) -> SnapshotFuture<'_> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = self.result.clone();
        Box::pin(async move { result })
    }
}

struct CannedHttpClient {
    response: HttpResponse,
}

impl HttpClient for CannedHttpClient {
    fn execute<'a>(
        &'a self,
        _request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let response = self.response.clone();
        Box::pin(async move { Ok(response) })
    }
}

fn server_over_http(response: HttpResponse) -> TopMoversServer {
    let client = AlphaVantageClient::with_http_client(
        Arc::new(CannedHttpClient { response }),
        ApiKey::new("demo").expect("valid key"),
    );
    let widget = WidgetAssets::new(Some(String::from("render();")), None);
    TopMoversServer::new(Arc::new(client), Arc::new(widget))
}

fn entries(prefix: &str, count: usize) -> Vec<StockEntry> {
    (0..count)
        .map(|index| StockEntry {
            ticker: format!("{prefix}{index}"),
            price: format!("{index}.00"),
            change_amount: String::from("0.10"),
            change_percentage: String::from("1.5%"),
            volume: String::from("1000"),
        })
        .collect()
}

fn snapshot(count: usize) -> MoversSnapshot {
    MoversSnapshot {
        metadata: Some(String::from(
            "Top gainers, losers, and most actively traded US tickers",
        )),
        last_updated: String::from("2025-01-14 16:15:59 US/Eastern"),
        top_gainers: entries("G", count),
        top_losers: entries("L", count),
        most_actively_traded: entries("A", count),
        raw: None,
    }
}

fn server(source: Arc<CannedSource>) -> TopMoversServer {
    let widget = WidgetAssets::new(Some(String::from("render();")), None);
    TopMoversServer::new(source, Arc::new(widget))
}

fn server_with_snapshot(count: usize) -> TopMoversServer {
    server(CannedSource::new(Ok(snapshot(count))))
}

fn arguments(value: Value) -> Option<JsonObject> {
    match value {
        Value::Object(object) => Some(object),
        _ => None,
    }
}

fn text_of(result: &rmcp::model::CallToolResult) -> String {
    result.content[0]
        .as_text()
        .expect("summary is text content")
        .text
        .clone()
}

// =============================================================================
// Tool Calls: Success
// =============================================================================

#[tokio::test]
async fn when_no_limit_is_given_user_sees_ten_per_category() {
    // Given: An upstream with 20 entries per category
    let source = CannedSource::new(Ok(snapshot(20)));
    let server = server(source.clone());

    // When: The tool is called without arguments
    let result = server.call("topmovers", None).await.expect("call succeeds");

    // Then: Each list holds 10 entries and the summary names the limit
    assert_eq!(result.is_error, Some(false));
    assert_eq!(
        text_of(&result),
        "Retrieved top 10 gainers, losers, and most active stocks. Last updated: 2025-01-14 16:15:59 US/Eastern"
    );
    let structured = result.structured_content.expect("structured content");
    assert_eq!(structured["top_gainers"].as_array().map(Vec::len), Some(10));
    assert_eq!(structured["top_losers"].as_array().map(Vec::len), Some(10));
    assert_eq!(
        structured["most_actively_traded"].as_array().map(Vec::len),
        Some(10)
    );
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn when_upstream_has_fewer_entries_than_limit_lists_are_returned_whole() {
    // Given: An upstream with 3 entries per category
    let server = server_with_snapshot(3);

    // When: The user asks for 15
    let result = server
        .call("topmovers", arguments(json!({"limit": 15})))
        .await
        .expect("call succeeds");

    // Then: Nothing is padded
    let structured = result.structured_content.expect("structured content");
    assert_eq!(structured["top_gainers"].as_array().map(Vec::len), Some(3));
    assert_eq!(structured["top_gainers"][2]["ticker"], "G2");
}

#[tokio::test]
async fn when_call_succeeds_full_response_travels_in_meta() {
    // Given: An upstream with 12 entries per category
    let server = server_with_snapshot(12);

    // When: The user asks for 2
    let result = server
        .call("topmovers", arguments(json!({"limit": 2})))
        .await
        .expect("call succeeds");

    // Then: Structured content is shaped, fullData is untruncated
    let structured = result.structured_content.expect("structured content");
    assert_eq!(structured["top_losers"].as_array().map(Vec::len), Some(2));
    assert!(structured.get("metadata").is_none());

    let meta = result.meta.expect("meta present");
    let full = &meta.0["fullData"];
    assert_eq!(full["top_losers"].as_array().map(Vec::len), Some(12));
    assert_eq!(
        full["metadata"],
        "Top gainers, losers, and most actively traded US tickers"
    );
}

#[tokio::test]
async fn when_called_twice_on_same_data_output_is_identical() {
    // Given: An upstream that keeps answering the same snapshot
    let source = CannedSource::new(Ok(snapshot(20)));
    let server = server(source.clone());

    // When: The tool is called twice with the same limit
    let first = server
        .call("topmovers", arguments(json!({"limit": 5})))
        .await
        .expect("first call");
    let second = server
        .call("topmovers", arguments(json!({"limit": 5})))
        .await
        .expect("second call");

    // Then: Each call fetched on its own and the results match
    assert_eq!(source.calls(), 2);
    assert_eq!(first.structured_content, second.structured_content);
    assert_eq!(text_of(&first), text_of(&second));
}

// =============================================================================
// Tool Calls: Failure
// =============================================================================

#[tokio::test]
async fn when_upstream_is_throttled_user_sees_in_band_error() {
    // Given: An upstream signalling rate limiting
    let server = server(CannedSource::new(Err(UpstreamError::RateLimited)));

    // When: The tool is called
    let result = server.call("topmovers", None).await.expect("call succeeds");

    // Then: The failure is a tool result, not a protocol error
    assert_eq!(result.is_error, Some(true));
    assert!(result.structured_content.is_none());
    assert_eq!(
        text_of(&result),
        "Error fetching top movers: API rate limit exceeded. Please try again later."
    );
}

#[tokio::test]
async fn when_provider_rejects_call_message_is_prefixed() {
    // Given: An upstream reporting a provider error
    let server = server(CannedSource::new(Err(UpstreamError::Provider(
        String::from("Invalid API call."),
    ))));

    // When: The tool is called
    let result = server.call("topmovers", None).await.expect("call succeeds");

    // Then: The provider text follows the error prefix
    assert!(text_of(&result).starts_with("Error fetching top movers: "));
    assert!(text_of(&result).ends_with("Invalid API call."));
}

#[tokio::test]
async fn when_limit_is_out_of_range_host_gets_invalid_params_without_fetching() {
    // Given: A healthy upstream
    let source = CannedSource::new(Ok(snapshot(20)));
    let server = server(source.clone());

    for value in [json!({"limit": 0}), json!({"limit": 21}), json!({"limit": "ten"})] {
        // When: The tool is called with a bad limit
        let error = server
            .call("topmovers", arguments(value))
            .await
            .expect_err("must be rejected");

        // Then: It is a protocol-level invalid params error
        assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
    }
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn when_unknown_tool_is_called_host_gets_invalid_params() {
    // Given: The server
    let server = server_with_snapshot(1);

    // When: A tool that does not exist is called
    let error = server
        .call("bottommovers", None)
        .await
        .expect_err("must be rejected");

    // Then: The error names the tool
    assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
    assert!(error.message.contains("bottommovers"));
}

// =============================================================================
// Tool Calls: Through the Alpha Vantage Client
// =============================================================================

#[tokio::test]
async fn when_provider_body_carries_error_message_user_sees_it_verbatim() {
    // Given: The provider rejects the call in its body
    let server = server_over_http(HttpResponse::ok_json(
        r#"{"Error Message": "Invalid API call. Please retry or visit the documentation."}"#,
    ));

    // When: The tool is called
    let result = server.call("topmovers", None).await.expect("call succeeds");

    // Then: The provider message follows both prefixes unchanged
    assert_eq!(result.is_error, Some(true));
    assert_eq!(
        text_of(&result),
        "Error fetching top movers: Alpha Vantage API error: Invalid API call. Please retry or visit the documentation."
    );
}

#[tokio::test]
async fn when_provider_body_carries_note_user_sees_rate_limit_text() {
    // Given: The provider answers with a throttling note
    let server = server_over_http(HttpResponse::ok_json(
        r#"{"Note": "Thank you for using Alpha Vantage! Please visit premium."}"#,
    ));

    // When: The tool is called
    let result = server.call("topmovers", None).await.expect("call succeeds");

    // Then: The note content is replaced by the rate limit message
    assert_eq!(result.is_error, Some(true));
    assert_eq!(
        text_of(&result),
        "Error fetching top movers: API rate limit exceeded. Please try again later."
    );
}

#[tokio::test]
async fn when_provider_answers_503_user_sees_status_text() {
    // Given: The provider is unavailable
    let server = server_over_http(HttpResponse::new(503, "Service Unavailable", ""));

    // When: The tool is called
    let result = server.call("topmovers", None).await.expect("call succeeds");

    // Then: The status text is reported in-band
    assert_eq!(result.is_error, Some(true));
    assert_eq!(
        text_of(&result),
        "Error fetching top movers: Alpha Vantage API error: Service Unavailable"
    );
}

#[tokio::test]
async fn when_provider_adds_unmodelled_fields_full_data_echoes_them() {
    // Given: A provider body with fields beyond the typed snapshot
    let server = server_over_http(HttpResponse::ok_json(
        r#"{
            "metadata": "Top gainers, losers, and most actively traded US tickers",
            "last_updated": "2025-01-14 16:15:59 US/Eastern",
            "top_gainers": [
                {"ticker": "ABCD", "price": "1.23", "change_amount": "0.61", "change_percentage": "98.3871%", "volume": "1234567", "exchange": "NASDAQ"},
                {"ticker": "EFGH", "price": "2.00", "change_amount": "0.50", "change_percentage": "33.3333%", "volume": "7654321", "exchange": "NYSE"}
            ],
            "top_losers": [],
            "most_actively_traded": [],
            "market_status": "closed"
        }"#,
    ));

    // When: The tool is called with a limit of one
    let result = server
        .call("topmovers", arguments(json!({"limit": 1})))
        .await
        .expect("call succeeds");

    // Then: The shaped view is typed and truncated, fullData is the body as sent
    let structured = result.structured_content.expect("structured content");
    assert_eq!(structured["top_gainers"].as_array().map(Vec::len), Some(1));
    assert!(structured["top_gainers"][0].get("exchange").is_none());

    let meta = result.meta.expect("meta present");
    let full = &meta.0["fullData"];
    assert_eq!(full["market_status"], "closed");
    assert_eq!(full["top_gainers"].as_array().map(Vec::len), Some(2));
    assert_eq!(full["top_gainers"][1]["exchange"], "NYSE");
}

// =============================================================================
// Listing and Resources
// =============================================================================

#[test]
fn when_host_lists_tools_it_sees_one_tool_linked_to_the_widget() {
    // Given: The server
    let server = server_with_snapshot(1);

    // When: Tools are listed
    let tools = server.tools();

    // Then: Only `topmovers` is offered and it points at the widget
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0].name, "topmovers");
    let meta = tools[0].meta.as_ref().expect("tool meta");
    assert_eq!(meta.0["openai/outputTemplate"], WIDGET_URI);
    assert_eq!(
        meta.0["openai/toolInvocation/invoking"],
        "Fetching top market movers..."
    );
}

#[test]
fn when_tool_list_is_serialized_each_tool_carries_its_widget_meta() {
    // Given: The server
    let server = server_with_snapshot(1);

    // When: The tools/list result is encoded for the wire
    let wire = serde_json::to_value(ListToolsResult::with_all_items(server.tools()))
        .expect("tool list serializes");

    // Then: `_meta` sits on the tool next to its title and schema
    let tool = &wire["tools"][0];
    assert_eq!(tool["title"], "Top Stock Market Movers");
    assert_eq!(tool["_meta"]["openai/outputTemplate"], "ui://widget/topmovers.html");
    assert_eq!(
        tool["_meta"]["openai/toolInvocation/invoked"],
        "Displayed top market movers"
    );
    assert_eq!(tool["_meta"]["openai/widgetAccessible"], true);
    assert_eq!(tool["inputSchema"]["properties"]["limit"]["maximum"], 20);
}

#[test]
fn when_host_reads_widget_it_gets_html_with_the_bundled_script() {
    // Given: The server with a loaded script
    let server = server_with_snapshot(1);

    // When: The widget resource is listed and read
    let resources = server.resources();
    let read = server.read(WIDGET_URI).expect("widget readable");

    // Then: The resource is listed once and renders the script
    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].uri, WIDGET_URI);
    let ResourceContents::TextResourceContents {
        mime_type, text, ..
    } = &read.contents[0]
    else {
        panic!("widget must be text contents");
    };
    assert_eq!(mime_type.as_deref(), Some("text/html+skybridge"));
    assert!(text.contains(r#"<script type="module">render();</script>"#));
}

#[test]
fn when_host_reads_unknown_resource_it_gets_not_found() {
    // Given: The server
    let server = server_with_snapshot(1);

    // When: An unknown URI is read
    let error = server
        .read("ui://widget/other.html")
        .expect_err("must be rejected");

    // Then: The error is resource-not-found
    assert_eq!(error.code, ErrorCode::RESOURCE_NOT_FOUND);
}
