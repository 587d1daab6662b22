//! HTTP surface: health document plus the MCP streamable-HTTP endpoint.

use axum::routing::get;
use axum::{Json, Router};
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::streamable_http_server::{StreamableHttpServerConfig, StreamableHttpService};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::server::TopMoversServer;

pub const MCP_PATH: &str = "/mcp";
pub const HEALTH_PATH: &str = "/";

pub fn router(server: TopMoversServer) -> Router {
    let mcp = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    );

    Router::new()
        .route(HEALTH_PATH, get(health))
        .nest_service(MCP_PATH, mcp)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn health() -> Json<Value> {
    Json(health_document())
}

pub fn health_document() -> Value {
    json!({
        "status": "ok",
        "name": "TopMovers MCP Server",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "mcp": MCP_PATH,
            "health": HEALTH_PATH,
        },
    })
}
