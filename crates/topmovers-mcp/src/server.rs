//! MCP server handler wiring the tool and the widget resource together.

use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParam, CallToolResult, Implementation, JsonObject, ListResourcesResult,
    ListToolsResult, PaginatedRequestParam, ReadResourceRequestParam, ReadResourceResult,
    Resource, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{ErrorData as McpError, ServerHandler};
use topmovers_core::MoversSource;

use crate::tool::{TopMoversTool, TOOL_NAME};
use crate::widget::{WidgetAssets, WIDGET_URI};

pub const SERVER_NAME: &str = "topmovers-server";

/// One instance per MCP session; clones share the source and widget assets.
#[derive(Clone)]
pub struct TopMoversServer {
    tool: TopMoversTool,
    widget: Arc<WidgetAssets>,
}

impl TopMoversServer {
    pub fn new(source: Arc<dyn MoversSource>, widget: Arc<WidgetAssets>) -> Self {
        Self {
            tool: TopMoversTool::new(source),
            widget,
        }
    }

    pub fn tools(&self) -> Vec<Tool> {
        vec![TopMoversTool::descriptor()]
    }

    pub async fn call(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        match name {
            TOOL_NAME => self.tool.call(arguments).await,
            other => Err(McpError::invalid_params(
                format!("unknown tool '{other}'"),
                None,
            )),
        }
    }

    pub fn resources(&self) -> Vec<Resource> {
        vec![WidgetAssets::resource()]
    }

    pub fn read(&self, uri: &str) -> Result<ReadResourceResult, McpError> {
        if uri != WIDGET_URI {
            return Err(McpError::resource_not_found(
                format!("resource '{uri}' not found"),
                None,
            ));
        }
        Ok(ReadResourceResult {
            contents: vec![self.widget.contents()],
        })
    }
}

impl ServerHandler for TopMoversServer {
    fn get_info(&self) -> ServerInfo {
        let mut server_info = Implementation::from_build_env();
        server_info.name = String::from(SERVER_NAME);
        server_info.version = String::from(env!("CARGO_PKG_VERSION"));

        ServerInfo {
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info,
            instructions: Some(String::from(
                "Call 'topmovers' to get today's top US stock gainers, losers and most actively traded tickers.",
            )),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.call(request.name.as_ref(), request.arguments).await
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult::with_all_items(self.resources()))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        self.read(&request.uri)
    }
}
