//! # topmovers-mcp
//!
//! MCP server exposing a single `topmovers` tool backed by Alpha Vantage,
//! plus the HTML widget resource hosts use to render its results.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | CLI / environment configuration |
//! | [`error`] | Startup errors and exit codes |
//! | [`routes`] | axum router (health + `/mcp`) |
//! | [`server`] | `rmcp::ServerHandler` implementation |
//! | [`tool`] | The `topmovers` tool handler |
//! | [`widget`] | `ui://widget/topmovers.html` resource |

pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod tool;
pub mod widget;

pub use config::{ServerArgs, ServerConfig};
pub use error::ServerError;
pub use server::TopMoversServer;
pub use tool::{ToolOutcome, TopMoversParams, TopMoversTool};
pub use widget::WidgetAssets;
