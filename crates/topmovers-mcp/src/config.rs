//! Process configuration.
//!
//! Values come from command-line flags, falling back to environment
//! variables (a `.env` file is loaded first when present). The result is a
//! single immutable [`ServerConfig`] resolved before anything is served.
//!
//! | Flag | Variable | Default |
//! |------|----------|---------|
//! | `--api-key` | `ALPHA_VANTAGE_API_KEY` | required |
//! | `--port` | `PORT` | `3000` |
//! | `--bind` | `BIND` | `0.0.0.0` |
//! | `--widget-dir` | `TOPMOVERS_WIDGET_DIR` | `web/dist` |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use topmovers_core::ApiKey;

use crate::error::ServerError;

pub const DEFAULT_PORT: u16 = 3000;

/// Raw command-line / environment input.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "topmovers-server",
    version,
    about = "MCP server exposing Alpha Vantage top gainers, losers and most active stocks"
)]
pub struct ServerArgs {
    /// Alpha Vantage API key.
    #[arg(long, env = "ALPHA_VANTAGE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Interface address to bind.
    #[arg(long, env = "BIND", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind: IpAddr,

    /// Directory holding the built `widget.js` and `widget.css`.
    #[arg(long, env = "TOPMOVERS_WIDGET_DIR", default_value = "web/dist")]
    pub widget_dir: PathBuf,
}

/// Validated configuration shared by the whole process.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub api_key: ApiKey,
    pub addr: SocketAddr,
    pub widget_dir: PathBuf,
}

impl ServerConfig {
    /// Fails when the API key is absent or blank.
    pub fn from_args(args: ServerArgs) -> Result<Self, ServerError> {
        let raw_key = args.api_key.ok_or(ServerError::MissingApiKey)?;
        let api_key = ApiKey::new(raw_key).map_err(|_| ServerError::MissingApiKey)?;

        Ok(Self {
            api_key,
            addr: SocketAddr::new(args.bind, args.port),
            widget_dir: args.widget_dir,
        })
    }
}
