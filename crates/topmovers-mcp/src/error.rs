use std::net::SocketAddr;

use thiserror::Error;
use topmovers_core::HttpError;

/// Startup and serving failures, mapped to process exit codes.
///
/// Tool-level upstream failures never reach this type; they are answered
/// in-band by the tool handler.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("ALPHA_VANTAGE_API_KEY is required (set it in the environment or a .env file)")]
    MissingApiKey,

    #[error("failed to initialise the Alpha Vantage client: {0}")]
    HttpClient(#[from] HttpError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ServerError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::MissingApiKey => 2,
            Self::HttpClient(_) => 10,
            Self::Bind { .. } => 10,
            Self::Io(_) => 10,
        }
    }
}
