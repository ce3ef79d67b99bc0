//! # VEIL API Server
//!
//! REST API for the VEIL protocol, shaped for the web client.
//!
//! ## Endpoints
//!
//! - `GET /health` - Liveness and counters
//! - `GET /api/resolve-stealth/:ensName` - Resolve a name to a meta-address
//! - `POST /api/derive-stealth` - Derive a stealth address and record the announcement
//! - `GET /api/announcements/:viewTag/:pView` - Scan announcements by recomputed view tag
//! - `POST /api/generate-derivation-proof` - Placeholder derivation proof
//! - `POST /api/generate-ownership-proof` - Placeholder ownership proof
//! - `POST /api/pool/deposit` - Deposit into the shielded pool
//! - `GET /api/pool/state` - Pool totals, commitments and spent nullifiers
//! - `POST /api/pool/sweep` - Spend every note a view key owns
//!
//! ## Example
//!
//! ```rust,ignore
//! use veil_api::{ApiConfig, ApiServer};
//!
//! let config = ApiConfig::from_env()?;
//! let server = ApiServer::new(config)?;
//! server.run(([0, 0, 0, 0], 3001)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod routes;
mod handlers;
mod state;
mod dto;
mod error;
mod extract;

pub use routes::create_router;
pub use state::{ApiConfig, AppState};
pub use error::ApiError;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use veil_core::error::Result;

/// API server for VEIL.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a new API server with the given configuration.
    ///
    /// Fails if the configured digest backend is unknown or the directory
    /// file cannot be loaded.
    pub fn new(config: ApiConfig) -> Result<Self> {
        Ok(Self::with_state(AppState::new(config)?))
    }

    /// Creates a server around an existing state.
    pub fn with_state(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Creates the router with all routes configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!(
            %addr,
            digest = self.state.service.digest().name(),
            "VEIL API server listening"
        );

        axum::serve(listener, self.router()).await
    }
}

/// Starts the API server with configuration from the environment.
pub async fn start_server() -> std::io::Result<()> {
    let invalid = |e: veil_core::VeilError| std::io::Error::new(std::io::ErrorKind::InvalidInput, e);
    let config = ApiConfig::from_env().map_err(invalid)?;
    let addr = config.socket_addr();
    let server = ApiServer::new(config).map_err(invalid)?;
    server.run(addr).await
}
