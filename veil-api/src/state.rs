//! App state: stealth service, config, start time.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use veil_core::constants::{DEFAULT_API_PORT, DEFAULT_DIGEST_BACKEND};
use veil_core::error::{Result, VeilError};
use veil_ens::DirectoryResolver;
use veil_stealth::StealthService;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Listen port
    pub port: u16,
    /// Listen address
    pub bind_addr: IpAddr,
    /// Digest backend name
    pub digest: String,
    /// Optional JSON directory of published meta-addresses
    pub directory: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_API_PORT,
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            digest: DEFAULT_DIGEST_BACKEND.into(),
            directory: None,
        }
    }
}

impl ApiConfig {
    /// Reads `PORT`, `BIND_ADDR`, `VEIL_DIGEST` and `VEIL_DIRECTORY`, after
    /// loading `.env` if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        let defaults = Self::default();

        let port = match std::env::var("PORT") {
            Ok(v) => v
                .trim()
                .parse::<u16>()
                .map_err(|e| VeilError::ConfigError(format!("PORT {:?}: {}", v, e)))?,
            Err(_) => defaults.port,
        };

        let bind_addr = match std::env::var("BIND_ADDR") {
            Ok(v) => v
                .trim()
                .parse::<IpAddr>()
                .map_err(|e| VeilError::ConfigError(format!("BIND_ADDR {:?}: {}", v, e)))?,
            Err(_) => defaults.bind_addr,
        };

        Ok(Self {
            port,
            bind_addr,
            digest: std::env::var("VEIL_DIGEST").unwrap_or(defaults.digest),
            directory: std::env::var("VEIL_DIRECTORY")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    /// Returns the address to listen on.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

/// Shared handler state.
pub struct AppState {
    /// Configuration the server was started with
    pub config: ApiConfig,
    /// The service every handler calls into
    pub service: StealthService,
    /// Server start, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Builds the service described by `config`.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let mut builder = StealthService::builder().digest_name(&config.digest)?;

        if let Some(path) = &config.directory {
            let directory = DirectoryResolver::load(path)?;
            info!(entries = directory.len(), "Resolving names from directory");
            builder = builder.resolver(Arc::new(directory));
        }

        Ok(Self::with_service(config, builder.build()))
    }

    /// Wraps an already-built service.
    pub fn with_service(config: ApiConfig, service: StealthService) -> Self {
        Self {
            config,
            service,
            started_at: Instant::now(),
        }
    }
}
