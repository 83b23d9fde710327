//! # blockstats API Server
//!
//! REST API serving aggregate block statistics from a short-lived cache.
//!
//! ## Endpoints
//!
//! - `GET /stats` - Current aggregate stats (cached for one minute)
//! - `GET /health` - Liveness and cache size
//!
//! ## Example
//!
//! ```rust,ignore
//! use blockstats_api::{ApiServer, ApiConfig};
//!
//! let config = ApiConfig::from_env();
//! let server = ApiServer::from_config(config)?;
//! server.run(([0, 0, 0, 0], 4102)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod routes;
mod handlers;
mod state;
mod dto;
mod error;

pub use routes::create_router;
pub use state::{AppState, ApiConfig};
pub use error::ApiError;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use blockstats_cache::TtlCache;
use blockstats_core::constants::STATS_CACHE_TTL_SECS;
use blockstats_core::error::{Result, StatsError};
use blockstats_core::traits::StatRepository;
use blockstats_core::types::Stat;
use blockstats_store::FileStatRepository;

/// API server for blockstats.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a server over the given stats source.
    pub fn new(config: ApiConfig, repository: Arc<dyn StatRepository>) -> Self {
        Self {
            state: Arc::new(AppState::new(config, repository)),
        }
    }

    /// Creates a server whose stats source is the configured snapshot file.
    pub fn from_config(config: ApiConfig) -> Result<Self> {
        let path = config
            .stats_file
            .clone()
            .ok_or_else(|| StatsError::Config("no stats source configured (set STATS_FILE)".into()))?;

        Ok(Self::new(config, Arc::new(FileStatRepository::new(path))))
    }

    /// Returns the shared state.
    pub fn state(&self) -> Arc<AppState> {
        self.state.clone()
    }

    /// Creates the router with all routes and layers configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let router = create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http());

        match self.state.config.request_timeout() {
            Some(timeout) => router.layer(TimeoutLayer::new(timeout)),
            None => router,
        }
    }

    /// Runs the server on the given address.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        let janitor = spawn_cache_janitor(
            self.state.cache.clone(),
            self.state.config.cleanup_interval(),
        );

        info!(
            %addr,
            ttl_secs = STATS_CACHE_TTL_SECS,
            "blockstats API server listening"
        );

        let result = axum::serve(listener, self.router()).await;
        janitor.abort();
        result
    }
}

/// Periodically drops expired entries from the stats cache.
///
/// Expired entries are already unreadable; the sweep only reclaims memory.
pub fn spawn_cache_janitor(cache: Arc<TtlCache<Stat>>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = cache.cleanup_expired();
            if removed > 0 {
                debug!(removed, "Swept expired cache entries");
            }
        }
    })
}
