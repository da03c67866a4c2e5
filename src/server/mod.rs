// textsim - HTTP server module
// Thin JSON transport around the comparison engine

mod handlers;
mod middleware;

pub use handlers::{create_router, health_check, CompareRequest, HealthStatus};
pub use middleware::{request_id_middleware, RequestId};

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::compare::Comparator;
use crate::config::ServerConfig;
use crate::errors::{bind_failed_error, wrap_error_with_suggestion};

/// Shared state for the HTTP server
pub struct CompareServer {
    /// Comparison engine (stateless, shared across requests)
    comparator: Arc<Comparator>,
    /// Server configuration
    config: ServerConfig,
    started_at: Instant,
}

impl CompareServer {
    pub fn new(config: ServerConfig, comparator: Comparator) -> Self {
        Self {
            comparator: Arc::new(comparator),
            config,
            started_at: Instant::now(),
        }
    }

    /// Build the axum application with tracing and CORS layers
    pub fn into_app(self) -> axum::Router {
        create_router(Arc::new(self))
            .layer(axum::middleware::from_fn(request_id_middleware))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
    }

    /// Start the HTTP server
    pub async fn serve(self) -> Result<()> {
        let bind_address = self.config.bind_address.clone();
        let addr: SocketAddr = bind_address.parse().map_err(|e| {
            anyhow::anyhow!(wrap_error_with_suggestion(
                format!("Invalid bind address '{}': {}", bind_address, e),
                "Use host:port, e.g. 127.0.0.1:5000"
            ))
        })?;

        let app = self.into_app();

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| bind_failed_error(&bind_address))?;

        tracing::info!("Starting textsim server on {}", addr);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("textsim server shut down");
        Ok(())
    }

    pub fn comparator(&self) -> &Arc<Comparator> {
        &self.comparator
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

/// Resolve on Ctrl+C, or SIGTERM on unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Could not listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
