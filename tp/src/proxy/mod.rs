//! Proxy server
//!
//! Serves the plan routes and relays them to the planning backend. The
//! configuration is read once at start-up and shared immutably; handlers keep
//! no state between requests.

mod handlers;
mod home;

pub use handlers::ErrorEnvelope;
pub use home::HomePage;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use eyre::{Context, Result};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::{PlanApi, create_client};
use crate::config::Config;

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct ProxyState {
    pub backend: Arc<dyn PlanApi>,
    pub config: Arc<Config>,
    home: Arc<HomePage>,
}

impl ProxyState {
    /// Build state around an existing backend client
    pub fn new(config: Arc<Config>, backend: Arc<dyn PlanApi>) -> Result<Self> {
        Ok(Self {
            backend,
            config,
            home: Arc::new(HomePage::new()?),
        })
    }

    /// Build state with an HTTP client pointed at the configured backend
    pub fn from_config(config: Arc<Config>) -> Result<Self> {
        let backend = create_client(config.backend.base_url()).context("Failed to create backend client")?;
        Self::new(config, backend)
    }

    /// Backend URL as configured, used in diagnostics
    pub fn backend_url(&self) -> &str {
        &self.config.backend.url
    }
}

/// Build the proxy router
pub fn router(state: ProxyState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health))
        .route("/api/plan", post(handlers::create_plan))
        .route("/api/plan/:thread_id", get(handlers::get_plan))
        .route("/api/plan/:thread_id/approve", post(handlers::approve_plan))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the proxy until Ctrl+C
pub async fn serve(config: Arc<Config>, listen: &str) -> Result<()> {
    let state = ProxyState::from_config(config.clone())?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .context(format!("Failed to bind {}", listen))?;
    info!(%listen, backend = %config.backend.url, "Proxy listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Proxy shutting down");
        })
        .await
        .context("Proxy server failed")?;

    Ok(())
}
