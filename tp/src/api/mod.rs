//! Plan API client module
//!
//! Talks to anything that serves the plan routes: the backend (from the
//! proxy) or the proxy (from the frontends).

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

pub mod client;
mod error;
mod http;

pub use client::PlanApi;
pub use error::ApiError;
pub use http::HttpPlanApi;

/// Status and body text of an HTTP response, uninterpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON
    pub fn json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// Parse the body as JSON, substituting an empty object when it is not
    pub fn json_or_empty(&self) -> Value {
        self.json().unwrap_or_else(|e| {
            debug!(error = %e, status = self.status, "json_or_empty: body is not JSON");
            Value::Object(Default::default())
        })
    }
}

/// Create an HTTP plan API client for the given base URL
pub fn create_client(base_url: &str) -> Result<Arc<dyn PlanApi>, ApiError> {
    debug!(%base_url, "create_client: called");
    Ok(Arc::new(HttpPlanApi::new(base_url)?))
}
