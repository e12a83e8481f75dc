//! PlanApi trait definition

use async_trait::async_trait;
use serde_json::Value;

use super::{ApiError, RawResponse};

/// Stateless client for the plan endpoints
///
/// The same three routes exist on the backend and on the proxy, so one trait
/// serves both hops: the proxy points it at the backend, the frontends point
/// it at the proxy. Each call is a single attempt with no retry.
#[async_trait]
pub trait PlanApi: Send + Sync {
    /// Base URL requests are sent to
    fn base_url(&self) -> &str;

    /// POST /api/plan
    async fn create_plan(&self, body: &Value) -> Result<RawResponse, ApiError>;

    /// POST /api/plan/{thread_id}/approve
    async fn approve(&self, thread_id: &str, body: &Value) -> Result<RawResponse, ApiError>;

    /// GET /api/plan/{thread_id}
    async fn fetch_plan(&self, thread_id: &str) -> Result<RawResponse, ApiError>;
}
