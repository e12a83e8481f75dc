//! HTTP implementation of the plan API
//!
//! One attempt per call with the client's default timeouts.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::{ApiError, PlanApi, RawResponse};

/// Plan API client over HTTP
#[derive(Debug, Clone)]
pub struct HttpPlanApi {
    base_url: String,
    http: Client,
}

impl HttpPlanApi {
    /// Create a client for the given base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let base_url = base_url.into();
        debug!(%base_url, "HttpPlanApi::new: called");
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            debug!("HttpPlanApi::new: base url has no http scheme");
            return Err(ApiError::InvalidBaseUrl(base_url));
        }

        let http = Client::builder().build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json(&self, url: String, body: &Value) -> Result<RawResponse, ApiError> {
        debug!(%url, "post_json: called");
        let response = self
            .http
            .post(url)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await?;
        Ok(Self::read(response).await)
    }

    async fn read(response: reqwest::Response) -> RawResponse {
        let status = response.status().as_u16();
        // An unreadable body is treated like an empty one
        let body = response.text().await.unwrap_or_default();
        debug!(%status, body_len = body.len(), "read: response received");
        RawResponse { status, body }
    }
}

#[async_trait]
impl PlanApi for HttpPlanApi {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn create_plan(&self, body: &Value) -> Result<RawResponse, ApiError> {
        debug!("create_plan: called");
        self.post_json(self.url("/api/plan"), body).await
    }

    async fn approve(&self, thread_id: &str, body: &Value) -> Result<RawResponse, ApiError> {
        debug!(%thread_id, "approve: called");
        self.post_json(self.url(&format!("/api/plan/{}/approve", thread_id)), body)
            .await
    }

    async fn fetch_plan(&self, thread_id: &str) -> Result<RawResponse, ApiError> {
        debug!(%thread_id, "fetch_plan: called");
        let response = self.http.get(self.url(&format!("/api/plan/{}", thread_id))).send().await?;
        Ok(Self::read(response).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let api = HttpPlanApi::new("http://localhost:8000/").unwrap();
        assert_eq!(api.base_url(), "http://localhost:8000");
        assert_eq!(api.url("/api/plan"), "http://localhost:8000/api/plan");
    }

    #[test]
    fn test_new_rejects_missing_scheme() {
        let err = HttpPlanApi::new("localhost:8000").unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl(_)));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        // Port 9 (discard) is closed on test machines
        let api = HttpPlanApi::new("http://127.0.0.1:9").unwrap();
        let err = api.create_plan(&serde_json::json!({})).await.unwrap_err();
        assert!(matches!(err, ApiError::Network(ref e) if e.is_connect()));
    }
}
