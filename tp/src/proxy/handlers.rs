//! Proxy request handlers
//!
//! Each handler forwards to the backend once and relays whatever comes back.
//! Status codes pass through untouched; a body that is not JSON becomes `{}`.
//! Anything that prevents getting a response (including an unparseable
//! request body) is answered with a 502 envelope.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::ProxyState;
use crate::api::RawResponse;

/// Body returned when the backend could not be reached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    pub detail: String,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>, backend_url: &str) -> Self {
        Self {
            error: error.into(),
            detail: format!("Ensure the Python backend is running on {}", backend_url),
        }
    }
}

fn parse_body(body: &Bytes) -> Result<Value, String> {
    serde_json::from_slice(body).map_err(|e| e.to_string())
}

fn relay(state: &ProxyState, route: &str, outcome: Result<RawResponse, String>) -> Response {
    match outcome {
        Ok(raw) => {
            debug!(%route, status = raw.status, "relay: backend responded");
            let status = StatusCode::from_u16(raw.status).unwrap_or(StatusCode::BAD_GATEWAY);
            (status, Json(raw.json_or_empty())).into_response()
        }
        Err(message) => {
            warn!(%route, error = %message, "relay: backend unreachable");
            let envelope = ErrorEnvelope::new(message, state.backend_url());
            (StatusCode::BAD_GATEWAY, Json(envelope)).into_response()
        }
    }
}

/// POST /api/plan
pub async fn create_plan(State(state): State<ProxyState>, body: Bytes) -> Response {
    debug!(body_len = body.len(), "create_plan: called");
    let outcome = match parse_body(&body) {
        Ok(json) => state.backend.create_plan(&json).await.map_err(|e| e.to_string()),
        Err(e) => Err(e),
    };
    relay(&state, "/api/plan", outcome)
}

/// POST /api/plan/{thread_id}/approve
pub async fn approve_plan(
    State(state): State<ProxyState>,
    Path(thread_id): Path<String>,
    body: Bytes,
) -> Response {
    debug!(%thread_id, body_len = body.len(), "approve_plan: called");
    let outcome = match parse_body(&body) {
        Ok(json) => state
            .backend
            .approve(&thread_id, &json)
            .await
            .map_err(|e| e.to_string()),
        Err(e) => Err(e),
    };
    relay(&state, "/api/plan/{thread_id}/approve", outcome)
}

/// GET /api/plan/{thread_id}
pub async fn get_plan(State(state): State<ProxyState>, Path(thread_id): Path<String>) -> Response {
    debug!(%thread_id, "get_plan: called");
    let outcome = state.backend.fetch_plan(&thread_id).await.map_err(|e| e.to_string());
    relay(&state, "/api/plan/{thread_id}", outcome)
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(serde_json::json!({ "status": "ok", "service": "tripplanner-proxy" }))
}

/// GET /
pub async fn home(State(state): State<ProxyState>) -> Response {
    debug!("home: called");
    match state.home.render(state.backend_url()) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            warn!(error = %e, "home: render failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render home page").into_response()
        }
    }
}
