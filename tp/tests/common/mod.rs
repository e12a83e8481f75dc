//! Shared helpers: a throwaway planning backend and proxy on ephemeral ports

#![allow(dead_code)]

use std::sync::Arc;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use tripplanner::config::Config;
use tripplanner::proxy::{ProxyState, router};

/// Address that refuses connections
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:9";

pub fn awaiting_body(thread_id: &str) -> Value {
    json!({
        "thread_id": thread_id,
        "status": "awaiting_approval",
        "interrupt": [{
            "checkpoint": "destination_shortlist",
            "message": "Pick a destination",
            "destination_shortlist": ["Rishikesh", "Manali"]
        }],
        "state": {
            "user_input": "4-day solo trip to Rishikesh",
            "destination_shortlist": ["Rishikesh", "Manali"],
            "current_checkpoint": "destination_shortlist"
        }
    })
}

pub fn complete_body(thread_id: &str) -> Value {
    json!({
        "thread_id": thread_id,
        "status": "complete",
        "state": {
            "parsed_intent": {"destination": "Rishikesh", "num_days": 4, "budget_total": 15000, "currency": "INR"},
            "budget_allocation": {"transport": 3000, "stay": 4000, "food": 2500, "activities": 3000, "buffer": 2500},
            "day_by_day_itinerary": [{"day": 1, "items": [{"title": "Arrive in Rishikesh"}]}]
        }
    })
}

async fn create_plan(Json(body): Json<Value>) -> Response {
    match body.get("user_input").and_then(Value::as_str) {
        Some("crash") => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"detail": "Graph crashed"}))).into_response(),
        Some("plain") => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response(),
        Some("legacy") => Json(json!({"message": "Use the approve endpoint", "thread_id": "plan-legacy"})).into_response(),
        Some(_) => Json(awaiting_body("plan-1")).into_response(),
        None => (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({"detail": [{"loc": ["body", "user_input"]}]})))
            .into_response(),
    }
}

async fn approve_plan(Path(thread_id): Path<String>, Json(body): Json<Value>) -> Response {
    if body.get("resume") != Some(&json!(true)) {
        return (StatusCode::BAD_REQUEST, Json(json!({"detail": "resume required"}))).into_response();
    }
    Json(complete_body(&thread_id)).into_response()
}

async fn get_plan(Path(thread_id): Path<String>) -> Json<Value> {
    if thread_id == "missing" {
        Json(json!({"thread_id": thread_id, "status": "not_found", "state": null}))
    } else {
        Json(awaiting_body(&thread_id))
    }
}

/// Start the fake backend and return its base URL
pub async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/api/plan", post(create_plan))
        .route("/api/plan/:thread_id", get(get_plan))
        .route("/api/plan/:thread_id/approve", post(approve_plan));
    serve(app).await
}

/// Proxy router pointed at the given backend
pub fn proxy_router(backend_url: &str) -> Router {
    let mut config = Config::default();
    config.backend.url = backend_url.to_string();
    let state = ProxyState::from_config(Arc::new(config)).expect("proxy state");
    router(state)
}

/// Start a proxy in front of the given backend and return its base URL
pub async fn spawn_proxy(backend_url: &str) -> String {
    serve(proxy_router(backend_url)).await
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{}", addr)
}
