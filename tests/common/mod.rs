//! Common test utilities for E2E tests
//!
//! `MockPortal` serves the models and predict endpoints the same way the
//! real portal does, and records every request it receives.

#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use portal_probe::fixtures::{PUBLIC_DEV_MODELS, PUBLIC_NOTE};
use portal_probe::{PortalClient, PortalConfig};

pub const DEV_KEY: &str = "dev-key-12345";
pub const ADMIN_KEY: &str = "admin-secret-key";

/// A request as the mock portal saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct SeenRequest {
    pub path: &'static str,
    pub api_key: Option<Vec<u8>>,
    pub content_type: Option<String>,
}

#[derive(Clone)]
struct MockState {
    api_key: String,
    admin_key: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl MockState {
    fn record(&self, path: &'static str, headers: &HeaderMap) {
        self.seen.lock().unwrap().push(SeenRequest {
            path,
            api_key: headers.get("x-api-key").map(|v| v.as_bytes().to_vec()),
            content_type: headers
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        });
    }
}

/// Test portal instance
pub struct MockPortal {
    pub addr: SocketAddr,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl MockPortal {
    /// Portal with its stock keys.
    pub async fn start() -> Self {
        Self::with_keys(DEV_KEY, ADMIN_KEY).await
    }

    /// Portal whose production and admin keys are the given strings.
    pub async fn with_keys(api_key: &str, admin_key: &str) -> Self {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            api_key: api_key.to_string(),
            admin_key: admin_key.to_string(),
            seen: Arc::clone(&seen),
        };

        let app = Router::new()
            .route("/api/v1/models", get(list_models))
            .route("/api/v1/predict", post(predict))
            .with_state(state);

        let addr = serve(app).await;
        Self { addr, seen }
    }

    /// Portal backed by an arbitrary router; nothing is recorded.
    pub async fn with_router(app: Router) -> Self {
        let addr = serve(app).await;
        Self {
            addr,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn config(&self) -> PortalConfig {
        PortalConfig::default().with_portal_url(self.url())
    }

    pub fn client(&self) -> PortalClient {
        PortalClient::new(&self.config()).unwrap()
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// A base URL nothing is listening on.
pub async fn closed_portal_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

async fn list_models(State(state): State<MockState>, headers: HeaderMap) -> Json<Value> {
    state.record("/api/v1/models", &headers);
    let api_key = headers
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let mut response = json!({
        "status": "success",
        "models": {
            "dev": PUBLIC_DEV_MODELS,
            "prod": []
        }
    });

    if api_key == state.api_key {
        response["models"]["prod"] = json!(["sentiment-v1", "translation-v2"]);
        response["note"] = json!("Production models loaded");
    } else if api_key == state.admin_key {
        response["models"]["prod"] = json!(["sentiment-v1", "translation-v2", "gpt5-production"]);
        response["admin"] = json!(true);
        response["note"] = json!("Admin access granted");
    } else {
        response["note"] = json!(PUBLIC_NOTE);
    }

    Json(response)
}

async fn predict(State(state): State<MockState>, headers: HeaderMap, body: Bytes) -> Response {
    state.record("/api/v1/predict", &headers);

    let has_key = headers
        .get("x-api-key")
        .map(|v| !v.is_empty())
        .unwrap_or(false);
    if !has_key {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "API key required"})),
        )
            .into_response();
    }

    let data: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Html("<!doctype html>\n<title>400 Bad Request</title>\n<h1>Bad Request</h1>"),
            )
                .into_response();
        }
    };

    let model = data["model"].as_str().unwrap_or("sentiment-v1").to_string();
    let text = data["text"].as_str().unwrap_or_default().to_lowercase();
    let prediction = if text.contains("good") || text.contains("great") {
        "positive"
    } else if text.contains("bad") || text.contains("terrible") {
        "negative"
    } else {
        "neutral"
    };

    Json(json!({
        "model": model,
        "prediction": prediction,
        "confidence": 0.85
    }))
    .into_response()
}
