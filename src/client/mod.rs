//! Portal request executor and its provider-agnostic interface.
//!
//! The prober talks to the portal only through [`PortalApi`]. The HTTP
//! implementation lives in [`http_client`]; tests plug in their own.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::Result;

pub mod http_client;
pub mod response;

pub use self::http_client::PortalClient;
pub use self::response::ModelsView;

// ── Core Types ──────────────────────────────────────────────────────

/// Normalized outcome of one portal call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointCallResult {
    pub status: u16,
    /// Parsed JSON body, or `None` when the body was not JSON.
    pub data: Option<Value>,
    /// Lowercased header names; repeated headers joined with `", "`.
    pub headers: BTreeMap<String, String>,
}

impl EndpointCallResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Read the body as a models listing. Missing data reads as empty.
    pub fn models(&self) -> ModelsView<'_> {
        ModelsView::new(self.data.as_ref())
    }
}

/// Whether a request carries an API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPresence<'a> {
    Absent,
    Present(&'a str),
}

impl<'a> KeyPresence<'a> {
    /// `None` and `Some("")` both mean no key is sent.
    pub fn of(api_key: Option<&'a str>) -> Self {
        match api_key {
            Some(key) if !key.is_empty() => KeyPresence::Present(key),
            _ => KeyPresence::Absent,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, KeyPresence::Present(_))
    }
}

/// Body for a predict call.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictBody {
    /// Serialized as JSON.
    Json(Value),
    /// Sent byte-for-byte, for malformed payloads.
    Raw(String),
}

impl PredictBody {
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        match self {
            PredictBody::Json(value) => Ok(serde_json::to_vec(value)?),
            PredictBody::Raw(text) => Ok(text.as_bytes().to_vec()),
        }
    }

    /// Parse as JSON when possible, otherwise keep the text raw.
    pub fn from_cli(text: &str) -> Self {
        serde_json::from_str(text)
            .map(PredictBody::Json)
            .unwrap_or_else(|_| PredictBody::Raw(text.to_string()))
    }
}

impl From<Value> for PredictBody {
    fn from(value: Value) -> Self {
        PredictBody::Json(value)
    }
}

impl From<&str> for PredictBody {
    fn from(text: &str) -> Self {
        PredictBody::Raw(text.to_string())
    }
}

// ── Executor Trait ──────────────────────────────────────────────────

/// The two portal calls the prober and tests rely on.
///
/// Implementations must not fail on non-2xx statuses or unparseable
/// bodies; only transport-level problems are errors.
#[async_trait]
pub trait PortalApi: Send + Sync {
    /// `GET /api/v1/models`.
    async fn call_models_endpoint(&self, api_key: Option<&str>) -> Result<EndpointCallResult>;

    /// `POST /api/v1/predict` with `Content-Type: application/json`.
    async fn call_predict_endpoint(
        &self,
        body: &PredictBody,
        api_key: Option<&str>,
    ) -> Result<EndpointCallResult>;
}
