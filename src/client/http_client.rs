//! reqwest-backed portal client.
//!
//! Never turns an HTTP status into an error. The status, headers and
//! (best-effort) JSON body always come back to the caller to inspect.

use async_trait::async_trait;
use http::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use std::collections::BTreeMap;
use tracing::debug;

use super::*;
use crate::config::PortalConfig;
use crate::error::{ClientError, Result};
use crate::fixtures::endpoints;

pub const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");

pub struct PortalClient {
    client: reqwest::Client,
    base_url: String,
}

impl PortalClient {
    pub fn new(config: &PortalConfig) -> Result<Self> {
        reqwest::Url::parse(&config.portal_url).map_err(|e| ClientError::InvalidBaseUrl {
            url: config.portal_url.clone(),
            reason: e.to_string(),
        })?;

        let client = reqwest::Client::builder()
            .timeout(config.api_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.portal_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send the request and normalize whatever comes back.
    async fn execute(&self, request: reqwest::RequestBuilder, path: &str) -> Result<EndpointCallResult> {
        let start = std::time::Instant::now();
        let response = request.send().await?;
        let status = response.status().as_u16();
        let headers = flatten_headers(response.headers());

        // A body that cannot be read is a transport failure; one that
        // cannot be parsed is just `data: None`.
        let body = response.bytes().await?;
        let data = serde_json::from_slice(&body).ok();

        debug!(
            path = %path,
            status = status,
            json = data.is_some(),
            body_bytes = body.len(),
            latency_ms = start.elapsed().as_millis() as u64,
            "Portal call complete"
        );

        Ok(EndpointCallResult { status, data, headers })
    }
}

#[async_trait]
impl PortalApi for PortalClient {
    async fn call_models_endpoint(&self, api_key: Option<&str>) -> Result<EndpointCallResult> {
        let headers = request_headers(KeyPresence::of(api_key), false)?;
        debug!(api_key = api_key_present(&headers), "GET {}", endpoints::MODELS);

        let request = self.client.get(self.url(endpoints::MODELS)).headers(headers);
        self.execute(request, endpoints::MODELS).await
    }

    async fn call_predict_endpoint(
        &self,
        body: &PredictBody,
        api_key: Option<&str>,
    ) -> Result<EndpointCallResult> {
        let headers = request_headers(KeyPresence::of(api_key), true)?;
        debug!(api_key = api_key_present(&headers), "POST {}", endpoints::PREDICT);

        let request = self
            .client
            .post(self.url(endpoints::PREDICT))
            .headers(headers)
            .body(body.to_bytes()?);
        self.execute(request, endpoints::PREDICT).await
    }
}

/// Build request headers. The key, when present, is copied verbatim.
fn request_headers(key: KeyPresence<'_>, json_body: bool) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    if json_body {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }
    if let KeyPresence::Present(key) = key {
        let mut value = HeaderValue::from_str(key)?;
        value.set_sensitive(true);
        headers.insert(API_KEY_HEADER, value);
    }
    Ok(headers)
}

fn api_key_present(headers: &HeaderMap) -> bool {
    headers.contains_key(API_KEY_HEADER)
}

/// Collapse a header map to one string per (lowercase) name.
fn flatten_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut out: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        out.entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert_with(|| value.into_owned());
    }
    out
}
