//! Portal configuration, read from the process environment.
//!
//! Every value has a literal default so the probe runs against a local
//! portal with no setup at all.

use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_PORTAL_URL: &str = "http://localhost:8080";
pub const DEFAULT_PROJECT_ID: &str = "test-project";
pub const DEFAULT_REGION: &str = "us-central1";
pub const DEFAULT_API_TIMEOUT: Duration = Duration::from_millis(10_000);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortalConfig {
    /// Base URL of the portal, e.g. `http://localhost:8080`.
    pub portal_url: String,
    pub project_id: String,
    pub region: String,
    /// Whole-request timeout applied by the HTTP client.
    #[serde(skip)]
    pub api_timeout: Duration,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            portal_url: DEFAULT_PORTAL_URL.to_string(),
            project_id: DEFAULT_PROJECT_ID.to_string(),
            region: DEFAULT_REGION.to_string(),
            api_timeout: DEFAULT_API_TIMEOUT,
        }
    }
}

impl PortalConfig {
    /// Load from `PORTAL_URL`, `PROJECT_ID` and `REGION`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str, default: &str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            portal_url: get("PORTAL_URL", DEFAULT_PORTAL_URL),
            project_id: get("PROJECT_ID", DEFAULT_PROJECT_ID),
            region: get("REGION", DEFAULT_REGION),
            api_timeout: DEFAULT_API_TIMEOUT,
        }
    }

    pub fn with_portal_url(mut self, portal_url: impl Into<String>) -> Self {
        self.portal_url = portal_url.into();
        self
    }

    /// Join the base URL and an endpoint path.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.portal_url.trim_end_matches('/'), path)
    }
}
