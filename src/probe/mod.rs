//! API-key variation prober: walks a fixed list of key guesses.
//!
//! Each candidate gets exactly one models-listing call, in list order,
//! and each call finishes before the next starts. The list escalates from
//! no auth at all to admin-looking keys, so the output reads top to bottom
//! as an access-control audit.
//!
//! Transport failures are not caught per candidate: the first one aborts
//! the run and is returned to the caller.

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use crate::client::{EndpointCallResult, KeyPresence, PortalApi};
use crate::error::Result;

/// Label used for candidates that send no key.
pub const NO_KEY_LABEL: &str = "none";

/// One API-key guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCandidate {
    /// No key at all.
    Absent,
    /// The empty string; sent the same as `Absent`.
    Empty,
    Literal(&'static str),
}

impl KeyCandidate {
    pub fn as_key(&self) -> Option<&'static str> {
        match *self {
            KeyCandidate::Absent => None,
            KeyCandidate::Empty => Some(""),
            KeyCandidate::Literal(key) => Some(key),
        }
    }

    pub fn presence(&self) -> KeyPresence<'static> {
        KeyPresence::of(self.as_key())
    }

    pub fn label(&self) -> &'static str {
        match self.presence() {
            KeyPresence::Present(key) => key,
            KeyPresence::Absent => NO_KEY_LABEL,
        }
    }
}

/// The regression list. Order matters.
pub const KEY_CANDIDATES: [KeyCandidate; 8] = [
    KeyCandidate::Absent,
    KeyCandidate::Empty,
    KeyCandidate::Literal("test-key"),
    KeyCandidate::Literal("admin"),
    KeyCandidate::Literal("cloudai-admin-key"),
    KeyCandidate::Literal("gcp-admin"),
    KeyCandidate::Literal("prod-key"),
    KeyCandidate::Literal("development"),
];

/// What one candidate unlocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeResult {
    pub key: String,
    pub status: u16,
    pub has_production_models: bool,
    pub is_admin: bool,
    pub note: Option<String>,
}

impl ProbeResult {
    pub fn from_response(candidate: &KeyCandidate, response: &EndpointCallResult) -> Self {
        let models = response.models();
        Self {
            key: candidate.label().to_string(),
            status: response.status,
            has_production_models: models.has_production_models(),
            is_admin: models.is_admin(),
            note: models.note().map(str::to_string),
        }
    }
}

/// Probe every entry of [`KEY_CANDIDATES`].
pub async fn test_api_key_variations<A>(api: &A) -> Result<Vec<ProbeResult>>
where
    A: PortalApi + ?Sized,
{
    probe_candidates(api, &KEY_CANDIDATES).await
}

/// Probe the given candidates one after another.
pub async fn probe_candidates<A>(api: &A, candidates: &[KeyCandidate]) -> Result<Vec<ProbeResult>>
where
    A: PortalApi + ?Sized,
{
    let scan_start = Utc::now();
    info!("Probing {} API key candidates", candidates.len());

    let mut results = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let key = match candidate.presence() {
            KeyPresence::Present(key) => Some(key),
            KeyPresence::Absent => None,
        };

        let response = api.call_models_endpoint(key).await?;
        let result = ProbeResult::from_response(candidate, &response);

        if result.is_admin {
            warn!(key = %result.key, status = result.status, "Admin access granted");
        } else if result.has_production_models {
            warn!(key = %result.key, status = result.status, "Production models revealed");
        } else {
            info!(key = %result.key, status = result.status, "Public access only");
        }

        results.push(result);
    }

    let summary = ProbeSummary::of(&results);
    info!(
        total = summary.total,
        production = summary.production,
        admin = summary.admin,
        duration_ms = (Utc::now() - scan_start).num_milliseconds(),
        "Key probe complete"
    );

    Ok(results)
}

/// Counts over a finished probe run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProbeSummary {
    pub total: usize,
    pub production: usize,
    pub admin: usize,
}

impl ProbeSummary {
    pub fn of(results: &[ProbeResult]) -> Self {
        Self {
            total: results.len(),
            production: results.iter().filter(|r| r.has_production_models).count(),
            admin: results.iter().filter(|r| r.is_admin).count(),
        }
    }
}
