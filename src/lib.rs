//! Portal API probe.
//!
//! A thin client for a model-serving portal's HTTP API plus a prober that
//! replays a fixed list of API-key guesses against the models listing and
//! records what each one unlocked.

pub mod client;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod probe;

pub use client::{EndpointCallResult, KeyPresence, ModelsView, PortalApi, PortalClient, PredictBody};
pub use config::PortalConfig;
pub use error::ClientError;
pub use probe::{probe_candidates, test_api_key_variations, KeyCandidate, ProbeResult, ProbeSummary, KEY_CANDIDATES};
