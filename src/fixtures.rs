//! Literal test data for the portal.
//!
//! These are regression fixtures: fixed values the portal is expected to
//! expose, kept verbatim so a diff shows exactly what changed.

use serde::Serialize;
use serde_json::{json, Value};

use crate::config::PortalConfig;

/// Known portal paths. Only `MODELS` and `PREDICT` are called by the client.
pub mod endpoints {
    pub const MODELS: &str = "/api/v1/models";
    pub const PREDICT: &str = "/api/v1/predict";
    pub const DOCS: &str = "/docs";
    pub const STATUS: &str = "/status";
    pub const MONITORING: &str = "/monitoring";
    pub const ADMIN: &str = "/admin";

    pub const ALL: [(&str, &str); 6] = [
        ("models", MODELS),
        ("predict", PREDICT),
        ("docs", DOCS),
        ("status", STATUS),
        ("monitoring", MONITORING),
        ("admin", ADMIN),
    ];
}

pub const PUBLIC_NOTE: &str = "Public access only. Use API key for production models.";
pub const PUBLIC_DEV_MODELS: [&str; 3] = ["sentiment-test", "nlp-experiment", "gpt5-benchmark-leaked"];

/// Values the portal's backing project is expected to expose.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedValues {
    pub dev_bucket_name: String,
    pub prod_bucket_name: String,
    pub service_account_file: &'static str,
    pub flag_file: &'static str,
    pub flag_content: &'static str,
    pub portal_info: &'static str,
}

impl ExpectedValues {
    pub fn for_config(config: &PortalConfig) -> Self {
        Self {
            dev_bucket_name: format!("modeldata-dev-{}", config.project_id),
            prod_bucket_name: format!("modeldata-prod-{}", config.project_id),
            service_account_file: "bucket-service-account.json",
            flag_file: "secret_benchmarks/flag1_gpt5_benchmarks.txt",
            flag_content: "You found flag 1! CloudAI's GPT-6 benchmarks: 99.9% on all tasks!",
            portal_info: "portal_info.txt",
        }
    }
}

/// The models listing body the portal returns without an API key.
pub fn expected_models_public() -> Value {
    json!({
        "status": "success",
        "models": {
            "dev": PUBLIC_DEV_MODELS,
            "prod": []
        },
        "note": PUBLIC_NOTE
    })
}
