//! portal-probe CLI.
//!
//! Logs go to stderr; results go to stdout as JSON (or a table for
//! `probe`) so they can be piped.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::collections::BTreeMap;
use tracing::info;

use portal_probe::fixtures::{self, endpoints, ExpectedValues};
use portal_probe::{test_api_key_variations, PortalApi, PortalClient, PortalConfig, PredictBody, ProbeResult, ProbeSummary};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Portal base URL (overrides PORTAL_URL)
    #[arg(long, global = true)]
    portal_url: Option<String>,
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// GET the models listing
    Models {
        #[arg(long)]
        api_key: Option<String>,
    },
    /// POST to the predict endpoint
    Predict {
        /// Request body; sent as JSON when it parses, raw otherwise
        #[arg(long)]
        data: String,
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Try every built-in API key candidate against the models listing
    Probe {
        /// Print results as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print endpoints and expected values for the active configuration
    Fixtures,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();
    init_tracing(args.json_logs);

    let mut config = PortalConfig::from_env();
    if let Some(url) = args.portal_url {
        config = config.with_portal_url(url);
    }

    info!(
        portal_url = %config.portal_url,
        project_id = %config.project_id,
        region = %config.region,
        "portal-probe v{}",
        env!("CARGO_PKG_VERSION")
    );

    match args.command {
        Command::Fixtures => {
            let paths: BTreeMap<&str, &str> = endpoints::ALL.iter().copied().collect();
            print_json(&json!({
                "config": &config,
                "endpoints": paths,
                "expectedValues": ExpectedValues::for_config(&config),
                "expectedApiResponses": { "modelsPublic": fixtures::expected_models_public() },
            }))
        }
        command => {
            let client = PortalClient::new(&config).context("Failed to build portal client")?;
            run(&client, command).await
        }
    }
}

async fn run(client: &PortalClient, command: Command) -> Result<()> {
    match command {
        Command::Models { api_key } => {
            let result = client
                .call_models_endpoint(api_key.as_deref())
                .await
                .with_context(|| format!("GET {}{} failed", client.base_url(), endpoints::MODELS))?;
            print_json(&result)
        }
        Command::Predict { data, api_key } => {
            let body = PredictBody::from_cli(&data);
            let result = client
                .call_predict_endpoint(&body, api_key.as_deref())
                .await
                .with_context(|| format!("POST {}{} failed", client.base_url(), endpoints::PREDICT))?;
            print_json(&result)
        }
        Command::Probe { json } => {
            let results = test_api_key_variations(client)
                .await
                .context("Key probe aborted")?;
            if json {
                print_json(&results)
            } else {
                print_table(&results);
                Ok(())
            }
        }
        Command::Fixtures => unreachable!("handled before the client is built"),
    }
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "portal_probe=info".into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to encode output")?;
    println!("{text}");
    Ok(())
}

fn print_table(results: &[ProbeResult]) {
    println!("{:<20} {:>6}  {:<5} {:<5}  NOTE", "KEY", "STATUS", "PROD", "ADMIN");
    for r in results {
        println!(
            "{:<20} {:>6}  {:<5} {:<5}  {}",
            r.key,
            r.status,
            r.has_production_models,
            r.is_admin,
            r.note.as_deref().unwrap_or("-")
        );
    }
    let summary = ProbeSummary::of(results);
    println!(
        "\n{} probed, {} revealed production models, {} granted admin",
        summary.total, summary.production, summary.admin
    );
}
