//! # PRISM News
//!
//! Fetches recent news about a topic and splits it into three perspectives
//! (critic, facts, proponent) with a generative-language model.
//!
//! ## Usage
//!
//! ```sh
//! prism_news "AI Safety Bill" --region UK --intensity skeptical
//! ```
//!
//! ## Architecture
//!
//! One request flows through a strictly sequential pipeline:
//! 1. **Resolving**: Rewrite the topic into a short English search keyword
//! 2. **Fetching**: Search the news API, falling back through up to four strategies
//! 3. **Synthesizing**: Ask the model for a JSON critic/facts/proponent analysis
//! 4. **Output**: Print Markdown cards (or JSON) and optionally write files

use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::process::ExitCode;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod demo;
mod error;
mod models;
mod outputs;
mod pipeline;
mod regions;
mod sources;
mod utils;

use api::{GeminiClient, http_client};
use cli::Cli;
use config::load_config;
use outputs::{json, markdown};
use pipeline::{Outcome, Pipeline, demo_outcome};
use sources::gnews::GNewsClient;
use utils::{ensure_writable_dir, slugify_title};

#[tokio::main]
async fn main() -> ExitCode {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    match run(Cli::parse()).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!(error = %e, "prism_news failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Run one analysis. Returns whether the pipeline produced an analysis.
#[instrument(level = "info", skip_all, fields(topic = %args.topic))]
async fn run(args: Cli) -> Result<bool, Box<dyn Error>> {
    let start_time = std::time::Instant::now();
    info!("prism_news starting up");
    debug!(?args.region, ?args.intensity, demo = args.demo, "Parsed CLI arguments");

    let config = load_config(args.config.as_deref())?;
    let settings = args.settings();

    let outcome = if settings.demo_mode {
        demo_outcome(&args.topic)
    } else {
        let http = http_client(config.request_timeout_secs)?;
        let google_key = args.google_api_key.as_deref().unwrap_or_else(|| {
            warn!("GOOGLE_API_KEY not set; keyword resolution and analysis will fail");
            ""
        });
        let gnews_key = args.gnews_api_key.as_deref().unwrap_or_else(|| {
            warn!("GNEWS_API_KEY not set; news search will fail");
            ""
        });

        let model = GeminiClient::discover(
            http.clone(),
            &config.llm_base_url,
            google_key,
            &config.default_model,
        )
        .await;
        let search = GNewsClient::new(http, &config, gnews_key);
        Pipeline::new(&search, &model, &config.keyword_fallbacks)
            .get_analysis(&args.topic, &settings)
            .await
    };

    let rendered = if args.json {
        serde_json::to_string_pretty(&outcome.to_json())?
    } else {
        markdown::outcome_to_markdown(&outcome, Local::now())
    };
    println!("{rendered}");

    write_outputs(&args, &outcome).await;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        ok = outcome.result.is_ok(),
        query_used = outcome.context.query_used.as_deref().unwrap_or("n/a"),
        "Execution complete"
    );
    Ok(outcome.result.is_ok())
}

/// Write the optional JSON and Markdown files. Failures are logged, not fatal.
async fn write_outputs(args: &Cli, outcome: &Outcome) {
    if let Some(dir) = &args.json_output_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(path = %dir, error = %e, "JSON output directory is not writable");
        } else if let Err(e) = json::write_outcome(outcome, &args.topic, dir).await {
            error!(error = %e, "Failed to write JSON");
        }
    }

    if let Some(dir) = &args.markdown_output_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(path = %dir, error = %e, "Markdown output directory is not writable");
            return;
        }
        let now = Local::now();
        let path = format!(
            "{}/{}_{}.md",
            dir.trim_end_matches('/'),
            now.date_naive(),
            slugify_title(&args.topic)
        );
        info!(%path, "Writing Markdown");
        if let Err(e) = tokio::fs::write(&path, markdown::outcome_to_markdown(outcome, now)).await {
            error!(%path, error = %e, "Failed writing Markdown");
        }
    }
}
