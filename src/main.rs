//! Housing Appraiser - market value estimates for housing layouts
//!
//! Prices a saved housing list and prints the furniture/dye breakdown.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use housing_appraiser::cli::Args;
use housing_appraiser::models::AppraisalReport;
use housing_appraiser::{appraise_list, report, Config};

/// Main entry point for the appraiser.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables, then apply CLI flags
/// 3. Load catalog and price cache, price the list, persist the cache
/// 4. Print the breakdown and exit non-zero on any fatal error
#[tokio::main]
async fn main() -> ExitCode {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "housing_appraiser=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> anyhow::Result<()> {
    let config = args.apply(Config::from_env());
    let region = args.region(&config).to_string();
    info!(
        "Configuration loaded: data_dir={}, homes_dir={}, region={}, cutoff={}",
        config.data_dir.display(),
        config.homes_dir.display(),
        region,
        args.cutoff
    );

    let appraisal = appraise_list(&config, &args.list, &region, args.cutoff)
        .await
        .with_context(|| format!("failed to appraise '{}'", args.list))?;

    if args.json {
        let json = serde_json::to_string_pretty(&AppraisalReport::new(&appraisal))
            .context("failed to serialize report")?;
        println!("{}", json);
    } else {
        println!("{}", report::render(&appraisal));
    }

    Ok(())
}
