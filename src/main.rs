//! UA-Census crawler entry point
//!
//! Scrapes the user-agent listing site into a JSON record file.

use clap::Parser;
use std::path::PathBuf;
use ua_census::config::load_optional_config;
use ua_census::crawler::run_crawl;
use ua_census::logging::setup_logging;

/// UA-Census: scrape categorized user-agent strings into a JSON file
#[derive(Parser, Debug)]
#[command(name = "ua-census")]
#[command(version)]
#[command(about = "Scrape categorized user-agent strings into a JSON file", long_about = None)]
struct Cli {
    /// Path of the JSON file to write
    #[arg(long, value_name = "PATH")]
    output: PathBuf,

    /// Optional TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    setup_logging(env!("CARGO_CRATE_NAME"), cli.verbose, cli.quiet);

    if cli.output.as_os_str().is_empty() {
        tracing::error!("--output flag cannot be empty");
        return Err("--output flag cannot be empty".into());
    }

    let config = match load_optional_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    match run_crawl(config, &cli.output).await {
        Ok(_) => Ok(()),
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
