//! UA-Census accuracy checker entry point
//!
//! Reads a record file and measures how often the bot heuristic agrees with
//! each record's category.

use clap::Parser;
use std::path::PathBuf;
use ua_census::accuracy::check_records;
use ua_census::logging::setup_logging;
use ua_census::output::read_records;
use ua_census::IsBotClassifier;

/// Check a bot heuristic against a scraped user-agent file
#[derive(Parser, Debug)]
#[command(name = "ua-accuracy")]
#[command(version)]
#[command(about = "Check a bot heuristic against a scraped user-agent file", long_about = None)]
struct Cli {
    /// Record file produced by ua-census
    #[arg(long, value_name = "PATH", default_value = "crawler-user-agents_2.json")]
    input: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    setup_logging(env!("CARGO_CRATE_NAME"), cli.verbose, cli.quiet);

    if cli.input.as_os_str().is_empty() {
        tracing::error!("--input flag cannot be empty");
        return Err("--input flag cannot be empty".into());
    }

    let records = match read_records(&cli.input) {
        Ok(records) => records,
        Err(e) => {
            tracing::error!("Failed to read {}: {}", cli.input.display(), e);
            return Err(e.into());
        }
    };

    let report = check_records(&records, &IsBotClassifier::new());
    tracing::info!("{}", report);

    Ok(())
}
