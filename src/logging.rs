//! Tracing subscriber setup shared by both binaries

use tracing_subscriber::EnvFilter;

/// Builds the log filter for a binary whose crate name is `bin_target`
///
/// Events from the library and from the binary itself share the same level;
/// everything else is held at `warn` until the most verbose setting.
pub fn build_filter(bin_target: &str, verbose: u8, quiet: bool) -> EnvFilter {
    if quiet {
        return EnvFilter::new("error");
    }

    let directives = match verbose {
        0 => format!("ua_census=info,{}=info,warn", bin_target),
        1 => format!("ua_census=debug,{}=debug,info", bin_target),
        2 => format!("ua_census=trace,{}=trace,debug", bin_target),
        _ => "trace".to_string(),
    };
    EnvFilter::new(directives)
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Log lines always go to stderr, leaving stdout free.
pub fn setup_logging(bin_target: &str, verbose: u8, quiet: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(bin_target, verbose, quiet))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
