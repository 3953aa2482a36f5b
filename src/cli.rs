//! CLI argument parsing module for emuwatch

use clap::Parser;
use std::path::PathBuf;

/// Parse a worker count, rejecting zero
fn parse_concurrency(s: &str) -> Result<usize, String> {
    let n: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", s))?;
    if n == 0 {
        return Err("concurrency must be at least 1".to_string());
    }
    Ok(n)
}

/// Parse a timeout in whole seconds, rejecting zero
fn parse_timeout_secs(s: &str) -> Result<u64, String> {
    let secs: u64 = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid number of seconds: {}", s))?;
    if secs == 0 {
        return Err("timeout must be at least 1 second".to_string());
    }
    Ok(secs)
}

/// Android emulator version monitor
#[derive(Parser, Debug, Clone)]
#[command(
    name = "emuwatch",
    about = "Checks Android emulators for new releases and reports them to a webhook",
    disable_version_flag = true
)]
pub struct CliArgs {
    /// Baseline file with the versions currently deployed [default: emulator_versions.json]
    #[arg(long)]
    pub baseline: Option<PathBuf>,

    /// Optional TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Webhook URL receiving the status card (empty disables notification)
    #[arg(long, env = "EMUWATCH_WEBHOOK_URL", hide_env_values = true)]
    pub webhook_url: Option<String>,

    /// Base URL of the companion version tool
    #[arg(long, env = "EMUWATCH_DEEP_LINK_BASE")]
    pub deep_link_base: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_parser = parse_timeout_secs)]
    pub timeout: Option<u64>,

    /// Number of products checked at once
    #[arg(long, value_parser = parse_concurrency)]
    pub concurrency: Option<usize>,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Print the notification payload instead of sending it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Print version
    #[arg(short = 'V', long = "version")]
    pub print_version: bool,
}
