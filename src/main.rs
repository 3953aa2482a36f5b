//! emuwatch - Android emulator version monitor CLI tool
//!
//! Checks NoxPlayer, MEmu, LDPlayer9, BlueStacks5 and MuMuPlayer for new
//! releases and reports the result to a chat webhook.

use clap::Parser;
use emuwatch::cli::CliArgs;
use emuwatch::config::MonitorConfig;
use emuwatch::notify::Delivery;
use emuwatch::orchestrator::Orchestrator;
use emuwatch::output::{create_formatter, OutputConfig};
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Handle version flag
    if args.print_version {
        println!("emuwatch {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    init_logging(args.verbose);
    if args.no_color {
        colored::control::set_override(false);
    }

    // Run the main logic; only configuration problems fail the process
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr so stdout carries only the report
fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let config = MonitorConfig::from_cli(&args)?;

    if args.verbose {
        eprintln!("emuwatch v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Baseline: {}", config.baseline_path.display());
        if args.dry_run {
            eprintln!("Mode: dry-run");
        }
    }

    let show_progress = !args.quiet && !args.json && io::stdout().is_terminal();
    let orchestrator = Orchestrator::new(config)?.with_progress(show_progress);
    let outcome = orchestrator.run().await?;

    // Create output formatter based on CLI options
    let output_config = OutputConfig::from_cli(args.json, args.verbose, args.quiet, args.no_color);
    let formatter = create_formatter(output_config);

    let mut stdout = io::stdout().lock();
    if args.dry_run {
        writeln!(stdout, "{}", outcome.card.to_json()?)?;
        stdout.flush()?;
        return Ok(ExitCode::SUCCESS);
    }
    formatter.format(&outcome, &mut stdout)?;
    stdout.flush()?;
    drop(stdout);

    // Delivery problems are logged; the run itself still succeeded
    match orchestrator.notify(&outcome.card).await {
        Ok(Delivery::Sent) => {
            info!("status card delivered");
            if !args.quiet && !args.json {
                println!("✅ Notification sent");
            }
        }
        Ok(Delivery::Skipped) => {
            if args.verbose {
                eprintln!("No webhook configured; notification skipped");
            }
        }
        Err(e) => {
            error!("{}", e);
            if !args.quiet && !args.json {
                println!("❌ Notification failed");
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
