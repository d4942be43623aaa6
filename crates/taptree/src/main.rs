//! taptree: TAP subtest reports to JSON trees of runnable tests
//!
//! This binary reads a TAP report from stdin (or `--input`), resolves each
//! subtest against the test sources, and prints the test trees as JSON.

use std::process::ExitCode;

use clap::Parser;
use taptree::config::Config;
use taptree::translate;
use tracing::{error, info};

fn main() -> ExitCode {
    let config = Config::parse();

    // Logs go to stderr so stdout carries only JSON
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return ExitCode::FAILURE;
    }

    match translate::run(&config) {
        Ok(stats) => {
            info!(
                bytes = stats.bytes,
                roots = stats.roots,
                subtests = stats.subtests,
                "Wrote test trees"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %format!("{e:#}"), "Translation failed");
            ExitCode::FAILURE
        }
    }
}
