#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;

use std::process;

use anyhow::Context;
use serde_json::Value;

use crate::config::{Cli, Command};

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "dpp_cli::startup";
pub const TRACING_TARGET_CONFIG: &str = "dpp_cli::config";
pub const TRACING_TARGET_COMMAND: &str = "dpp_cli::command";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_COMMAND,
            error = %format!("{error:#}"),
            "command failed"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing()?;
    cli.log();

    let broker = cli.create_broker().context("failed to configure broker")?;
    let request = cli.command.args().to_request();

    let output = match &cli.command {
        Command::Connector(_) => {
            let options = broker
                .connector_options(&request)
                .await
                .context("failed to build connector options")?;
            serde_json::to_value(options)?
        }
        Command::Reader(_) => {
            let options = broker
                .reader_options(&request)
                .await
                .context("failed to build reader options")?;
            serde_json::to_value(options.into_map())?
        }
    };

    println!("{}", render(&output, cli.pretty)?);
    Ok(())
}

/// Renders the options as a JSON document.
fn render(output: &Value, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(output)
    } else {
        serde_json::to_string(output)
    }
}
