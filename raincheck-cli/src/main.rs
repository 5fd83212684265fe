//! Binary crate for the `raincheck` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Rendering the hourly table
//! - Turning failures into a message and exit code 1

use clap::Parser;
use crossterm::style::Stylize;
use raincheck_core::RaincheckError;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod render;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    render::init_colors();

    let cmd = cli::Cli::parse();
    if let Err(err) = cmd.run().await {
        fail_gracefully(&err);
    }
}

fn fail_gracefully(err: &anyhow::Error) -> ! {
    tracing::debug!(error = ?err, "exiting after failure");
    println!("{}", failure_message(err).dark_red());
    std::process::exit(1);
}

/// API and lookup failures print their fixed message; file problems keep the
/// cause so the user can see which line or key is wrong.
fn failure_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<RaincheckError>() {
        Some(RaincheckError::EnvFile(_)) | None => format!("{err:#}"),
        Some(_) => err.to_string(),
    }
}
