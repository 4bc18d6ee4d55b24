// src/bin/scrub_server.rs

//! # Scrub Server
//!
//! HTTP front end. `POST /upload` takes a multipart form with the CSV `file`
//! and the cleaning parameters, and answers with the cleaned table as JSON.

use anyhow::Context;
use clap::Parser;
use tracing::info;
use CsvScrubber::config::server::Args;
use CsvScrubber::config::{load_service_config, ServiceConfig};
use CsvScrubber::server::run_server;
use CsvScrubber::utils::logging::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_service_config(path)
            .with_context(|| format!("Loading service config from {}", path.display()))?,
        None => ServiceConfig::default(),
    };
    config.apply_args(&args);
    config.validate()?;

    if args.validate_config {
        println!("Configuration is valid.");
        return Ok(());
    }

    let _guard = init_tracing(config.log_format, config.log_dir.as_deref())?;
    info!(bind_addr = %config.bind_addr, "Starting scrub server");

    run_server(config).await?;
    Ok(())
}
