mod cli;

use crate::cli::CLI;
use anyhow::Context;
use clap::Parser;
use shorty_cli::{execute, render, telemetry, OutputFormat, RenderOptions};
use shorty_client::{RemoteServiceClient, ServiceConfig};
use std::process::ExitCode;
use std::time::Duration;
use tracing::info;

/// Exit status when the backend does not know the requested id.
const EXIT_NOT_FOUND: u8 = 2;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let config = CLI::parse();

    telemetry::init(config.log_format);

    let format = if config.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    info!(
        base_url = %config.base_url,
        public_url = ?config.public_url,
        timeout_secs = ?config.timeout_secs,
        log_format = %config.log_format,
        "starting shorty client"
    );

    let service_config = match config.timeout_secs {
        Some(secs) => ServiceConfig::builder()
            .base_url(config.base_url)
            .api_key(config.api_key)
            .timeout(Duration::from_secs(secs))
            .build(),
        None => ServiceConfig::builder()
            .base_url(config.base_url)
            .api_key(config.api_key)
            .build(),
    };
    let client = RemoteServiceClient::new(service_config).context("invalid backend configuration")?;
    let public_url = config
        .public_url
        .unwrap_or_else(|| client.base_url().to_string());

    let qr = config.command.wants_qr();
    let action = config.command.into_action();
    let outcome = execute(&client, action.clone())
        .await
        .with_context(|| format!("{action} failed"))?;

    let options = RenderOptions {
        format,
        public_url: &public_url,
        qr,
    };
    let rendered = render(&outcome, &options).context("failed to render output")?;
    println!("{rendered}");

    if outcome.is_not_found() {
        return Ok(ExitCode::from(EXIT_NOT_FOUND));
    }
    Ok(ExitCode::SUCCESS)
}
