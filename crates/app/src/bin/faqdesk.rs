// FAQDesk command line client

use clap::Parser;
use tracing::error;

use faqdesk_app::{run, Cli};
use faqdesk_client::ApiClient;
use faqdesk_common::ClientConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = ClientConfig::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    tracing::debug!(api_base_url = %config.api_base_url, "Configuration loaded");

    let api = ApiClient::from_config(&config);
    let output = run(cli.command, &api, &config).await?;
    println!("{}", output);

    Ok(())
}
