use clap::Parser;
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;
use nearby_relay::config::Config;
use nearby_relay::controller;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let config = Config::parse();
    tracing::info!("Starting nearby relay in {} mode", config.environment);

    controller::serve(&config).await
}
