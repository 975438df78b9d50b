use adyen_gateway::api::{self, AppState};
use adyen_gateway::config::Config;
use adyen_gateway::payments::providers::AdyenClient;
use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json") {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env()?;

    tracing::info!("Starting Adyen gateway");
    tracing::info!("Environment: {}", config.server.environment);
    tracing::info!("Adyen environment: {}", config.adyen.environment.as_str());
    tracing::info!("Merchant account: {}", config.adyen.merchant_account);

    let adyen = AdyenClient::new(config.adyen.clone()).context("failed to create Adyen client")?;

    let host: std::net::IpAddr = config
        .server
        .host
        .parse()
        .context("server host must be an IP address")?;
    let addr = SocketAddr::from((host, config.server.port));

    let app = api::router(AppState {
        config,
        adyen: Arc::new(adyen),
    });

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
