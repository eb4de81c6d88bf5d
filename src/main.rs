use std::error::Error;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vlr_match_api::config::Cli;
use vlr_match_api::server::{self, AppState, ResponseCache};
use vlr_match_api::{HttpFetcher, VlrClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let cli = Cli::parse();

    let client = VlrClient::with_fetcher(HttpFetcher::new()?, cli.base_url.as_str());
    let cache = ResponseCache::new(cli.cache_capacity);
    let app = server::router(AppState::new(client, cache, cli.cache_ttl()));

    let addr = cli.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, base_url = %cli.base_url, ttl = cli.cache_ttl, "serving match API");
    axum::serve(listener, app).await?;
    Ok(())
}
