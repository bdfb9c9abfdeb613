mod api_doc;
mod app;
mod config;
mod error;
mod handlers;
mod routes;
mod state;
mod upstream;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use anyhow::Context;
use config::Config;
use state::AppState;
use tokio::net::TcpListener;
use upstream::UpstreamClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    tracing::info!("orders-proxy starting");

    let config = Config::from_env()?;
    config.log_startup();

    let upstream = UpstreamClient::from_config(&config)?;
    let bind_addr = config.bind_addr();
    let state = AppState {
        upstream,
        config: Arc::new(config),
    };
    let app = app::build_router(state)?;

    let listener = match TcpListener::bind(&bind_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("Server failed to start on {}: {}", bind_addr, err);
            return Err(err).with_context(|| format!("Failed to bind {}", bind_addr));
        }
    };

    tracing::info!("Starting server on {}", bind_addr);

    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}
