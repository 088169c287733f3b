use std::sync::Arc;

use eyre::WrapErr;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use claimlens_analyst::client::AnalystClient;
use claimlens_server::config::ServerConfig;
use claimlens_server::state::AppState;
use claimlens_session::dispatcher::Dispatcher;
use claimlens_warehouse::access::ClaimData;
use claimlens_warehouse::client::SnowflakeClient;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let config = ServerConfig::from_env()?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!(connection = ?config.connection, bind = %config.bind, "starting claimlens");

    let warehouse = SnowflakeClient::new(config.connection.clone())?;
    warehouse
        .ping()
        .await
        .wrap_err("could not reach the warehouse")?;

    let analyst = AnalystClient::new(config.connection.clone())?;
    let data = Arc::new(ClaimData::new(Arc::new(warehouse)));
    let dispatcher = Dispatcher::new(data, Arc::new(analyst));
    let app = claimlens_server::router(AppState::new(dispatcher));

    let listener = TcpListener::bind(config.bind)
        .await
        .wrap_err_with(|| format!("failed to bind {}", config.bind))?;
    tracing::info!(addr = %config.bind, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to install ctrl-c handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
