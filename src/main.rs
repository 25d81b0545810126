use anyhow::Context;
use chat_relay::cli::Args;
use chat_relay::{build_routes, AppState};
use clap::Parser;
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _log_guard = chat_relay::logger::init_logger(args.log_dir.as_deref());

    let config = args.into_config().context("failed to load relay config")?;
    tracing::debug!("Relay config: {:?}", config);

    if config.api_key.is_none() {
        tracing::warn!(
            "{} is not set; chat requests will fail until it is configured",
            config.api_key_env
        );
    }

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port)
        .parse()
        .with_context(|| {
            format!(
                "invalid listen address: {}:{}",
                config.bind_address, config.port
            )
        })?;

    tracing::info!(
        "Relaying to {} with model {}",
        config.upstream_url,
        config.model
    );

    let state = AppState::new(config).context("failed to build upstream client")?;
    let app = build_routes(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to address: {}", addr))?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
