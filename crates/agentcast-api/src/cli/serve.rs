//! `agentcast serve`: bind the listener and run the router until a
//! shutdown signal arrives.

use anyhow::{Context, Result};
use console::style;
use tokio_util::sync::CancellationToken;

use crate::http::router::build_router;
use crate::state::AppState;

pub async fn serve(
    state: AppState,
    host: Option<String>,
    port: Option<u16>,
    quiet: bool,
) -> Result<()> {
    let host = host.unwrap_or_else(|| state.config.host.clone());
    let port = port.unwrap_or(state.config.port);
    let addr = format!("{host}:{port}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    if !quiet {
        println!();
        println!(
            "  {} agentcast v{}",
            style("⚡").bold(),
            env!("CARGO_PKG_VERSION")
        );
        println!();
        println!("  HTTP:      {}", style(format!("http://{addr}/api/v1")).cyan());
        println!("  WebSocket: {}", style(format!("ws://{addr}/ws")).cyan());
        println!(
            "  Provider:  {} ({})",
            style(&state.provider_name).bold(),
            state.config.model.model_id
        );
        println!(
            "  Artifacts: {}",
            style(state.artifacts.base_dir().display()).dim()
        );
        println!("  Data:      {}", style(state.data_dir.display()).dim());
        println!();
    }
    tracing::info!(%addr, provider = %state.provider_name, "server listening");

    let shutdown = CancellationToken::new();
    tokio::spawn(watch_signals(shutdown.clone()));

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;

    if !quiet {
        println!("\n  Server stopped.");
    }
    Ok(())
}

/// Cancel `token` on Ctrl+C or SIGTERM.
async fn watch_signals(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("failed to install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
    token.cancel();
}
