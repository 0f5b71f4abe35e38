use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::http::StatusCode;
use tokio::sync::oneshot;
use tower_http::timeout::{RequestBodyTimeoutLayer, TimeoutLayer};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::ServerConfig;
use crate::service::WeatherService;

/// Router with the HTTP timeouts from `config` applied
pub fn app(service: Arc<WeatherService>, config: &ServerConfig) -> Router {
    api::router(service)
        .layer(RequestBodyTimeoutLayer::new(config.read_timeout()))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.write_timeout(),
        ))
        .layer(TraceLayer::new_for_http())
}

/// Serve until SIGINT/SIGTERM, then drain for at most the shutdown timeout
pub async fn run(service: Arc<WeatherService>, config: &ServerConfig) -> Result<()> {
    let app = app(service, config);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Server starting on port {}", config.port);

    let (drain_tx, drain_rx) = oneshot::channel::<()>();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = drain_rx.await;
    });
    let mut server = tokio::spawn(async move { server.await });

    tokio::select! {
        joined = &mut server => {
            joined.context("Server task panicked")?.context("Server failed")?;
            return Ok(());
        }
        () = shutdown_signal() => {}
    }

    tracing::info!("Shutting down server...");
    let _ = drain_tx.send(());

    match tokio::time::timeout(config.shutdown_timeout(), server).await {
        Ok(joined) => {
            joined.context("Server task panicked")?.context("Server failed")?;
            tracing::info!("Server exited");
        }
        Err(_) => {
            tracing::warn!(
                "Server forced to shutdown after {}s drain",
                config.shutdown_timeout_seconds
            );
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
