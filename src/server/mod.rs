//! Quotebook HTTP server
//!
//! Thin axum layer over [`QuoteService`]: routing, request parsing, response
//! encoding and process lifecycle. No storage logic lives here.

pub mod handlers;
pub mod middleware;
pub mod routes;

use axum::{extract::Extension, Router};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use tracing::{error, info, warn};

use crate::config::{ServerSettings, Settings};
use crate::service::QuoteService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: QuoteService,
    pub started_at: Instant,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("stats", &self.service.stats())
            .finish()
    }
}

/// Build the application router with all layers applied
pub fn build_router(service: QuoteService, config: &ServerSettings) -> Router {
    crate::metrics::init_metrics();

    let state = AppState {
        service,
        started_at: Instant::now(),
    };

    let app = Router::new()
        .merge(routes::quote_routes())
        .merge(routes::health_routes())
        .layer(Extension(Arc::new(state)))
        .layer(axum::middleware::from_fn(middleware::log_request))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new());

    if config.enable_cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Bind to the configured address and serve until SIGINT/SIGTERM
pub async fn start_server(settings: &Settings, service: QuoteService) -> anyhow::Result<()> {
    let addr = settings.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    info!("Health: http://{}/health", addr);

    serve(listener, &settings.server, service, shutdown_signal()).await
}

/// Serve on `listener` until `shutdown` resolves, then drain in-flight
/// requests for at most `shutdown_timeout_secs`
pub async fn serve<F>(
    listener: TcpListener,
    config: &ServerSettings,
    service: QuoteService,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(service, config);
    let grace = Duration::from_secs(config.shutdown_timeout_secs);

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown.await;
        let _ = stop_tx.send(());
    });
    let mut server = tokio::spawn(async move { server.await });

    tokio::select! {
        result = &mut server => {
            return result?.map_err(|e| {
                error!(error = %e, "Server error");
                anyhow::anyhow!("Server failed: {}", e)
            });
        }
        _ = stop_rx => {
            info!(grace_secs = grace.as_secs(), "Shutting down, draining connections");
        }
    }

    match tokio::time::timeout(grace, &mut server).await {
        Ok(result) => {
            result??;
            info!("Server stopped");
        }
        Err(_) => {
            warn!("Graceful shutdown timed out, aborting open connections");
            server.abort();
        }
    }
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
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
                error!(error = %e, "Failed to listen for SIGTERM");
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
    info!("Received shutdown signal");
}
