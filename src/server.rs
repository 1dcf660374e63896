// ABOUTME: HTTP server lifecycle for the Packman API
// ABOUTME: Binds the listener, serves the router and drains in-flight requests on shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::database_plugins::DatabaseProvider;
use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;
use crate::routes;
use std::future::{Future, IntoFuture};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info, warn};

/// Bind the configured address and serve until SIGINT or SIGTERM
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails
pub async fn serve(resources: ServerResources) -> AppResult<()> {
    let addr = resources.config.http.bind_addr();
    let listener = TcpListener::bind(addr).await.map_err(|e| {
        AppError::internal(format!("Failed to bind {addr}")).with_source(e)
    })?;
    info!(%addr, backend = resources.database.backend_info(), "HTTP server listening");

    serve_with_listener(listener, resources, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves
///
/// After `shutdown` resolves, in-flight requests get the configured grace
/// period to finish. The database pool is closed before returning.
///
/// # Errors
///
/// Returns an error if the server fails
pub async fn serve_with_listener<F>(
    listener: TcpListener,
    resources: ServerResources,
    shutdown: F,
) -> AppResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = routes::router(&resources);
    let grace = resources.config.http.shutdown_timeout();
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown.await;
        info!("Shutdown signal received, draining in-flight requests");
        let _ = shutdown_tx.send(true);
    });

    let result = tokio::select! {
        result = server.into_future() => result.map_err(|e| {
            AppError::internal("HTTP server failed").with_source(e)
        }),
        () = async {
            if shutdown_rx.wait_for(|stopping| *stopping).await.is_ok() {
                tokio::time::sleep(grace).await;
            } else {
                std::future::pending::<()>().await;
            }
        } => {
            warn!(grace_secs = grace.as_secs(), "Shutdown grace period elapsed, dropping open connections");
            Ok(())
        }
    };

    resources.database.close().await;
    info!("Database pool closed");
    result
}

/// Resolve on Ctrl+C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {e}");
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
                error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
