use std::path::Path;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use backend_application::commands::bulk_load_commands;
use backend_application::AppState;
use backend_infrastructure::LogDirectorySource;
use backend_interfaces_http::build_router;

use crate::context::AppContext;

fn build_router_with_layers(state: AppState) -> Router {
    build_router(state.clone())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(
            usize::try_from(state.config.max_body_bytes).unwrap_or(usize::MAX),
        ))
        .layer(TimeoutLayer::new(std::time::Duration::from_secs(
            state.config.request_timeout_seconds,
        )))
        .layer(TraceLayer::new_for_http())
}

/// Ingests every log under `data_dir` before the server starts accepting
/// requests. Nothing here stops startup.
async fn preload_data_dir(state: &AppState, data_dir: &Path) {
    match tokio::fs::metadata(data_dir).await {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            warn!(data_dir = %data_dir.display(), "data_dir is not a directory, skipping preload");
            return;
        }
        Err(err) => {
            warn!(data_dir = %data_dir.display(), "data_dir unavailable, skipping preload: {}", err);
            return;
        }
    }

    let source = LogDirectorySource::new();
    match bulk_load_commands::load_combat_logs(state, &source, data_dir).await {
        Ok(summary) => {
            for (path, match_id) in &summary.loaded {
                info!(path = %path.display(), match_id = %match_id, "preloaded combat log");
            }
            for path in &summary.failed {
                warn!(path = %path.display(), "combat log not preloaded");
            }
        }
        Err(err) => error!(data_dir = %data_dir.display(), "preload failed: {}", err),
    }
}

pub async fn run_standalone() -> Result<()> {
    let context = AppContext::new().await?;
    let state = context.state;

    if let Some(data_dir) = state.config.data_dir.clone() {
        preload_data_dir(&state, Path::new(&data_dir)).await;
    }

    let app = build_router_with_layers(state.clone());
    let addr: std::net::SocketAddr = state.config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("failed to listen for ctrl-c: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!("failed to install SIGTERM handler: {}", err);
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
    info!("shutdown signal received");
}
