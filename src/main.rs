//! pixelift - an in-memory photo upscaling service
//!
//! This is the main entry point for the pixelift server.

use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use pixelift::handlers::router;
use pixelift::{init_tracing, AppState, Config, PixeliftError, Result};

fn main() -> Result<()> {
    let config = Config::load()?;

    init_tracing(&config.log_level);

    // Validate configuration
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    if let Some(workers) = config.server.workers {
        builder.worker_threads(workers);
    }
    let runtime = builder.enable_all().build().map_err(|e| PixeliftError::Server {
        message: format!("Failed to build runtime: {}", e),
    })?;

    runtime.block_on(serve(config))
}

async fn serve(config: Config) -> Result<()> {
    info!("Starting pixelift v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::new_shared(config.clone())?;
    state.store.ensure_dir().map_err(|e| {
        error!("Failed to prepare temp directory: {}", e);
        e
    })?;

    info!(
        scale = state.defaults.scale.get(),
        technique = %state.defaults.technique,
        persist = state.store.is_persistent(),
        temp_dir = %state.store.dir().display(),
        "Upscaling defaults loaded"
    );

    let app = router(state);

    // Create the server address
    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .map_err(|e| PixeliftError::Config {
                message: format!("Invalid host address: {}", e),
            })?,
        config.server.port,
    ));

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| PixeliftError::Server {
            message: format!("Failed to bind to address: {}", e),
        })?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| PixeliftError::Server {
            message: format!("Server error: {}", e),
        })?;

    info!("Server has been gracefully shut down");
    Ok(())
}

/// Wait for a shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
