use anyhow::Context;
use dinner_decider_api::config::AppConfig;
use dinner_decider_api::middleware::{create_cors_layer, init_tracing, trace_layer};
use dinner_decider_api::routes::{AppState, create_router};
use tower::ServiceBuilder;
use tracing::{error, info};

// Panic hook to catch and log panics
fn setup_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        let message = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_string());
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_default();
        error!(
            message = %message,
            location = %location,
            backtrace = %std::backtrace::Backtrace::capture(),
            "PANIC occurred"
        );
    }));
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;

    init_tracing(&config.logging);
    setup_panic_hook();
    info!(version = env!("CARGO_PKG_VERSION"), "Application starting...");

    let app_state = AppState::from_config(&config)
        .await
        .context("Failed to initialize application state")?;
    let database = app_state.database().cloned();

    let app = create_router(app_state).layer(
        ServiceBuilder::new()
            .layer(trace_layer())
            .layer(create_cors_layer(&config.cors)),
    );

    let (host, port) = config.server.listen_addr();
    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind listener on {}:{}", host, port))?;
    let addr = listener.local_addr().context("Failed to read bound address")?;

    info!("Server listening on {}", addr);
    info!("Health check available at http://{}/health", addr);
    info!("API available at http://{}/api", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    if let Some(pool) = database {
        info!("Closing database connections");
        pool.close().await;
    }

    info!("Server shutdown complete");
    Ok(())
}

// Handle both SIGINT (Ctrl+C) and SIGTERM (Docker stop)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install CTRL+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
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
        _ = ctrl_c => info!("SIGINT received, shutting down gracefully"),
        _ = terminate => info!("SIGTERM received, shutting down gracefully"),
    }
}
