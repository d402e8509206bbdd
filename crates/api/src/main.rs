use std::net::{IpAddr, SocketAddr};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use prodrank_api::config::{ConfigError, ServerConfig};
use prodrank_api::router::build_app_router;
use prodrank_api::state::AppState;

const DEFAULT_LOG_FILTER: &str = "prodrank_api=debug,prodrank_db=debug,tower_http=debug";

/// Failures that stop the server from starting or keep it from running
/// until a shutdown signal.
#[derive(Debug, thiserror::Error)]
enum ServerError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid HOST address '{0}'")]
    Host(String),

    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),

    #[error("server stopped without a shutdown signal: {0}")]
    Exited(String),
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Server failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run() -> Result<(), ServerError> {
    let config = ServerConfig::from_env()?;
    tracing::info!(host = %config.host, port = config.port, "Loaded server configuration");

    let pool = prodrank_db::create_pool(&config.database_url, config.db_max_connections).await?;
    prodrank_db::health_check(&pool).await?;
    prodrank_db::run_migrations(&pool).await?;
    tracing::info!(
        max_connections = config.db_max_connections,
        "Database ready and migrations applied",
    );

    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    let ip: IpAddr = config
        .host
        .parse()
        .map_err(|_| ServerError::Host(config.host.clone()))?;
    let addr = SocketAddr::new(ip, config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    tracing::info!(%addr, "Listening");

    let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(());
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.changed().await;
            })
            .await
    });

    tokio::select! {
        result = &mut server => {
            pool.close().await;
            return Err(unexpected_exit(result));
        }
        () = shutdown_signal() => {}
    }

    // Stop accepting connections, then give in-flight requests a bounded
    // window to finish.
    let _ = shutdown_tx.send(());
    let drain = Duration::from_secs(config.shutdown_timeout_secs);
    match tokio::time::timeout(drain, server).await {
        Ok(Ok(Ok(()))) => tracing::info!("Server stopped accepting connections"),
        Ok(Ok(Err(e))) => tracing::error!(error = %e, "Server error during shutdown"),
        Ok(Err(e)) => tracing::error!(error = %e, "Server task failed"),
        Err(_) => tracing::warn!(
            timeout_secs = config.shutdown_timeout_secs,
            "In-flight requests did not finish before the shutdown timeout",
        ),
    }

    pool.close().await;
    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Error for a server task that finished before shutdown was requested.
fn unexpected_exit(result: Result<std::io::Result<()>, JoinError>) -> ServerError {
    match result {
        Ok(Ok(())) => ServerError::Exited("serve loop returned".to_string()),
        Ok(Err(e)) => ServerError::Serve(e),
        Err(e) => ServerError::Exited(e.to_string()),
    }
}

/// Resolve on SIGINT, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
