use std::future::Future;

use axum::Router;
use configs::ServerConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Router wired to the given state, with the default CORS policy.
pub fn app(state: AppState) -> Router {
    routes::build_router(state, build_cors())
}

/// Bind the listen socket. This is the one failure that stops the process.
pub async fn bind(settings: &ServerConfig) -> Result<TcpListener, StartupError> {
    if settings.port == 0 {
        return Err(StartupError::InvalidConfig("port must be in 1..=65535".into()));
    }
    let addr = format!("{}:{}", settings.host, settings.port);
    TcpListener::bind((settings.host.as_str(), settings.port))
        .await
        .map_err(|source| StartupError::Bind { addr, source })
}

/// Serve `app` on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(StartupError::Serve)
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}

/// Public entry: build the store and router, bind, and serve until a shutdown signal
pub async fn run(settings: ServerConfig) -> anyhow::Result<()> {
    let state = AppState::in_memory();
    let router = app(state);

    let listener = bind(&settings).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "contacts server listening");
    serve(listener, router, shutdown_signal()).await?;
    info!("contacts server stopped");
    Ok(())
}
