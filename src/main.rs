use std::sync::Arc;

use brewsource_mcp::{
    build_app, build_server,
    config::{Config, Transport},
    domain::catalog::InMemoryCatalog,
    logging,
    transport::serve_stdio,
    AppState,
};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    logging::init_logging(&config.log_level);

    let catalog = Arc::new(InMemoryCatalog::seeded());
    let server = Arc::new(build_server(catalog));
    let shutdown = CancellationToken::new();

    tokio::spawn(cancel_on_signal(shutdown.clone()));

    match config.transport {
        Transport::Stdio => {
            info!(transport = %config.transport, "server starting");
            serve_stdio(server, shutdown).await?;
        }
        Transport::WebSocket => {
            let bind_socket = config.bind_socket()?;
            let app = build_app(AppState::new(server, shutdown.clone()));
            let listener = tokio::net::TcpListener::bind(bind_socket).await?;

            info!(
                transport = %config.transport,
                bind_addr = %config.bind_addr,
                bind_port = config.bind_port,
                "server starting"
            );

            axum::serve(listener, app.into_make_service())
                .with_graceful_shutdown(async move { shutdown.cancelled().await })
                .await?;
        }
    }

    info!("server stopped");
    Ok(())
}

async fn cancel_on_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for ctrl-c");
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
                warn!(error = %err, "failed to listen for SIGTERM");
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
    shutdown.cancel();
}
