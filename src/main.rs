use axum::Router;
use product_service::{
    app::product::{MemoryProductStore, PgProductStore},
    build_router,
    core::error::BootError,
    infrastructure::{
        config::{AppConfig, StorageKind},
        database::DatabaseManager,
        logger::Logger,
    },
};
use tokio::{net::TcpListener, signal};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), BootError> {
    Logger::init("info");

    run().await.map_err(|e| {
        error!("Startup failed: {}", e);
        e
    })
}

async fn run() -> Result<(), BootError> {
    let config = AppConfig::from_env()?;

    match config.storage {
        StorageKind::Postgres => {
            let db = DatabaseManager::connect(&config.database).await?;
            db.init_schema().await?;

            let app = build_router(PgProductStore::new(db.get_pool().clone()));
            let served = serve(&config.server.bind_addr(), app).await;

            db.close().await;
            served?;
        }
        StorageKind::Memory => {
            warn!("Using in-memory storage; data is lost on exit");
            serve(&config.server.bind_addr(), build_router(MemoryProductStore::new())).await?;
        }
    }

    info!("Server stopped");
    Ok(())
}

async fn serve(addr: &str, app: Router) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Product service listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
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

    info!("Shutdown signal received");
}
