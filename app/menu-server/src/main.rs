use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info};

use menu_api::{build_router, listeners::spawn_route_refresher, AppState};
use menu_core::repositories::MenuItemRepository;
use menu_infrastructure::database::connection;
use menu_infrastructure::{InMemoryMenuItemRepository, PgMenuItemRepository};
use menu_shared::config::{AppConfig, StorageBackend};
use menu_shared::AppError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (.env included)
    let config = AppConfig::load().map_err(AppError::from)?;

    // Initialize telemetry; the guard flushes file logs on exit
    let _log_guard = menu_shared::telemetry::init_telemetry(&config.logging);

    info!("{} starting ({})...", config.app.name, config.app.env);

    // Connect storage
    let repo: Arc<dyn MenuItemRepository> = match config.database.backend {
        StorageBackend::Postgres => {
            if config.database.url.is_empty() {
                error!("database.url is required for the postgres backend");
                return Err(AppError::InternalError("missing database.url".into()).into());
            }

            info!("Connecting to database...");
            let pool = connection::create_pool(&config.database).await?;
            info!("Database connection established.");

            if config.database.run_migrations {
                connection::run_migrations(&pool).await?;
                info!("Database migrations applied.");
            }
            Arc::new(PgMenuItemRepository::new(pool))
        }
        StorageBackend::Memory => {
            if config.is_production() {
                error!("In-memory storage is not durable; refusing to use it in production");
                return Err(AppError::InternalError("memory backend in production".into()).into());
            }
            info!("Using in-memory storage.");
            Arc::new(InMemoryMenuItemRepository::new())
        }
    };

    // Create App State
    let state = AppState::new(repo, config.clone());

    // Bootstrap the module route table
    state.routes.refresh(&*state.menus).await?;
    let refresher = spawn_route_refresher(state.clone());

    // Build router
    let app = build_router(state);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    refresher.abort();
    info!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received.");
}
