use api_server::AppState;
use application::FilmrateApp;
use config::{Config, StorageBackend};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str =
    "filmrate=info,api_server=debug,domain=info,infrastructure=info,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    info!("🎬 Starting Filmrate API Server");

    // Load configuration from environment
    let config = Config::from_env()?;
    info!("💾 Storage backend: {:?}", config.storage_backend);

    let app = match config.storage_backend {
        StorageBackend::Sqlite => {
            info!("💾 Using database: {}", config.database_path);
            FilmrateApp::new(&config.database_path)?
        }
        StorageBackend::Memory => FilmrateApp::in_memory(),
    };
    let state = AppState::new(Arc::new(app), config.popular_default_count);

    // Run the server
    let bind_address = config.api_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("🌐 API Server listening on http://{}", bind_address);
    info!("📖 API Documentation:");
    info!("   /users, /users/:id           - User CRUD");
    info!("   /users/:id/friends/...       - Friendships and common friends");
    info!("   /films, /films/:id           - Film CRUD");
    info!("   /films/:id/like/:user_id     - Likes");
    info!("   GET /films/popular?count=N   - Most liked films");
    info!("   GET /genres, /mpa            - Reference data");
    info!("   GET /health                  - Health check");

    axum::serve(listener, api_server::router(state)).await?;

    Ok(())
}
