mod adapters;
mod application;
mod domain;
mod services;

use std::sync::Arc;

use adapters::{
    repositories::{
        MemorySessionRepository, PgFileRepository, PgFolderRepository, PgShareLinkRepository,
        PgUserRepository, RedisSessionRepository,
    },
    router::build_router,
    state::AppState,
};
use application::{
    repositories::{
        file_repository::FileRepository, folder_repository::FolderRepository,
        session_repository::SessionRepository, share_link_repository::ShareLinkRepository,
        user_repository::UserRepository,
    },
    services::{CredentialService, FileService, FolderService, ShareService},
};
use axum::http::{HeaderValue, Method};
use domain::config::AppConfig;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("drive_service=info,tower_http=info")),
        )
        .init();

    // aws-sdk-s3 and sqlx share the process-wide rustls provider
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        tracing::error!("Invalid configuration: {}", e);
        std::process::exit(1);
    });

    tracing::info!(
        "Starting drive-service with {:?} storage on port {}",
        config.provider,
        config.port
    );

    // Configure CORS. Cookies need credentials, which rule out wildcard origins.
    let cors = if config.cors_allowed_origins.is_empty() {
        CorsLayer::new().allow_origin(AllowOrigin::mirror_request())
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .map(|s| s.parse().expect("Invalid CORS origin"))
            .collect();
        CorsLayer::new().allow_origin(origins)
    }
    .allow_methods([
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ])
    .allow_headers(AllowHeaders::mirror_request())
    .allow_credentials(true);

    tracing::info!("Connecting to databases...");
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&config.database_url)
        .await
        .expect("ERROR: Failed to connect to PostgreSQL database. Check DATABASE_URL and network connectivity.");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("ERROR: Failed to apply database migrations");

    let session_repo: Arc<dyn SessionRepository> = match &config.redis_url {
        Some(redis_url) => {
            let redis_client = redis::Client::open(redis_url.as_str())
                .expect("ERROR: Failed to create Redis client. Check REDIS_URL format.");
            let manager = redis::aio::ConnectionManager::new(redis_client)
                .await
                .expect("ERROR: Failed to connect to Redis. Check REDIS_URL and network connectivity.");
            tracing::info!("Session revocation backed by Redis");
            Arc::new(RedisSessionRepository::new(manager))
        }
        None => {
            tracing::warn!("REDIS_URL not set; logged-out sessions are tracked in memory only");
            Arc::new(MemorySessionRepository::new())
        }
    };
    tracing::info!("Database connections established");

    let storage_service = services::create_storage_service(&config.provider, &config.storage)
        .expect("Failed to create storage service");

    // Initialize repositories
    let user_repo = Arc::new(PgUserRepository::new(pool.clone())) as Arc<dyn UserRepository>;
    let folder_repo = Arc::new(PgFolderRepository::new(pool.clone())) as Arc<dyn FolderRepository>;
    let file_repo = Arc::new(PgFileRepository::new(pool.clone())) as Arc<dyn FileRepository>;
    let share_link_repo =
        Arc::new(PgShareLinkRepository::new(pool)) as Arc<dyn ShareLinkRepository>;

    let app_state = AppState {
        credentials: Arc::new(CredentialService::new(
            user_repo,
            session_repo,
            &config.jwt_secret,
        )),
        folders: Arc::new(FolderService::new(
            folder_repo.clone(),
            file_repo.clone(),
            storage_service.clone(),
        )),
        files: Arc::new(FileService::new(
            file_repo.clone(),
            folder_repo.clone(),
            storage_service,
            config.limits,
        )),
        shares: Arc::new(ShareService::new(
            share_link_repo,
            folder_repo,
            file_repo,
            config.frontend_url.clone(),
        )),
    };

    let router = build_router(app_state, cors);

    // Start the server
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server listening on 0.0.0.0:{}", config.port);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}
