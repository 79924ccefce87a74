use std::sync::Arc;

use sea_orm::Database;
use tracing::info;

use exo_auth_types::identity::JwtSecret;
use exo_core::tracing::init_tracing;
use exo_explorer::config::ExplorerConfig;
use exo_explorer::infra::archive::HttpArchiveClient;
use exo_explorer::infra::images::ImageCatalog;
use exo_explorer::router::build_router;
use exo_explorer::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = ExplorerConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let images = match config.image_manifest_path.as_deref() {
        Some(path) => match ImageCatalog::load(path) {
            Ok(catalog) => {
                info!(count = catalog.len(), "loaded exoplanet image manifest");
                catalog
            }
            Err(e) => {
                tracing::warn!(error = %e, path, "failed to load image manifest, continuing without");
                ImageCatalog::empty()
            }
        },
        None => ImageCatalog::empty(),
    };

    let archive = HttpArchiveClient::new().expect("failed to build archive client");

    let state = AppState {
        db,
        jwt_secret: JwtSecret(config.jwt_secret),
        jwt_expiration_secs: config.jwt_expiration_secs,
        otp_ttl_minutes: config.otp_ttl_minutes,
        travel_speed_fraction: config.travel_speed_fraction,
        images: Arc::new(images),
        archive,
        enable_test_routes: config.enable_test_routes,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.explorer_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("explorer service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
