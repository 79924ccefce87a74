use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use exo_core::health::{healthz, readyz};
use exo_core::middleware::request_id_layer;

use crate::handlers::{
    auth::{generate_backup_codes, login, signup, verify_backup_code, verify_otp},
    data_loader::{clear_exoplanets, insert_habitable_exoplanets, insert_test_exoplanets},
    exoplanet::{
        create as create_exoplanet, delete as delete_exoplanet, get_all, get_by_id, get_details,
        get_habitable, get_summaries, refresh, update as update_exoplanet,
    },
    test_reset::{reset_all, reset_db, reset_user},
    user::{
        change_password, get_backup_code_status, get_favorites, get_profile, toggle_favorite,
        update_preferences, update_profile,
    },
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/auth/verify-otp", post(verify_otp))
        .route("/api/auth/verify-backup-code", post(verify_backup_code))
        .route("/api/auth/generate-backup-codes", post(generate_backup_codes))
        // Exoplanets
        .route("/api/exoplanets/summary", get(get_summaries))
        .route("/api/exoplanets/habitable", get(get_habitable))
        .route("/api/exoplanets/refresh", post(refresh))
        .route("/api/exoplanets", get(get_all))
        .route("/api/exoplanets", post(create_exoplanet))
        .route("/api/exoplanets/{id}", get(get_by_id))
        .route("/api/exoplanets/{id}", put(update_exoplanet))
        .route("/api/exoplanets/{id}", delete(delete_exoplanet))
        .route("/api/exoplanets/{id}/details", get(get_details))
        // User
        .route("/api/user/favorites", get(get_favorites))
        .route("/api/user/toggle-favorite", post(toggle_favorite))
        .route("/api/user/profile", get(get_profile))
        .route("/api/user/update-profile", put(update_profile))
        .route("/api/user/change-password", post(change_password))
        .route("/api/user/preferences", put(update_preferences))
        .route("/api/user/backup-codes", get(get_backup_code_status))
        // Data loader
        .route(
            "/api/admin/data-loader/insert-test-exoplanets",
            post(insert_test_exoplanets),
        )
        .route(
            "/api/admin/data-loader/insert-habitable-exoplanets",
            post(insert_habitable_exoplanets),
        )
        .route(
            "/api/admin/data-loader/clear-exoplanets",
            delete(clear_exoplanets),
        );

    if state.enable_test_routes {
        router = router
            .route("/api/test/reset-user", delete(reset_user))
            .route("/api/test/reset-db", delete(reset_db))
            .route("/api/test/reset-all", delete(reset_all));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
