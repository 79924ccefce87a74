//! Destructive reset endpoints for end-to-end test runs. Mounted only when
//! `ENABLE_TEST_ROUTES` is set.

use axum::{
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::domain::repository::{ExoplanetRepository, UserRepository};
use crate::domain::types::NewExoplanet;
use crate::error::ExplorerServiceError;
use crate::state::AppState;

// ── DELETE /api/test/reset-user ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResetUserQuery {
    pub email: String,
}

pub async fn reset_user(
    State(state): State<AppState>,
    Query(query): Query<ResetUserQuery>,
) -> Result<StatusCode, ExplorerServiceError> {
    tracing::info!(email = %query.email, "resetting test user");
    state.user_repo().delete_by_email(&query.email).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /api/test/reset-db ────────────────────────────────────────────────

pub async fn reset_db(
    State(state): State<AppState>,
) -> Result<StatusCode, ExplorerServiceError> {
    tracing::info!("resetting database and seeding test exoplanet");
    let repo = state.exoplanet_repo();
    repo.delete_all().await?;
    repo.create(&NewExoplanet {
        name: "Kepler-Test".to_owned(),
        image_url: Some("https://example.com/kepler.png".to_owned()),
        distance: Some(42.0),
        temperature: Some(273.0),
        radius: Some(1.0),
        mass: Some(1.0),
        orbital_period_days: Some(365.0),
        orbital_period_years: Some(1.0),
        ..Default::default()
    })
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /api/test/reset-all ───────────────────────────────────────────────

pub async fn reset_all(
    State(state): State<AppState>,
) -> Result<StatusCode, ExplorerServiceError> {
    tracing::info!("resetting entire database");
    state.exoplanet_repo().delete_all().await?;
    state.user_repo().delete_all().await?;
    Ok(StatusCode::NO_CONTENT)
}
