use axum::{Json, extract::State, http::StatusCode};
use rand::RngExt;
use serde::Serialize;

use exo_auth_types::identity::Identity;

use crate::domain::repository::ExoplanetRepository;
use crate::domain::types::NewExoplanet;
use crate::error::ExplorerServiceError;
use crate::state::AppState;

/// Sample of well-known exoplanets inside the habitable temperature band.
const HABITABLE_NAMES: [&str; 12] = [
    "Kepler-186f",
    "Kepler-442b",
    "Kepler-62f",
    "Kepler-1649c",
    "TRAPPIST-1e",
    "TRAPPIST-1f",
    "Proxima Centauri b",
    "TOI-700d",
    "Teegarden's Star b",
    "K2-18b",
    "WASP-12b",
    "Wolf 1061c",
];

#[derive(Serialize)]
pub struct InsertOutcome {
    pub inserted: usize,
}

// ── POST /api/admin/data-loader/insert-test-exoplanets ───────────────────────

pub async fn insert_test_exoplanets(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<InsertOutcome>), ExplorerServiceError> {
    if !identity.is_admin {
        return Err(ExplorerServiceError::Forbidden);
    }
    tracing::info!("inserting 500 test exoplanets");

    // ThreadRng is !Send, so generate every record before the first await.
    let entries: Vec<NewExoplanet> = {
        let mut rng = rand::rng();
        (1..=500)
            .map(|i| {
                let orbital_period_days = 1.0 + rng.random_range(0.0..1000.0f32);
                NewExoplanet {
                    name: format!("ExoTest-{i}"),
                    image_url: Some(format!("https://picsum.photos/seed/exotest{i}/200")),
                    distance: Some(rng.random_range(0.0..5000.0)),
                    temperature: Some(50.0 + rng.random_range(0.0..450.0)),
                    year_discovered: Some(1995 + rng.random_range(0..28)),
                    radius: Some(0.5 + rng.random_range(0.0..10.0)),
                    mass: Some(0.1 + rng.random_range(0.0..20.0)),
                    semi_major_axis: Some(0.05 + rng.random_range(0.0..50.0)),
                    eccentricity: Some(rng.random_range(0.0..0.5)),
                    orbital_period_days: Some(orbital_period_days),
                    orbital_period_years: Some(orbital_period_days / 365.0),
                }
            })
            .collect()
    };

    let inserted = insert_entries(&state.exoplanet_repo(), entries).await;
    Ok((StatusCode::CREATED, Json(InsertOutcome { inserted })))
}

// ── POST /api/admin/data-loader/insert-habitable-exoplanets ──────────────────

pub async fn insert_habitable_exoplanets(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<InsertOutcome>), ExplorerServiceError> {
    if !identity.is_admin {
        return Err(ExplorerServiceError::Forbidden);
    }
    tracing::info!("inserting sample habitable exoplanets");

    let entries: Vec<NewExoplanet> = {
        let mut rng = rand::rng();
        HABITABLE_NAMES
            .iter()
            .map(|name| {
                let seed: String = name
                    .chars()
                    .filter(|c| !matches!(c, '\'' | ' '))
                    .collect();
                let orbital_period_days = 100.0 + rng.random_range(0.0..400.0f32);
                NewExoplanet {
                    name: (*name).to_owned(),
                    image_url: Some(format!("https://picsum.photos/seed/{seed}/200")),
                    distance: Some(1.0 + rng.random_range(0.0..200.0)),
                    temperature: Some(180.0 + rng.random_range(0.0..130.0)),
                    year_discovered: Some(2000 + rng.random_range(0..23)),
                    radius: Some(0.5 + rng.random_range(0.0..2.0)),
                    mass: Some(0.5 + rng.random_range(0.0..3.0)),
                    semi_major_axis: Some(0.5 + rng.random_range(0.0..2.0)),
                    eccentricity: Some(rng.random_range(0.0..0.2)),
                    orbital_period_days: Some(orbital_period_days),
                    orbital_period_years: Some(orbital_period_days / 365.0),
                }
            })
            .collect()
    };

    let inserted = insert_entries(&state.exoplanet_repo(), entries).await;
    Ok((StatusCode::CREATED, Json(InsertOutcome { inserted })))
}

// ── DELETE /api/admin/data-loader/clear-exoplanets ───────────────────────────

pub async fn clear_exoplanets(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<StatusCode, ExplorerServiceError> {
    if !identity.is_admin {
        return Err(ExplorerServiceError::Forbidden);
    }
    tracing::info!("clearing all exoplanet data");
    state.exoplanet_repo().delete_all().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Insert a batch; a duplicate from an earlier run is skipped, not fatal.
async fn insert_entries<R: ExoplanetRepository>(repo: &R, entries: Vec<NewExoplanet>) -> usize {
    let mut inserted = 0;
    for entry in entries {
        match repo.create(&entry).await {
            Ok(_) => inserted += 1,
            Err(ExplorerServiceError::DuplicateExoplanet) => {
                tracing::warn!(name = %entry.name, "exoplanet already present, skipping");
            }
            Err(e) => {
                tracing::warn!(name = %entry.name, error = %e, "failed to insert exoplanet");
            }
        }
    }
    inserted
}
