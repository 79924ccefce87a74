use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use exo_auth_types::identity::Identity;
use exo_domain::enrich::Enrichment;
use exo_domain::exoplanet::{ExoplanetFilter, ExoplanetSortBy};
use exo_domain::pagination::{Page, PageRequest};

use crate::domain::types::{Exoplanet, ExoplanetSummary, NewExoplanet};
use crate::error::ExplorerServiceError;
use crate::state::AppState;
use crate::usecase::exoplanet::{
    CreateExoplanetUseCase, DeleteExoplanetUseCase, GetAllExoplanetsUseCase,
    GetExoplanetDetailsUseCase, GetExoplanetSummariesUseCase, GetExoplanetUseCase,
    GetHabitableExoplanetsUseCase, UpdateExoplanetUseCase,
};
use crate::usecase::refresh::RefreshExoplanetDataUseCase;

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ExoplanetResponse {
    pub id: i32,
    pub name: String,
    pub image_url: Option<String>,
    pub distance: Option<f32>,
    pub temperature: Option<f32>,
    pub year_discovered: Option<i32>,
    pub radius: Option<f32>,
    pub mass: Option<f32>,
    pub semi_major_axis: Option<f32>,
    pub eccentricity: Option<f32>,
    pub orbital_period_days: Option<f32>,
    pub orbital_period_years: Option<f32>,
    #[serde(serialize_with = "exo_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "exo_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Exoplanet> for ExoplanetResponse {
    fn from(exo: Exoplanet) -> Self {
        Self {
            id: exo.id,
            name: exo.name,
            image_url: exo.image_url,
            distance: exo.distance,
            temperature: exo.temperature,
            year_discovered: exo.year_discovered,
            radius: exo.radius,
            mass: exo.mass,
            semi_major_axis: exo.semi_major_axis,
            eccentricity: exo.eccentricity,
            orbital_period_days: exo.orbital_period_days,
            orbital_period_years: exo.orbital_period_years,
            created_at: exo.created_at,
            updated_at: exo.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct ExoplanetSummaryResponse {
    pub id: i32,
    pub name: String,
    pub image_url: Option<String>,
}

impl From<ExoplanetSummary> for ExoplanetSummaryResponse {
    fn from(summary: ExoplanetSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            image_url: summary.image_url,
        }
    }
}

#[derive(Serialize)]
pub struct ExoplanetDetailsResponse {
    #[serde(flatten)]
    pub exoplanet: ExoplanetResponse,
    #[serde(flatten)]
    pub enrichment: Enrichment,
}

impl From<(Exoplanet, Enrichment)> for ExoplanetDetailsResponse {
    fn from((exo, enrichment): (Exoplanet, Enrichment)) -> Self {
        Self {
            exoplanet: exo.into(),
            enrichment,
        }
    }
}

// ── GET /api/exoplanets/summary ──────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct SummaryQuery {
    pub name: Option<String>,
    pub min_temp: Option<f32>,
    pub max_temp: Option<f32>,
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
    pub sort_by: Option<ExoplanetSortBy>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn get_summaries(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Page<ExoplanetSummaryResponse>>, ExplorerServiceError> {
    let query: SummaryQuery = raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| ExplorerServiceError::MissingData)?
        .unwrap_or_default();

    let filter = ExoplanetFilter {
        name: query.name,
        min_temp: query.min_temp,
        max_temp: query.max_temp,
        min_distance: query.min_distance,
        max_distance: query.max_distance,
        min_year: query.min_year,
        max_year: query.max_year,
    };
    let sort_by = query.sort_by.unwrap_or_default();
    let page = PageRequest {
        per_page: query.per_page.unwrap_or(10),
        page: query.page.unwrap_or(1),
    };

    let usecase = GetExoplanetSummariesUseCase {
        repo: state.exoplanet_repo(),
    };
    let result = usecase.execute(&filter, sort_by, page).await?;
    let items = result
        .items
        .into_iter()
        .map(ExoplanetSummaryResponse::from)
        .collect();
    Ok(Json(Page {
        items,
        total: result.total,
        total_pages: result.total_pages,
        page: result.page,
        per_page: result.per_page,
    }))
}

// ── GET /api/exoplanets ──────────────────────────────────────────────────────

pub async fn get_all(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExoplanetResponse>>, ExplorerServiceError> {
    let usecase = GetAllExoplanetsUseCase {
        repo: state.exoplanet_repo(),
    };
    let exoplanets = usecase.execute().await?;
    Ok(Json(
        exoplanets.into_iter().map(ExoplanetResponse::from).collect(),
    ))
}

// ── GET /api/exoplanets/{id} ─────────────────────────────────────────────────

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ExoplanetResponse>, ExplorerServiceError> {
    let usecase = GetExoplanetUseCase {
        repo: state.exoplanet_repo(),
    };
    let exo = usecase.execute(id).await?;
    Ok(Json(exo.into()))
}

// ── GET /api/exoplanets/{id}/details ─────────────────────────────────────────

pub async fn get_details(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ExoplanetDetailsResponse>, ExplorerServiceError> {
    let usecase = GetExoplanetDetailsUseCase {
        repo: state.exoplanet_repo(),
        speed_fraction: state.travel_speed_fraction,
    };
    let detailed = usecase.execute(id).await?;
    Ok(Json(detailed.into()))
}

// ── GET /api/exoplanets/habitable ────────────────────────────────────────────

pub async fn get_habitable(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExoplanetDetailsResponse>>, ExplorerServiceError> {
    let usecase = GetHabitableExoplanetsUseCase {
        repo: state.exoplanet_repo(),
        speed_fraction: state.travel_speed_fraction,
    };
    let exoplanets = usecase.execute().await?;
    Ok(Json(
        exoplanets
            .into_iter()
            .map(ExoplanetDetailsResponse::from)
            .collect(),
    ))
}

// ── POST /api/exoplanets (admin) ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ExoplanetRequest {
    pub name: String,
    pub image_url: Option<String>,
    pub distance: Option<f32>,
    pub temperature: Option<f32>,
    pub year_discovered: Option<i32>,
    pub radius: Option<f32>,
    pub mass: Option<f32>,
    pub semi_major_axis: Option<f32>,
    pub eccentricity: Option<f32>,
    pub orbital_period_days: Option<f32>,
    pub orbital_period_years: Option<f32>,
}

impl From<ExoplanetRequest> for NewExoplanet {
    fn from(body: ExoplanetRequest) -> Self {
        Self {
            name: body.name,
            image_url: body.image_url,
            distance: body.distance,
            temperature: body.temperature,
            year_discovered: body.year_discovered,
            radius: body.radius,
            mass: body.mass,
            semi_major_axis: body.semi_major_axis,
            eccentricity: body.eccentricity,
            orbital_period_days: body.orbital_period_days,
            orbital_period_years: body.orbital_period_years,
        }
    }
}

pub async fn create(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<ExoplanetRequest>,
) -> Result<(StatusCode, Json<ExoplanetResponse>), ExplorerServiceError> {
    if !identity.is_admin {
        return Err(ExplorerServiceError::Forbidden);
    }
    let usecase = CreateExoplanetUseCase {
        repo: state.exoplanet_repo(),
    };
    let created = usecase.execute(body.into()).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

// ── PUT /api/exoplanets/{id} (admin) ─────────────────────────────────────────

pub async fn update(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<ExoplanetRequest>,
) -> Result<Json<ExoplanetResponse>, ExplorerServiceError> {
    if !identity.is_admin {
        return Err(ExplorerServiceError::Forbidden);
    }
    let usecase = UpdateExoplanetUseCase {
        repo: state.exoplanet_repo(),
    };
    let updated = usecase.execute(id, body.into()).await?;
    Ok(Json(updated.into()))
}

// ── DELETE /api/exoplanets/{id} (admin) ──────────────────────────────────────

pub async fn delete(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ExplorerServiceError> {
    if !identity.is_admin {
        return Err(ExplorerServiceError::Forbidden);
    }
    let usecase = DeleteExoplanetUseCase {
        repo: state.exoplanet_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /api/exoplanets/refresh (admin) ─────────────────────────────────────

#[derive(Serialize)]
pub struct RefreshResponse {
    pub created: u64,
    pub updated: u64,
}

pub async fn refresh(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<RefreshResponse>, ExplorerServiceError> {
    if !identity.is_admin {
        return Err(ExplorerServiceError::Forbidden);
    }
    let usecase = RefreshExoplanetDataUseCase {
        repo: state.exoplanet_repo(),
        catalog: state.archive.clone(),
        images: state.images.clone(),
    };
    let outcome = usecase.execute().await?;
    Ok(Json(RefreshResponse {
        created: outcome.created,
        updated: outcome.updated,
    }))
}
