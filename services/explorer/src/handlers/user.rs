use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use exo_auth_types::identity::Identity;

use crate::error::ExplorerServiceError;
use crate::handlers::exoplanet::ExoplanetResponse;
use crate::state::AppState;
use crate::usecase::favorite::{GetFavoritesUseCase, ToggleFavoriteUseCase};
use crate::usecase::user::{
    BackupCodeStatusUseCase, ChangePasswordInput, ChangePasswordUseCase, GetProfileUseCase,
    UpdatePreferencesInput, UpdatePreferencesUseCase, UpdateProfileInput, UpdateProfileUseCase,
};

// ── GET /api/user/favorites ──────────────────────────────────────────────────

pub async fn get_favorites(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<ExoplanetResponse>>, ExplorerServiceError> {
    let usecase = GetFavoritesUseCase {
        users: state.user_repo(),
        favorites: state.favorite_repo(),
    };
    let favorites = usecase.execute(&identity.email).await?;
    Ok(Json(
        favorites.into_iter().map(ExoplanetResponse::from).collect(),
    ))
}

// ── POST /api/user/toggle-favorite ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct ToggleFavoriteRequest {
    pub exoplanet_id: i32,
}

#[derive(Serialize)]
pub struct ToggleFavoriteResponse {
    pub favorited: bool,
}

pub async fn toggle_favorite(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<ToggleFavoriteRequest>,
) -> Result<Json<ToggleFavoriteResponse>, ExplorerServiceError> {
    let usecase = ToggleFavoriteUseCase {
        users: state.user_repo(),
        exoplanets: state.exoplanet_repo(),
        favorites: state.favorite_repo(),
        outbox: state.outbox_repo(),
    };
    let favorited = usecase.execute(&identity.email, body.exoplanet_id).await?;
    Ok(Json(ToggleFavoriteResponse { favorited }))
}

// ── GET /api/user/profile ────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ProfileResponse {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub dark_mode: bool,
    pub language: String,
    pub is_admin: bool,
}

pub async fn get_profile(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, ExplorerServiceError> {
    let usecase = GetProfileUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(&identity.email).await?;
    Ok(Json(ProfileResponse {
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        dark_mode: user.dark_mode,
        language: user.language,
        is_admin: user.is_admin,
    }))
}

// ── PUT /api/user/update-profile ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

pub async fn update_profile(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<StatusCode, ExplorerServiceError> {
    let usecase = UpdateProfileUseCase {
        users: state.user_repo(),
        outbox: state.outbox_repo(),
    };
    usecase
        .execute(
            &identity.email,
            UpdateProfileInput {
                first_name: body.first_name,
                last_name: body.last_name,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /api/user/change-password ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

pub async fn change_password(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<StatusCode, ExplorerServiceError> {
    let usecase = ChangePasswordUseCase {
        users: state.user_repo(),
        outbox: state.outbox_repo(),
    };
    usecase
        .execute(
            &identity.email,
            ChangePasswordInput {
                current_password: body.current_password,
                new_password: body.new_password,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── PUT /api/user/preferences ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdatePreferencesRequest {
    pub dark_mode: Option<bool>,
    pub language: Option<String>,
}

pub async fn update_preferences(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<UpdatePreferencesRequest>,
) -> Result<StatusCode, ExplorerServiceError> {
    let usecase = UpdatePreferencesUseCase {
        users: state.user_repo(),
    };
    usecase
        .execute(
            &identity.email,
            UpdatePreferencesInput {
                dark_mode: body.dark_mode,
                language: body.language,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /api/user/backup-codes (admin) ───────────────────────────────────────

#[derive(Deserialize)]
pub struct BackupCodesQuery {
    pub email: String,
}

#[derive(Serialize)]
pub struct BackupCodeStatusResponse {
    pub total: u64,
    pub used: u64,
    pub available: u64,
}

pub async fn get_backup_code_status(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<BackupCodesQuery>,
) -> Result<Json<BackupCodeStatusResponse>, ExplorerServiceError> {
    if !identity.is_admin {
        return Err(ExplorerServiceError::Forbidden);
    }
    let usecase = BackupCodeStatusUseCase {
        users: state.user_repo(),
        backup_codes: state.backup_code_repo(),
    };
    let status = usecase.execute(&query.email).await?;
    Ok(Json(BackupCodeStatusResponse {
        total: status.total,
        used: status.used,
        available: status.available,
    }))
}
