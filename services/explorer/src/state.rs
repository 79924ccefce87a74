use std::sync::Arc;

use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use exo_auth_types::identity::JwtSecret;

use crate::infra::archive::HttpArchiveClient;
use crate::infra::db::{
    DbBackupCodeRepository, DbExoplanetRepository, DbFavoriteRepository, DbOutboxRepository,
    DbUserRepository,
};
use crate::infra::images::ImageCatalog;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: JwtSecret,
    pub jwt_expiration_secs: u64,
    pub otp_ttl_minutes: i64,
    pub travel_speed_fraction: f32,
    pub images: Arc<ImageCatalog>,
    pub archive: HttpArchiveClient,
    pub enable_test_routes: bool,
}

impl FromRef<AppState> for JwtSecret {
    fn from_ref(state: &AppState) -> JwtSecret {
        state.jwt_secret.clone()
    }
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn exoplanet_repo(&self) -> DbExoplanetRepository {
        DbExoplanetRepository {
            db: self.db.clone(),
        }
    }

    pub fn favorite_repo(&self) -> DbFavoriteRepository {
        DbFavoriteRepository {
            db: self.db.clone(),
        }
    }

    pub fn backup_code_repo(&self) -> DbBackupCodeRepository {
        DbBackupCodeRepository {
            db: self.db.clone(),
        }
    }

    pub fn outbox_repo(&self) -> DbOutboxRepository {
        DbOutboxRepository {
            db: self.db.clone(),
        }
    }
}
