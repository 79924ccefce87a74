#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use exo_domain::exoplanet::{ExoplanetFilter, ExoplanetSortBy};
use exo_domain::pagination::PageRequest;

use crate::domain::types::{BackupCode, CatalogEntry, Exoplanet, NewExoplanet, OutboxEvent, User};
use crate::error::ExplorerServiceError;

/// Repository for user accounts and their OTP state.
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ExplorerServiceError>;

    async fn create(&self, user: &User) -> Result<(), ExplorerServiceError>;

    /// Store a fresh OTP hash + expiry and reset the verified flag, writing
    /// the email outbox event in the same transaction.
    async fn store_otp(
        &self,
        user_id: Uuid,
        otp_hash: &str,
        expires_at: DateTime<Utc>,
        event: &OutboxEvent,
    ) -> Result<(), ExplorerServiceError>;

    /// Mark the OTP verified and clear the hash and expiry.
    async fn confirm_otp(&self, user_id: Uuid) -> Result<(), ExplorerServiceError>;

    async fn update_profile(
        &self,
        user_id: Uuid,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<(), ExplorerServiceError>;

    async fn update_preferences(
        &self,
        user_id: Uuid,
        dark_mode: Option<bool>,
        language: Option<&str>,
    ) -> Result<(), ExplorerServiceError>;

    async fn update_password_hash(
        &self,
        user_id: Uuid,
        password_hash: &str,
    ) -> Result<(), ExplorerServiceError>;

    /// Delete a user by email. Returns `true` if a row was deleted.
    async fn delete_by_email(&self, email: &str) -> Result<bool, ExplorerServiceError>;

    async fn delete_all(&self) -> Result<(), ExplorerServiceError>;
}

/// Repository for exoplanet records.
pub trait ExoplanetRepository: Send + Sync {
    /// Filtered, sorted page of exoplanets plus the total match count.
    async fn list(
        &self,
        filter: &ExoplanetFilter,
        sort_by: ExoplanetSortBy,
        page: PageRequest,
    ) -> Result<(Vec<Exoplanet>, u64), ExplorerServiceError>;

    async fn list_all(&self) -> Result<Vec<Exoplanet>, ExplorerServiceError>;

    /// Exoplanets with a temperature inside the habitable band.
    async fn list_habitable(&self) -> Result<Vec<Exoplanet>, ExplorerServiceError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Exoplanet>, ExplorerServiceError>;

    /// Case-insensitive exact-name lookup (the archive's names vary in case).
    async fn find_by_name(&self, name: &str) -> Result<Option<Exoplanet>, ExplorerServiceError>;

    /// Insert a new record. A unique-name violation maps to `DuplicateExoplanet`.
    async fn create(&self, exo: &NewExoplanet) -> Result<Exoplanet, ExplorerServiceError>;

    /// Overwrite every payload field of an existing record.
    async fn update(
        &self,
        id: i32,
        exo: &NewExoplanet,
    ) -> Result<Exoplanet, ExplorerServiceError>;

    /// Delete a record. Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, ExplorerServiceError>;

    async fn delete_all(&self) -> Result<(), ExplorerServiceError>;
}

/// Repository for the user ↔ exoplanet favorites relation.
pub trait FavoriteRepository: Send + Sync {
    async fn list(&self, user_id: Uuid) -> Result<Vec<Exoplanet>, ExplorerServiceError>;

    async fn contains(
        &self,
        user_id: Uuid,
        exoplanet_id: i32,
    ) -> Result<bool, ExplorerServiceError>;

    async fn add(&self, user_id: Uuid, exoplanet_id: i32) -> Result<(), ExplorerServiceError>;

    /// Remove a favorite. Returns `true` if a row was deleted.
    async fn remove(&self, user_id: Uuid, exoplanet_id: i32)
        -> Result<bool, ExplorerServiceError>;
}

/// Repository for two-factor backup codes.
pub trait BackupCodeRepository: Send + Sync {
    /// Replace the user's codes with a fresh batch, atomically.
    async fn replace_for_user(
        &self,
        user_id: Uuid,
        codes: &[BackupCode],
    ) -> Result<(), ExplorerServiceError>;

    async fn list_unused(&self, user_id: Uuid) -> Result<Vec<BackupCode>, ExplorerServiceError>;

    /// `(total, used)` counts for the user's current batch.
    async fn counts(&self, user_id: Uuid) -> Result<(u64, u64), ExplorerServiceError>;

    /// Mark a code as used.
    async fn mark_used(&self, id: Uuid) -> Result<(), ExplorerServiceError>;
}

/// Append-only outbox for fire-and-forget notifications.
pub trait OutboxRepository: Send + Sync {
    async fn append(&self, event: &OutboxEvent) -> Result<(), ExplorerServiceError>;
}

/// Port for the external exoplanet catalog (NASA Exoplanet Archive).
pub trait ExoplanetCatalogPort: Send + Sync {
    async fn fetch(&self) -> Result<Vec<CatalogEntry>, ExplorerServiceError>;
}

/// Port for resolving exoplanet image URLs by name.
pub trait ImageLookup: Send + Sync {
    fn url_for(&self, name: &str) -> Option<String>;
}
