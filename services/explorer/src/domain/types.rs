use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use exo_domain::enrich::PhysicalProfile;

/// Application user account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub otp_code_hash: Option<String>,
    pub otp_expires_at: Option<DateTime<Utc>>,
    pub otp_verified: bool,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub language: String,
    pub dark_mode: bool,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a regular (non-admin) account with default preferences.
    pub fn new_regular(email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            email,
            password_hash,
            otp_code_hash: None,
            otp_expires_at: None,
            otp_verified: false,
            first_name: None,
            last_name: None,
            language: "fr".to_owned(),
            dark_mode: false,
            is_admin: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Exoplanet record as loaded from the store.
#[derive(Debug, Clone)]
pub struct Exoplanet {
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Exoplanet {
    /// The fields the enrichment chain reads.
    pub fn physical_profile(&self) -> PhysicalProfile {
        PhysicalProfile {
            temperature_k: self.temperature,
            distance_ly: self.distance,
            radius_earths: self.radius,
            mass_earths: self.mass,
            orbital_period_days: self.orbital_period_days,
        }
    }
}

/// Exoplanet payload for create/update — everything except id and auditing.
#[derive(Debug, Clone, Default)]
pub struct NewExoplanet {
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

/// Listing projection: just enough for a card grid.
#[derive(Debug, Clone)]
pub struct ExoplanetSummary {
    pub id: i32,
    pub name: String,
    pub image_url: Option<String>,
}

/// Single-use two-factor backup code (hash only).
#[derive(Debug, Clone)]
pub struct BackupCode {
    pub id: Uuid,
    pub user_id: Uuid,
    pub code_hash: String,
    pub used: bool,
    pub created_at: DateTime<Utc>,
}

/// Outbox event for async delivery (OTP emails, user-action notifications).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboxEvent {
    pub id: Uuid,
    pub kind: String,
    pub payload: serde_json::Value,
    pub idempotency_key: String,
}

/// One row of the external archive's aggregate catalog.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub name: String,
    pub radius: Option<f32>,
    pub mass: Option<f32>,
    pub distance: Option<f32>,
    pub orbital_period_days: Option<f32>,
    pub temperature: Option<f32>,
}

/// Outbox event kinds emitted by the service.
pub mod event_kind {
    pub const OTP_EMAIL_REQUESTED: &str = "otp_email_requested";
    pub const USER_REGISTERED: &str = "user_registered";
    pub const FAVORITE_ADDED: &str = "favorite_added";
    pub const FAVORITE_REMOVED: &str = "favorite_removed";
    pub const PROFILE_UPDATED: &str = "profile_updated";
    pub const PASSWORD_CHANGED: &str = "password_changed";
}

/// Number of backup codes generated when the request does not specify one.
pub const DEFAULT_BACKUP_CODE_COUNT: usize = 5;

/// Number of digits in a generated OTP.
pub const OTP_DIGITS: u32 = 6;

/// Number of digits in a generated backup code.
pub const BACKUP_CODE_DIGITS: u32 = 8;
