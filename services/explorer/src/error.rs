use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Explorer service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum ExplorerServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("exoplanet not found")]
    ExoplanetNotFound,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("exoplanet name already taken")]
    DuplicateExoplanet,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid or expired OTP")]
    InvalidOtp,
    #[error("invalid backup code")]
    InvalidBackupCode,
    #[error("missing or malformed data")]
    MissingData,
    #[error("forbidden")]
    Forbidden,
    #[error("exoplanet archive unavailable")]
    ArchiveUnavailable,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ExplorerServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ExoplanetNotFound => "EXOPLANET_NOT_FOUND",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::DuplicateExoplanet => "DUPLICATE_EXOPLANET",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidOtp => "INVALID_OTP",
            Self::InvalidBackupCode => "INVALID_BACKUP_CODE",
            Self::MissingData => "MISSING_DATA",
            Self::Forbidden => "FORBIDDEN",
            Self::ArchiveUnavailable => "ARCHIVE_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for ExplorerServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound | Self::ExoplanetNotFound => StatusCode::NOT_FOUND,
            Self::UserAlreadyExists | Self::DuplicateExoplanet => StatusCode::CONFLICT,
            Self::InvalidCredentials | Self::InvalidOtp | Self::InvalidBackupCode => {
                StatusCode::UNAUTHORIZED
            }
            Self::MissingData => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::ArchiveUnavailable => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Internal errors need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
