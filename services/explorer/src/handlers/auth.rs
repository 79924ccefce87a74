use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::ExplorerServiceError;
use crate::state::AppState;
use crate::usecase::auth::{
    GenerateBackupCodesInput, GenerateBackupCodesUseCase, ProcessLoginInput, ProcessLoginUseCase,
    RegisterUserInput, RegisterUserUseCase, VerifyBackupCodeInput, VerifyBackupCodeUseCase,
    VerifyOtpInput, VerifyOtpUseCase,
};
use crate::usecase::token::issue_access_token;

// ── POST /api/auth/signup ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<StatusCode, ExplorerServiceError> {
    let register = RegisterUserUseCase {
        users: state.user_repo(),
        outbox: state.outbox_repo(),
    };
    register
        .execute(RegisterUserInput {
            email: body.email.clone(),
            password: body.password.clone(),
        })
        .await?;

    // First OTP goes out immediately so the signup flow lands on the OTP
    // screen like any login.
    let login = ProcessLoginUseCase {
        users: state.user_repo(),
        otp_ttl_minutes: state.otp_ttl_minutes,
    };
    login
        .execute(ProcessLoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(StatusCode::CREATED)
}

// ── POST /api/auth/login ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<StatusCode, ExplorerServiceError> {
    let usecase = ProcessLoginUseCase {
        users: state.user_repo(),
        otp_ttl_minutes: state.otp_ttl_minutes,
    };
    usecase
        .execute(ProcessLoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(StatusCode::CREATED)
}

// ── POST /api/auth/verify-otp ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct OtpVerificationRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub is_admin: bool,
}

pub async fn verify_otp(
    State(state): State<AppState>,
    Json(body): Json<OtpVerificationRequest>,
) -> Result<Json<TokenResponse>, ExplorerServiceError> {
    let usecase = VerifyOtpUseCase {
        users: state.user_repo(),
    };
    let user = usecase
        .execute(VerifyOtpInput {
            email: body.email,
            otp: body.otp,
        })
        .await?;

    let (token, _exp) = issue_access_token(
        &user.email,
        user.is_admin,
        &state.jwt_secret.0,
        state.jwt_expiration_secs,
    )?;
    Ok(Json(TokenResponse {
        token,
        is_admin: user.is_admin,
    }))
}

// ── POST /api/auth/verify-backup-code ────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyBackupCodeRequest {
    pub email: String,
    pub backup_code: String,
}

pub async fn verify_backup_code(
    State(state): State<AppState>,
    Json(body): Json<VerifyBackupCodeRequest>,
) -> Result<Json<TokenResponse>, ExplorerServiceError> {
    let usecase = VerifyBackupCodeUseCase {
        users: state.user_repo(),
        backup_codes: state.backup_code_repo(),
    };
    let user = usecase
        .execute(VerifyBackupCodeInput {
            email: body.email,
            backup_code: body.backup_code,
        })
        .await?;

    let (token, _exp) = issue_access_token(
        &user.email,
        user.is_admin,
        &state.jwt_secret.0,
        state.jwt_expiration_secs,
    )?;
    Ok(Json(TokenResponse {
        token,
        is_admin: user.is_admin,
    }))
}

// ── POST /api/auth/generate-backup-codes ─────────────────────────────────────

#[derive(Deserialize)]
pub struct GenerateBackupCodesRequest {
    pub email: String,
    pub count: Option<usize>,
}

pub async fn generate_backup_codes(
    State(state): State<AppState>,
    Json(body): Json<GenerateBackupCodesRequest>,
) -> Result<(StatusCode, Json<Vec<String>>), ExplorerServiceError> {
    let usecase = GenerateBackupCodesUseCase {
        users: state.user_repo(),
        backup_codes: state.backup_code_repo(),
    };
    let codes = usecase
        .execute(GenerateBackupCodesInput {
            email: body.email,
            count: body.count,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(codes)))
}
