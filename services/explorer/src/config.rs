/// Explorer service configuration loaded from environment variables.
#[derive(Debug)]
pub struct ExplorerConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing JWT access tokens.
    pub jwt_secret: String,
    /// Access-token lifetime in seconds (default 3600). Env var: `JWT_EXPIRATION_SECS`.
    pub jwt_expiration_secs: u64,
    /// OTP lifetime in minutes (default 5). Env var: `OTP_TTL_MINUTES`.
    pub otp_ttl_minutes: i64,
    /// Travel speed for enrichment, as a fraction of light speed (default 0.1).
    /// Env var: `TRAVEL_SPEED_FRACTION`.
    pub travel_speed_fraction: f32,
    /// TCP port to listen on (default 8080). Env var: `EXPLORER_PORT`.
    pub explorer_port: u16,
    /// Optional path to the exoplanet image manifest (JSON name → URL list).
    pub image_manifest_path: Option<String>,
    /// Mount the destructive `/api/test` reset routes (default false).
    pub enable_test_routes: bool,
}

impl ExplorerConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            jwt_expiration_secs: std::env::var("JWT_EXPIRATION_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            otp_ttl_minutes: std::env::var("OTP_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            travel_speed_fraction: std::env::var("TRAVEL_SPEED_FRACTION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.1),
            explorer_port: std::env::var("EXPLORER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            image_manifest_path: std::env::var("IMAGE_MANIFEST_PATH").ok(),
            enable_test_routes: std::env::var("ENABLE_TEST_ROUTES")
                .ok()
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}
