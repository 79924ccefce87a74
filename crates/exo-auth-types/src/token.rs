//! JWT access-token claims and validation.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

/// Role claim value carried by every token.
pub const ROLE_USER: &str = "ROLE_USER";

/// Role claim value carried by admin tokens.
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

/// User identity extracted from a validated access token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub email: String,
    pub is_admin: bool,
    pub exp: u64,
}

/// Errors returned by [`validate_access_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// JWT claims payload shared by token issuance (auth usecase) and validation
/// (the `Identity` extractor).
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | user email |
/// | `roles` | custom | `ROLE_USER`, plus `ROLE_ADMIN` for admins |
/// | `iat` | `iat` | issued-at, seconds since epoch |
/// | `exp` | `exp` | expiration, seconds since epoch |
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub roles: Vec<String>,
    pub iat: u64,
    pub exp: u64,
}

impl JwtClaims {
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == ROLE_ADMIN)
    }
}

/// Decode and validate a bearer token, returning the parsed identity.
///
/// Validation: HS256, exp checked, required claims: `exp` + `sub`.
/// Default leeway = 60s tolerates clock skew between issuer and clients.
pub fn validate_access_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    let claims = data.claims;
    let is_admin = claims.is_admin();
    Ok(TokenInfo {
        email: claims.sub,
        is_admin,
        exp: claims.exp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    const TEST_SECRET: &str = "test-secret-key-for-unit-tests";

    fn make_token(sub: &str, roles: Vec<String>, exp: u64) -> String {
        let claims = JwtClaims {
            sub: sub.to_string(),
            roles,
            iat: exp.saturating_sub(3600),
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap()
    }

    fn future_exp() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs()
            + 3600
    }

    #[test]
    fn should_validate_valid_token() {
        let token = make_token(
            "alice@example.com",
            vec![ROLE_USER.to_owned()],
            future_exp(),
        );
        let info = validate_access_token(&token, TEST_SECRET).unwrap();
        assert_eq!(info.email, "alice@example.com");
        assert!(!info.is_admin);
    }

    #[test]
    fn should_detect_admin_role() {
        let token = make_token(
            "root@example.com",
            vec![ROLE_USER.to_owned(), ROLE_ADMIN.to_owned()],
            future_exp(),
        );
        let info = validate_access_token(&token, TEST_SECRET).unwrap();
        assert!(info.is_admin);
    }

    #[test]
    fn should_reject_expired_token() {
        let token = make_token("alice@example.com", vec![ROLE_USER.to_owned()], 1_000_000);
        let err = validate_access_token(&token, TEST_SECRET).unwrap_err();
        assert!(matches!(err, AuthError::Expired));
    }

    #[test]
    fn should_reject_wrong_secret() {
        let token = make_token(
            "alice@example.com",
            vec![ROLE_USER.to_owned()],
            future_exp(),
        );
        let err = validate_access_token(&token, "wrong-secret").unwrap_err();
        assert!(matches!(err, AuthError::InvalidSignature));
    }

    #[test]
    fn should_reject_malformed_token() {
        let err = validate_access_token("not-a-jwt", TEST_SECRET).unwrap_err();
        assert!(matches!(err, AuthError::Malformed));
    }
}
