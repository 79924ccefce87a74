//! Bearer-token identity extractor.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::StatusCode;
use axum::http::request::Parts;

use crate::token::validate_access_token;

/// HMAC secret for JWT validation, pulled from application state via
/// [`FromRef`].
#[derive(Clone)]
pub struct JwtSecret(pub String);

/// Caller identity extracted from a validated `Authorization: Bearer` token.
///
/// Returns 401 if the header is absent, not a bearer scheme, or the token
/// fails validation. Admin enforcement (403) is done by handlers after
/// extraction.
#[derive(Debug, Clone)]
pub struct Identity {
    pub email: String,
    pub is_admin: bool,
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
    JwtSecret: FromRef<S>,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = JwtSecret::from_ref(state);
        let token = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(str::to_owned);

        async move {
            let token = token.ok_or(StatusCode::UNAUTHORIZED)?;
            let info = validate_access_token(&token, &secret.0)
                .map_err(|_| StatusCode::UNAUTHORIZED)?;
            Ok(Self {
                email: info.email,
                is_admin: info.is_admin,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{JwtClaims, ROLE_ADMIN, ROLE_USER};
    use axum::http::Request;
    use jsonwebtoken::{EncodingKey, Header, encode};

    const TEST_SECRET: &str = "extractor-test-secret";

    fn make_token(sub: &str, roles: Vec<String>) -> String {
        let exp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs()
            + 3600;
        let claims = JwtClaims {
            sub: sub.to_string(),
            roles,
            iat: exp - 3600,
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap()
    }

    async fn extract(authorization: Option<&str>) -> Result<Identity, StatusCode> {
        let mut builder = Request::builder().method("GET").uri("/test");
        if let Some(value) = authorization {
            builder = builder.header("authorization", value);
        }
        let request = builder.body(()).unwrap();
        let (mut parts, _body) = request.into_parts();
        // JwtSecret is its own state via axum's blanket `FromRef<T> for T`.
        let state = JwtSecret(TEST_SECRET.to_owned());
        Identity::from_request_parts(&mut parts, &state).await
    }

    #[tokio::test]
    async fn should_extract_identity_from_bearer_token() {
        let token = make_token("alice@example.com", vec![ROLE_USER.to_owned()]);
        let identity = extract(Some(&format!("Bearer {token}"))).await.unwrap();
        assert_eq!(identity.email, "alice@example.com");
        assert!(!identity.is_admin);
    }

    #[tokio::test]
    async fn should_extract_admin_flag() {
        let token = make_token(
            "root@example.com",
            vec![ROLE_USER.to_owned(), ROLE_ADMIN.to_owned()],
        );
        let identity = extract(Some(&format!("Bearer {token}"))).await.unwrap();
        assert!(identity.is_admin);
    }

    #[tokio::test]
    async fn should_reject_missing_header() {
        let result = extract(None).await;
        assert_eq!(result.unwrap_err(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn should_reject_non_bearer_scheme() {
        let result = extract(Some("Basic dXNlcjpwYXNz")).await;
        assert_eq!(result.unwrap_err(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn should_reject_invalid_token() {
        let result = extract(Some("Bearer not-a-jwt")).await;
        assert_eq!(result.unwrap_err(), StatusCode::UNAUTHORIZED);
    }
}
