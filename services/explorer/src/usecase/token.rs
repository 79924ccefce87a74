use jsonwebtoken::{EncodingKey, Header, encode};
use std::time::{SystemTime, UNIX_EPOCH};

use exo_auth_types::token::{JwtClaims, ROLE_ADMIN, ROLE_USER};

use crate::error::ExplorerServiceError;

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Issue an access token for a verified user. Returns the token and its
/// expiration timestamp.
pub fn issue_access_token(
    email: &str,
    is_admin: bool,
    secret: &str,
    expiration_secs: u64,
) -> Result<(String, u64), ExplorerServiceError> {
    let iat = now_secs();
    let exp = iat + expiration_secs;
    let mut roles = vec![ROLE_USER.to_owned()];
    if is_admin {
        roles.push(ROLE_ADMIN.to_owned());
    }
    let claims = JwtClaims {
        sub: email.to_owned(),
        roles,
        iat,
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ExplorerServiceError::Internal(e.into()))?;
    Ok((token, exp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use exo_auth_types::token::validate_access_token;

    const TEST_SECRET: &str = "usecase-token-test-secret";

    #[test]
    fn should_issue_token_that_validates() {
        let (token, exp) =
            issue_access_token("alice@example.com", false, TEST_SECRET, 3600).unwrap();
        let info = validate_access_token(&token, TEST_SECRET).unwrap();
        assert_eq!(info.email, "alice@example.com");
        assert!(!info.is_admin);
        assert_eq!(info.exp, exp);
    }

    #[test]
    fn should_include_admin_role_for_admins() {
        let (token, _) = issue_access_token("root@example.com", true, TEST_SECRET, 3600).unwrap();
        let info = validate_access_token(&token, TEST_SECRET).unwrap();
        assert!(info.is_admin);
    }

    #[test]
    fn should_set_expiration_relative_to_now() {
        let (_, exp) = issue_access_token("alice@example.com", false, TEST_SECRET, 60).unwrap();
        let now = now_secs();
        assert!(exp >= now + 59 && exp <= now + 61);
    }
}
