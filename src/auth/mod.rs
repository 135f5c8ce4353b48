use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Signing secret not configured")]
    MissingSecret,

    #[error("Token generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Identity assertion rejected for {0}")]
    AssertionRejected(String),
}

/// Session role, recomputed from the admin allow-list. Mirrors the roles the
/// identity layer hands to the admin UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Unauthorized,
}

impl Role {
    pub fn for_email(email: &str, allow_list: &[String]) -> Self {
        if is_admin(email, allow_list) {
            Role::Admin
        } else {
            Role::Unauthorized
        }
    }
}

/// Admin gate predicate: exact, case-sensitive membership in the allow-list.
/// The list is loaded once at process start; nothing here mutates state.
pub fn is_admin(email: &str, allow_list: &[String]) -> bool {
    allow_list.iter().any(|allowed| allowed == email)
}

/// Claims in a session token issued by this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub name: Option<String>,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(email: String, name: Option<String>, role: Role) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.session_expiry_hours;
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: email,
            name,
            role,
            exp,
            iat: now.timestamp(),
        }
    }
}

/// Claims in an identity assertion signed by the external identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assertion {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

/// Issue a session token for an allow-listed caller's claims.
pub fn issue_session_token(claims: &Claims) -> Result<String, AuthError> {
    let secret = &config::config().security.session_secret;
    sign(claims, secret)
}

/// Verify a session token and return its claims.
pub fn verify_session_token(token: &str) -> Result<Claims, AuthError> {
    let secret = &config::config().security.session_secret;
    verify(token, secret)
}

/// Verify an identity assertion against the shared identity-provider secret.
pub fn verify_assertion(token: &str) -> Result<Assertion, AuthError> {
    let secret = &config::config().security.identity_secret;
    verify(token, secret)
}

/// Sign an identity assertion with an explicit secret. Used by the ops CLI
/// (and tests) to stand in for the identity provider.
pub fn sign_assertion(email: &str, name: Option<&str>, secret: &str) -> Result<String, AuthError> {
    let now = Utc::now();
    let assertion = Assertion {
        email: email.to_string(),
        name: name.map(|n| n.to_string()),
        exp: (now + Duration::hours(1)).timestamp(),
        iat: now.timestamp(),
    };
    sign(&assertion, secret)
}

fn sign<T: Serialize>(claims: &T, secret: &str) -> Result<String, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

fn verify<T: for<'de> Deserialize<'de>>(token: &str, secret: &str) -> Result<T, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    decode::<T>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| AuthError::InvalidToken(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allow_list(emails: &[&str]) -> Vec<String> {
        emails.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn admin_predicate_is_exact_membership() {
        let list = allow_list(&["owner@example.com", "staff@example.com"]);
        assert!(is_admin("owner@example.com", &list));
        assert!(!is_admin("intruder@example.com", &list));
    }

    #[test]
    fn admin_predicate_is_case_sensitive() {
        let list = allow_list(&["owner@example.com"]);
        assert!(!is_admin("Owner@example.com", &list));
    }

    #[test]
    fn empty_allow_list_admits_nobody() {
        assert!(!is_admin("owner@example.com", &[]));
        assert_eq!(Role::for_email("owner@example.com", &[]), Role::Unauthorized);
    }

    #[test]
    fn role_derivation_follows_allow_list() {
        let list = allow_list(&["owner@example.com"]);
        assert_eq!(Role::for_email("owner@example.com", &list), Role::Admin);
        assert_eq!(Role::for_email("other@example.com", &list), Role::Unauthorized);
    }

    #[test]
    fn assertion_round_trips_through_signing() {
        let token = sign_assertion("owner@example.com", Some("Owner"), "test-secret").unwrap();
        let assertion: Assertion = verify(&token, "test-secret").unwrap();
        assert_eq!(assertion.email, "owner@example.com");
        assert_eq!(assertion.name.as_deref(), Some("Owner"));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = sign_assertion("owner@example.com", None, "test-secret").unwrap();
        let result: Result<Assertion, _> = verify(&token, "other-secret");
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn empty_secret_is_rejected() {
        assert!(matches!(
            sign_assertion("owner@example.com", None, ""),
            Err(AuthError::MissingSecret)
        ));
    }

    #[test]
    fn expired_assertion_fails_verification() {
        let now = Utc::now();
        let stale = Assertion {
            email: "owner@example.com".to_string(),
            name: None,
            exp: (now - Duration::hours(2)).timestamp(),
            iat: (now - Duration::hours(3)).timestamp(),
        };
        let token = sign(&stale, "test-secret").unwrap();
        let result: Result<Assertion, _> = verify(&token, "test-secret");
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }
}
