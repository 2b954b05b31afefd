use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SecurityConfig;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Username the token was issued to
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(username: &str, issued_at: DateTime<Utc>, lifetime: Duration) -> Self {
        Self {
            sub: username.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + lifetime).timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Could not validate credentials")]
    InvalidToken,

    #[error("Token has expired")]
    TokenExpired,

    #[error("JWT generation error: {0}")]
    Signing(String),
}

/// Checks static credentials and issues/verifies HS256 bearer tokens.
///
/// Built once at startup from [`SecurityConfig`] and shared read-only
/// across requests.
#[derive(Clone)]
pub struct Authenticator {
    users: BTreeMap<String, String>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_lifetime: Duration,
}

impl Authenticator {
    pub fn new(security: &SecurityConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact; no grace period.
        validation.leeway = 0;

        Self {
            users: security.users.clone(),
            encoding_key: EncodingKey::from_secret(security.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(security.jwt_secret.as_bytes()),
            validation,
            token_lifetime: Duration::minutes(security.token_expiry_minutes),
        }
    }

    /// Verify the credential pair and issue a token valid for the configured lifetime.
    pub fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        match self.users.get(username) {
            Some(expected) if expected == password => self.issue_token_at(username, Utc::now()),
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    pub fn issue_token_at(&self, username: &str, issued_at: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = Claims::new(username, issued_at, self.token_lifetime);
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify signature and expiry, returning the username the token was issued to.
    pub fn authenticate(&self, token: &str) -> Result<String, AuthError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            }
        })?;

        let username = token_data.claims.sub;
        if !self.is_known_user(&username) {
            return Err(AuthError::InvalidToken);
        }
        Ok(username)
    }

    pub fn is_known_user(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    pub fn usernames(&self) -> impl Iterator<Item = &str> {
        self.users.keys().map(String::as_str)
    }

    pub fn token_lifetime(&self) -> Duration {
        self.token_lifetime
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn authenticator() -> Authenticator {
        Authenticator::new(&AppConfig::development().security)
    }

    #[test]
    fn login_issues_token_that_authenticates() {
        let auth = authenticator();
        let token = auth.login("ray", "password123").unwrap();
        assert_eq!(auth.authenticate(&token), Ok("ray".to_string()));

        let token = auth.login("dana", "secret").unwrap();
        assert_eq!(auth.authenticate(&token), Ok("dana".to_string()));
    }

    #[test]
    fn login_rejects_bad_credentials() {
        let auth = authenticator();
        assert_eq!(auth.login("ray", "wrongpassword"), Err(AuthError::InvalidCredentials));
        assert_eq!(auth.login("nonexistent", "password123"), Err(AuthError::InvalidCredentials));
        assert_eq!(auth.login("ray", ""), Err(AuthError::InvalidCredentials));
    }

    #[test]
    fn expired_token_is_rejected() {
        let auth = authenticator();
        let token = auth
            .issue_token_at("ray", Utc::now() - Duration::minutes(61))
            .unwrap();
        assert_eq!(auth.authenticate(&token), Err(AuthError::TokenExpired));
    }

    #[test]
    fn token_near_expiry_is_still_accepted() {
        let auth = authenticator();
        let token = auth
            .issue_token_at("ray", Utc::now() - Duration::minutes(59))
            .unwrap();
        assert_eq!(auth.authenticate(&token), Ok("ray".to_string()));
    }

    #[test]
    fn token_claims_expire_sixty_minutes_out() {
        let auth = authenticator();
        let issued_at = Utc::now();
        let claims = Claims::new("ray", issued_at, auth.token_lifetime());
        assert_eq!(claims.exp - claims.iat, 60 * 60);
    }

    #[test]
    fn malformed_and_foreign_tokens_are_invalid() {
        let auth = authenticator();
        assert_eq!(auth.authenticate("not-a-jwt"), Err(AuthError::InvalidToken));
        assert_eq!(auth.authenticate(""), Err(AuthError::InvalidToken));

        let mut other = AppConfig::development().security;
        other.jwt_secret = "some-other-secret".to_string();
        let foreign = Authenticator::new(&other).login("ray", "password123").unwrap();
        assert_eq!(auth.authenticate(&foreign), Err(AuthError::InvalidToken));
    }

    #[test]
    fn token_for_unknown_subject_is_invalid() {
        let auth = authenticator();
        let token = auth.issue_token_at("mallory", Utc::now()).unwrap();
        assert_eq!(auth.authenticate(&token), Err(AuthError::InvalidToken));
    }
}
