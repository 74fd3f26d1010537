//! Session token service
//!
//! Issues and verifies signed, time-limited identity tokens (HS256 JWT).
//! Stateless: nothing is persisted server-side and there is no revocation
//! list; expiry is the only lifecycle bound.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::auth::error::AuthError;
use crate::core_types::UserId;

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user id)
    pub sub: UserId,
    /// Subject email, embedded for convenience at the boundary
    pub email: String,
    /// Issued at (UTC timestamp)
    pub iat: usize,
    /// Expiration time (UTC timestamp)
    pub exp: usize,
}

/// Signs and verifies session tokens with a server-side secret.
///
/// The secret and TTL are injected at construction from config; there is
/// no process-wide signing state.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: impl Into<String>, ttl_secs: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    /// Issue a token for a user: `exp = now + ttl`.
    pub fn issue(&self, user_id: UserId, email: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let expiration = now + self.ttl;

        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            iat: now.timestamp().max(0) as usize,
            exp: expiration.timestamp().max(0) as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|_| AuthError::InvalidToken)
    }

    /// Verify a token's signature and expiry.
    ///
    /// # Errors
    /// `InvalidToken` for a bad signature, malformed token, or expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        // exp is checked with no leeway: the TTL itself is the grace period.
        validation.leeway = 0;
        let token_data =
            decode::<Claims>(token, &decoding_key, &validation).map_err(|_| AuthError::InvalidToken)?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_verify_round_trip() {
        let service = TokenService::new("test-secret", 3600);
        let token = service.issue(42, "a@x.com").unwrap();

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "a@x.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_rejected() {
        // Negative TTL puts exp in the past.
        let service = TokenService::new("test-secret", -60);
        let token = service.issue(42, "a@x.com").unwrap();
        assert!(matches!(service.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = TokenService::new("secret-a", 3600);
        let verifier = TokenService::new("secret-b", 3600);
        let token = issuer.issue(42, "a@x.com").unwrap();
        assert!(matches!(verifier.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = TokenService::new("test-secret", 3600);
        assert!(matches!(
            service.verify("not.a.token"),
            Err(AuthError::InvalidToken)
        ));
    }
}
