/**
 * Session Tokens
 *
 * This module implements the token service: issuing and verifying the
 * signed, expiring JWTs that carry a user's identity between requests.
 *
 * # Design
 *
 * Tokens are HS256 JWTs with three claims: `sub` (the username), `iat`,
 * and `exp` (issuance time plus the configured TTL). They are stateless
 * and unrevocable; logout is client-side discard. The signing secret and
 * TTL come from the application configuration at startup, so there is no
 * ambient environment access on the hot path.
 */

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Current Unix timestamp in seconds
fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the username this token authenticates
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Why a presented token was rejected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// The token's expiry timestamp has passed
    #[error("token has expired")]
    Expired,
    /// Bad signature, structural damage, or a missing subject claim
    #[error("token is invalid")]
    Malformed,
}

/// Issues and verifies signed identity tokens
///
/// Cheap to clone; one instance lives in the application state.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_minutes: u64,
}

impl TokenService {
    /// Create a token service from the configured secret and TTL
    pub fn new(secret: &str, ttl_minutes: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_minutes,
        }
    }

    /// Issue a signed token for `subject`
    ///
    /// The embedded expiry is the current time plus the configured TTL.
    pub fn issue(&self, subject: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let now = unix_now();
        let claims = Claims {
            sub: subject.to_string(),
            exp: now + self.ttl_minutes * 60,
            iat: now,
        };
        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Verify a token and return its subject
    ///
    /// # Errors
    ///
    /// - `TokenError::Expired` once the current time has reached the
    ///   embedded expiry (no leeway)
    /// - `TokenError::Malformed` for anything else: bad signature, wrong
    ///   structure, or an absent/empty subject claim
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            }
        })?;

        if data.claims.sub.is_empty() {
            return Err(TokenError::Malformed);
        }
        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret", 30)
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let tokens = service();
        let token = tokens.issue("alice").unwrap();
        assert!(!token.is_empty());
        assert_eq!(tokens.verify(&token).unwrap(), "alice");
    }

    #[test]
    fn test_past_expiry_is_expired() {
        let now = unix_now();
        let claims = Claims {
            sub: "alice".to_string(),
            exp: now - 60,
            iat: now - 120,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        assert_eq!(service().verify(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let tokens = service();
        assert_eq!(
            tokens.verify("invalid.token.here").unwrap_err(),
            TokenError::Malformed
        );
    }

    #[test]
    fn test_wrong_secret_is_malformed() {
        let token = TokenService::new("other-secret", 30).issue("alice").unwrap();
        assert_eq!(service().verify(&token).unwrap_err(), TokenError::Malformed);
    }

    #[test]
    fn test_missing_subject_is_malformed() {
        // A structurally valid token whose payload has no `sub` claim.
        #[derive(Serialize)]
        struct NoSubject {
            exp: u64,
            iat: u64,
        }
        let now = unix_now();
        let claims = NoSubject {
            exp: now + 600,
            iat: now,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        assert_eq!(service().verify(&token).unwrap_err(), TokenError::Malformed);
    }

    #[test]
    fn test_token_embeds_ttl() {
        let tokens = service();
        let token = tokens.issue("alice").unwrap();

        let mut validation = Validation::default();
        validation.leeway = 0;
        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &validation,
        )
        .unwrap();
        assert_eq!(data.claims.exp - data.claims.iat, 30 * 60);
    }
}
