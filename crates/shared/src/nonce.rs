//! Nonces for state-changing links.
//!
//! A nonce is a short-lived signed token bound to one user and one action
//! name. It travels in a query string, so it carries no capabilities.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::jwt::JwtError;

const NONCE_AUDIENCE: &str = "erp-nonce";

#[derive(Debug, Serialize, Deserialize)]
struct NonceClaims {
    sub: i64,
    act: String,
    aud: String,
    iat: i64,
    exp: i64,
}

/// Issues and verifies nonces.
#[derive(Clone)]
pub struct NonceService {
    lifetime: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for NonceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NonceService")
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}

impl NonceService {
    /// Creates a nonce service signing with `secret`.
    #[must_use]
    pub fn new(secret: &str, lifetime_secs: u64) -> Self {
        let secs = i64::try_from(lifetime_secs).map_or(i64::MAX / 1000, |s| s.min(i64::MAX / 1000));
        Self {
            lifetime: Duration::seconds(secs),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issues a nonce for `action` on behalf of `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::EncodingError` if signing fails.
    pub fn create(&self, action: &str, user_id: i64) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = NonceClaims {
            sub: user_id,
            act: action.to_string(),
            aud: NONCE_AUDIENCE.to_string(),
            iat: now.timestamp(),
            exp: now
                .checked_add_signed(self.lifetime)
                .map_or(i64::MAX, |at| at.timestamp()),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))
    }

    /// Returns true when `nonce` was issued for `action` and `user_id` and has not expired.
    #[must_use]
    pub fn verify(&self, nonce: &str, action: &str, user_id: i64) -> bool {
        let mut validation = Validation::default();
        validation.set_audience(&[NONCE_AUDIENCE]);

        decode::<NonceClaims>(nonce, &self.decoding_key, &validation)
            .is_ok_and(|data| data.claims.sub == user_id && data.claims.act == action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> NonceService {
        NonceService::new("nonce-test-secret", 3600)
    }

    #[test]
    fn test_nonce_round_trip() {
        let service = service();
        let nonce = service.create("erp_mode_nonce", 5).unwrap();

        assert!(service.verify(&nonce, "erp_mode_nonce", 5));
    }

    #[test]
    fn test_nonce_is_bound_to_user_and_action() {
        let service = service();
        let nonce = service.create("erp_mode_nonce", 5).unwrap();

        assert!(!service.verify(&nonce, "erp_mode_nonce", 6));
        assert!(!service.verify(&nonce, "delete_sale", 5));
    }

    #[test]
    fn test_garbage_nonce_is_rejected() {
        assert!(!service().verify("not-a-nonce", "erp_mode_nonce", 5));
        assert!(!service().verify("", "erp_mode_nonce", 5));
    }

    #[test]
    fn test_access_token_is_not_a_nonce() {
        let jwt = crate::JwtService::new(crate::JwtConfig {
            secret: "nonce-test-secret".to_string(),
            access_token_expires_minutes: 15,
        });
        let token = jwt.generate_access_token(5, &["manage_options"]).unwrap();

        assert!(!service().verify(&token, "erp_mode_nonce", 5));
    }
}
