//! Bearer token issuing and verification using HS256.
//!
//! Tokens are stateless: no server-side session table, no revocation list.
//! Claims deliberately carry no `exp` and the verifier does not enforce
//! expiration. `iat` is recorded so an expiry policy can be layered on
//! later without reissuing the claim shape.

use std::collections::HashSet;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, Result};

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Username at issuance time
    pub username: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Claims with the subject already parsed back into a user id.
#[derive(Debug, Clone)]
pub struct VerifiedClaims {
    pub user_id: Uuid,
    pub username: String,
}

#[derive(Clone)]
pub struct JwtService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue a signed token for the given identity claim.
    pub fn sign(&self, user_id: Uuid, username: &str) -> Result<String> {
        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            iat: chrono::Utc::now().timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| ApiError::Internal(format!("failed to sign token: {e}")))
    }

    /// Verify a token and return its identity claim. Fails with
    /// `InvalidToken` on a bad signature, malformed or empty input, or a
    /// non-UUID subject.
    pub fn verify(&self, token: &str) -> Result<VerifiedClaims> {
        if token.is_empty() {
            return Err(ApiError::InvalidToken);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // No exp claim is issued, so expiry validation must be off.
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::new();

        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|_| ApiError::InvalidToken)?;

        let user_id = Uuid::parse_str(&data.claims.sub).map_err(|_| ApiError::InvalidToken)?;

        Ok(VerifiedClaims {
            user_id,
            username: data.claims.username,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify_roundtrip() {
        let jwt = JwtService::new("test-secret");
        let user_id = Uuid::new_v4();

        let token = jwt.sign(user_id, "root").unwrap();
        let claims = jwt.verify(&token).unwrap();

        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.username, "root");
    }

    #[test]
    fn test_rejects_wrong_secret() {
        let token = JwtService::new("secret-a")
            .sign(Uuid::new_v4(), "root")
            .unwrap();
        let err = JwtService::new("secret-b").verify(&token).unwrap_err();
        assert!(matches!(err, ApiError::InvalidToken));
    }

    #[test]
    fn test_rejects_tampered_token() {
        let jwt = JwtService::new("test-secret");
        let mut token = jwt.sign(Uuid::new_v4(), "root").unwrap();
        token.push('x');
        assert!(jwt.verify(&token).is_err());
    }

    #[test]
    fn test_rejects_empty_and_malformed_tokens() {
        let jwt = JwtService::new("test-secret");
        assert!(jwt.verify("").is_err());
        assert!(jwt.verify("not.a.jwt").is_err());
        assert!(jwt.verify("header-only").is_err());
    }
}
