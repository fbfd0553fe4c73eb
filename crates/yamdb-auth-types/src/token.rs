//! JWT access tokens: issuance and validation.

use std::sync::Arc;

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use yamdb_domain::id::UserId;

use crate::clock::Clock;

/// Tolerated clock skew when checking `exp`.
pub const LEEWAY_SECS: u64 = 60;

/// User identity extracted from a validated access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub user_id: UserId,
    pub exp: u64,
}

#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub exp: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// JWT claims payload.
///
/// | Field | Meaning |
/// |-------|---------|
/// | `sub` | user id as a decimal string |
/// | `iat` | issue time, seconds since epoch |
/// | `exp` | expiry, seconds since epoch |
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub iat: u64,
    pub exp: u64,
}

/// Signs and verifies access tokens with an HMAC secret.
///
/// Expiry is checked against the injected [`Clock`] rather than the wall
/// clock so that tests can move time deterministically.
#[derive(Clone)]
pub struct TokenIssuer {
    secret: String,
    ttl_secs: u64,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    pub fn new(secret: impl Into<String>, ttl_secs: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            secret: secret.into(),
            ttl_secs,
            clock,
        }
    }

    pub fn issue(&self, user_id: UserId) -> Result<AccessToken, AuthError> {
        let iat = self.clock.now_secs();
        let exp = iat + self.ttl_secs;
        let claims = JwtClaims {
            sub: user_id.to_string(),
            iat,
            exp,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;
        Ok(AccessToken { token, exp })
    }

    /// Validation: HS256, required claims `exp` + `sub`, expiry with
    /// [`LEEWAY_SECS`] against the injected clock.
    pub fn verify(&self, token: &str) -> Result<TokenInfo, AuthError> {
        let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<JwtClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            _ => AuthError::Malformed,
        })?;

        let claims = data.claims;
        if claims.exp + LEEWAY_SECS < self.clock.now_secs() {
            return Err(AuthError::Expired);
        }
        let user_id = claims
            .sub
            .parse::<UserId>()
            .map_err(|_| AuthError::Malformed)?;
        Ok(TokenInfo {
            user_id,
            exp: claims.exp,
        })
    }
}
