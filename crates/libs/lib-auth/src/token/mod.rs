//! # JWT Token Issuing
//!
//! Issues and decodes the HS256 access token handed out on login and
//! registration. Issuing is a pure function of the identity, the signing
//! configuration and the clock; delivering the token (cookie, body) is left
//! to the web layer.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use lib_utils::now_utc;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Token lifetime. Fixed, not configurable.
pub const TOKEN_TTL_MINUTES: i64 = 30;

/// Signing configuration for issued tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenConfig {
    /// Shared secret; its raw bytes are the HMAC-SHA-256 key.
    pub signing_key: String,
    pub issuer: String,
    pub audience: String,
}

/// JWT payload.
///
/// `sub` is the only identity claim; `iss`, `aud` and `exp` are the
/// registered claims the token carries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account email)
    pub sub: String,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Issue a token for `identity` valid for [`TOKEN_TTL_MINUTES`] from now.
pub fn issue_token(identity: &str, config: &TokenConfig) -> Result<String> {
    issue_token_at(identity, config, now_utc())
}

/// Issue a token as if the current time were `issued_at`.
pub fn issue_token_at(
    identity: &str,
    config: &TokenConfig,
    issued_at: DateTime<Utc>,
) -> Result<String> {
    let exp = issued_at + Duration::minutes(TOKEN_TTL_MINUTES);

    let claims = Claims {
        sub: identity.to_string(),
        iss: config.issuer.clone(),
        aud: config.audience.clone(),
        exp: exp.timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.signing_key.as_bytes()),
    )
    .map_err(|e| Error::TokenEncode(e.to_string()))
}

/// Decode a token, checking signature, issuer, audience and expiry.
pub fn decode_token(token: &str, config: &TokenConfig) -> Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[config.issuer.as_str()]);
    validation.set_audience(&[config.audience.as_str()]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.signing_key.as_bytes()),
        &validation,
    )
    .map_err(|e| Error::TokenDecode(e.to_string()))?;

    Ok(token_data.claims)
}
