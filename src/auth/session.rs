//! Stateless session tokens.
//!
//! A successful login mints a signed token embedding the admin's username
//! and an absolute expiry. Nothing is stored server-side: the token is
//! valid until it expires, and there is no revocation list.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
}

/// Mints a session token for `username` expiring at `now + ttl`.
pub fn issue(
    username: &str,
    ttl: chrono::Duration,
    key: &str,
    algorithm: Algorithm,
) -> Result<String> {
    let claims = Claims {
        sub: username.to_owned(),
        exp: (Utc::now() + ttl).timestamp(),
    };

    encode(
        &Header::new(algorithm),
        &claims,
        &EncodingKey::from_secret(key.as_bytes()),
    )
    .map_err(|e| Error::Config(format!("failed to sign session token: {e}")))
}

/// Verifies a session token and returns the embedded username.
///
/// Every failure mode (malformed token, wrong signature, expired, missing
/// subject) collapses to `None`; callers get no detail about which check
/// failed.
#[must_use]
pub fn verify(token: &str, key: &str, algorithm: Algorithm) -> Option<String> {
    let mut validation = Validation::new(algorithm);
    // Expiry is enforced below without leeway; a zero ttl is already expired.
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(key.as_bytes()),
        &validation,
    )
    .ok()?;

    if data.claims.exp <= Utc::now().timestamp() {
        return None;
    }

    Some(data.claims.sub)
}
