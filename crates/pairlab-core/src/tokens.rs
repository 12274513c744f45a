//! Bearer token type.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

use crate::error::{AuthError, Error};
use crate::types::Role;

/// A bearer token returned by the login endpoint.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Claims are read without signature verification; the server stays the authority
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

impl AuthToken {
    /// Wrap a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in authorization headers.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn claims(&self) -> Result<Claims, Error> {
        let payload = self
            .0
            .split('.')
            .nth(1)
            .ok_or_else(|| AuthError::InvalidCredentials("token is not a JWT".to_string()))?;

        // Some issuers pad the payload segment.
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| AuthError::InvalidCredentials(format!("token payload: {}", e)))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| AuthError::InvalidCredentials(format!("token claims: {}", e)).into())
    }

    /// Read the `role` claim from a JWT payload.
    pub fn role(&self) -> Result<Role, Error> {
        let role = self
            .claims()?
            .role
            .ok_or_else(|| AuthError::InvalidCredentials("token has no role claim".to_string()))?;

        role.parse()
    }

    /// Read the `sub` claim, if the issuer sets one.
    pub fn subject(&self) -> Result<Option<String>, Error> {
        Ok(self.claims()?.sub)
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AuthToken").field(&"[REDACTED]").finish()
    }
}

/// Build an unsigned JWT carrying the given claims.
///
/// Used by the file backend and by tests; the signature segment is empty.
pub fn unsigned_jwt(claims: &serde_json::Value) -> AuthToken {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    AuthToken::new(format!("{}.{}.", header, payload))
}
