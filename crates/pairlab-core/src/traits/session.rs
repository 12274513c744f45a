//! Authenticated session trait.

use crate::error::AuthError;
use crate::types::{ApiUrl, Role};
use crate::{AuthToken, Result};

/// An authenticated session.
pub trait Session: Send + Sync {
    /// Login of the signed-in account.
    fn login(&self) -> &str;

    /// Role carried by the session token.
    fn role(&self) -> Role;

    /// Returns the bearer token for this session.
    fn token(&self) -> AuthToken;

    /// Returns the API base URL associated with this session.
    fn api_url(&self) -> &ApiUrl;

    /// Fail with [`AuthError::Forbidden`] unless the session holds `required`.
    fn require_role(&self, required: Role, operation: &'static str) -> Result<()> {
        if self.role() == required {
            Ok(())
        } else {
            Err(AuthError::Forbidden {
                operation,
                required: required.name(),
            }
            .into())
        }
    }
}
