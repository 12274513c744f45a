//! API backend trait.

use async_trait::async_trait;

use crate::types::ApiUrl;
use crate::{Credentials, Result};

use super::Session;

/// An annotation API backend.
#[async_trait]
pub trait Api: Send + Sync {
    /// Session type for this backend.
    type Session: Session;

    /// Returns the base URL for this instance.
    fn url(&self) -> &ApiUrl;

    /// Authenticate and create a new session.
    async fn login(&self, credentials: Credentials) -> Result<Self::Session>;
}
