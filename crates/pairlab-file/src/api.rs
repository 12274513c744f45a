//! File-backed API implementation.

use std::path::Path;

use async_trait::async_trait;
use bcrypt::{DEFAULT_COST, hash, verify};
use serde_json::json;
use tracing::{debug, instrument};

use pairlab_core::error::{AuthError, Error, InvalidInputError};
use pairlab_core::model::Annotator;
use pairlab_core::tokens::unsigned_jwt;
use pairlab_core::traits::Api;
use pairlab_core::types::{ApiUrl, Role};
use pairlab_core::{AuthToken, Credentials, Result};

use crate::session::FileSession;
use crate::store::{FileStore, LocalAccount};

fn map_bcrypt(err: bcrypt::BcryptError) -> Error {
    Error::InvalidInput(InvalidInputError::Other {
        message: err.to_string(),
    })
}

/// Filesystem-backed annotation API.
#[derive(Debug, Clone)]
pub struct FileApi {
    store: FileStore,
    url: ApiUrl,
}

impl FileApi {
    /// Create a new file-backed API at the given root directory.
    pub fn new(root: impl AsRef<Path>, url: ApiUrl) -> Self {
        Self {
            store: FileStore::new(root),
            url,
        }
    }

    /// Open the store a `file://` URL points at.
    pub fn from_url(url: ApiUrl) -> Result<Self> {
        let root = url.to_file_path().ok_or_else(|| InvalidInputError::ApiUrl {
            value: url.to_string(),
            reason: "not a file:// URL".to_string(),
        })?;
        Ok(Self::new(root, url))
    }

    /// Access the underlying file store.
    pub(crate) fn store(&self) -> &FileStore {
        &self.store
    }

    /// Create a login account.
    ///
    /// User accounts also get an annotator record so tasks can be assigned
    /// to them.
    #[instrument(skip(self, password), fields(root = %self.store.root().display()))]
    pub async fn create_account(
        &self,
        login: &str,
        password: &str,
        role: Role,
    ) -> Result<LocalAccount> {
        if password.is_empty() {
            return Err(InvalidInputError::MissingField { field: "password" }.into());
        }

        let password_hash = hash(password, DEFAULT_COST).map_err(map_bcrypt)?;
        let account = self.store.create_account(login, role, &password_hash)?;

        if role == Role::User {
            self.store.update(|c| {
                if c.annotators.iter().all(|a| a.login.as_deref() != Some(login)) {
                    let id = c.annotators.iter().filter_map(|a| a.id).max().unwrap_or(0) + 1;
                    c.annotators.push(Annotator {
                        id: Some(id),
                        login: Some(login.to_string()),
                        ..Default::default()
                    });
                    debug!(id, "Registered annotator for account");
                }
                Ok(())
            })?;
        }

        Ok(account)
    }

    fn make_token(account: &LocalAccount) -> AuthToken {
        unsigned_jwt(&json!({
            "sub": account.login,
            "role": account.role.as_claim(),
        }))
    }

    /// Check a token against the account it names.
    pub(crate) fn validate_token(&self, token: &AuthToken) -> Result<LocalAccount> {
        let login = token
            .subject()?
            .ok_or_else(|| AuthError::InvalidCredentials("token has no subject".to_string()))?;
        let account = self.store.require_account(&login)?;

        if account.role != token.role()? {
            return Err(AuthError::InvalidCredentials(
                "token role does not match account".to_string(),
            )
            .into());
        }

        Ok(account)
    }
}

#[async_trait]
impl Api for FileApi {
    type Session = FileSession;

    fn url(&self) -> &ApiUrl {
        &self.url
    }

    #[instrument(skip(self, credentials), fields(login = %credentials.login()))]
    async fn login(&self, credentials: Credentials) -> Result<FileSession> {
        let account = self.store.require_account(credentials.login())?;

        let ok = verify(credentials.password(), &account.password_hash).map_err(map_bcrypt)?;
        if !ok {
            return Err(AuthError::InvalidCredentials("invalid password".to_string()).into());
        }

        debug!(role = %account.role, "Login succeeded");
        let token = Self::make_token(&account);
        Ok(FileSession::new(self.clone(), account.login, account.role, token))
    }
}
