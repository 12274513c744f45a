//! Filesystem storage for the file-backed API.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::Utc;
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use pairlab_core::error::{AuthError, Error, InvalidInputError, TransportError};
use pairlab_core::{Result, Role};

use crate::records::Collections;

pub(crate) fn map_io(err: std::io::Error) -> Error {
    Error::Transport(TransportError::Io {
        message: err.to_string(),
    })
}

pub(crate) fn map_json(err: serde_json::Error) -> Error {
    Error::InvalidInput(InvalidInputError::Other {
        message: err.to_string(),
    })
}

/// Account stored in the local backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalAccount {
    pub login: String,
    pub role: Role,
    /// When the account was created.
    pub created_at: String,
    /// Password hash (bcrypt).
    pub password_hash: String,
}

/// Filesystem-backed storage.
///
/// ```text
/// <root>/
///   accounts/<login>.json
///   datasets.json
///   annotators.json
///   assignments.json
///   annotations.json
///   pairlab.lock
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub const DATASETS: &'static str = "datasets.json";
    pub const ANNOTATORS: &'static str = "annotators.json";
    pub const ASSIGNMENTS: &'static str = "assignments.json";
    pub const ANNOTATIONS: &'static str = "annotations.json";

    /// Create a new file store at the given root directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn accounts_dir(&self) -> PathBuf {
        self.root.join("accounts")
    }

    fn account_path(&self, login: &str) -> Result<PathBuf> {
        if login.is_empty()
            || login.starts_with('.')
            || login.contains(['/', '\\', ':'])
            || login.chars().any(char::is_whitespace)
        {
            return Err(Error::other(format!("login '{}' is not usable", login)));
        }
        Ok(self.accounts_dir().join(format!("{}.json", login)))
    }

    fn lock_path(&self) -> PathBuf {
        self.root.join("pairlab.lock")
    }

    /// Run `f` while holding the store's exclusive lock.
    fn with_lock<T>(&self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        fs::create_dir_all(&self.root).map_err(map_io)?;

        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())
            .map_err(map_io)?;

        lock_file.lock_exclusive().map_err(map_io)?;
        trace!("Store locked");

        let result = f();

        lock_file.unlock().map_err(map_io)?;
        result
    }

    /// Read a JSON collection; a missing file reads as empty.
    fn read_json<T: DeserializeOwned + Default>(&self, name: &str) -> Result<T> {
        let path = self.root.join(name);
        if !path.exists() {
            return Ok(T::default());
        }
        let content = fs::read_to_string(&path).map_err(map_io)?;
        serde_json::from_str(&content).map_err(map_json)
    }

    fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.root.join(name);
        let content = serde_json::to_string_pretty(value).map_err(map_json)?;

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, content).map_err(map_io)?;
        fs::rename(&temp_path, &path).map_err(map_io)?;
        Ok(())
    }

    /// Load every collection.
    pub(crate) fn load(&self) -> Result<Collections> {
        Ok(Collections {
            datasets: self.read_json(Self::DATASETS)?,
            annotators: self.read_json(Self::ANNOTATORS)?,
            tasks: self.read_json(Self::ASSIGNMENTS)?,
            annotations: self.read_json(Self::ANNOTATIONS)?,
        })
    }

    /// Apply `f` to the collections under the lock and persist the result.
    ///
    /// Nothing is written when `f` fails.
    pub(crate) fn update<T>(&self, f: impl FnOnce(&mut Collections) -> Result<T>) -> Result<T> {
        self.with_lock(|| {
            let mut collections = self.load()?;
            let out = f(&mut collections)?;
            self.write_json(Self::DATASETS, &collections.datasets)?;
            self.write_json(Self::ANNOTATORS, &collections.annotators)?;
            self.write_json(Self::ASSIGNMENTS, &collections.tasks)?;
            self.write_json(Self::ANNOTATIONS, &collections.annotations)?;
            Ok(out)
        })
    }

    // ========================================================================
    // Account Management
    // ========================================================================

    #[instrument(skip(self, password_hash))]
    pub fn create_account(
        &self,
        login: &str,
        role: Role,
        password_hash: &str,
    ) -> Result<LocalAccount> {
        let path = self.account_path(login)?;

        self.with_lock(|| {
            if path.exists() {
                return Err(Error::other(format!("account '{}' already exists", login)));
            }

            let account = LocalAccount {
                login: login.to_string(),
                role,
                created_at: Utc::now().to_rfc3339(),
                password_hash: password_hash.to_string(),
            };

            fs::create_dir_all(self.accounts_dir()).map_err(map_io)?;
            let content = serde_json::to_string_pretty(&account).map_err(map_json)?;
            fs::write(&path, content).map_err(map_io)?;

            debug!(%login, %role, "Created local account");
            Ok(account)
        })
    }

    pub fn get_account(&self, login: &str) -> Result<Option<LocalAccount>> {
        let path = self.account_path(login)?;

        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).map_err(map_io)?;
        let account = serde_json::from_str(&content).map_err(map_json)?;
        Ok(Some(account))
    }

    /// Fetch an account that must exist.
    pub(crate) fn require_account(&self, login: &str) -> Result<LocalAccount> {
        self.get_account(login)?
            .ok_or_else(|| AuthError::InvalidCredentials("account not found".to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_collections_read_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        let collections = store.load().unwrap();
        assert!(collections.datasets.is_empty());
        assert!(collections.annotators.is_empty());
    }

    #[test]
    fn failed_update_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        let result: Result<()> = store.update(|c| {
            c.annotators.push(Default::default());
            Err(Error::other("boom"))
        });

        assert!(result.is_err());
        assert!(!dir.path().join(FileStore::ANNOTATORS).exists());
    }

    #[test]
    fn account_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        store.create_account("admin", Role::Admin, "hash").unwrap();
        let account = store.get_account("admin").unwrap().unwrap();

        assert_eq!(account.role, Role::Admin);
        assert!(store.get_account("nobody").unwrap().is_none());
        assert!(store.create_account("admin", Role::User, "hash").is_err());
    }

    #[test]
    fn rejects_path_like_logins() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        assert!(store.get_account("../etc").is_err());
        assert!(store.get_account("a/b").is_err());
        assert!(store.get_account("").is_err());
    }
}
