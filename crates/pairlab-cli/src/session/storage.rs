//! Session storage for persisting login state.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use pairlab_core::traits::Session;
use pairlab_core::{ApiUrl, AuthToken};
use pairlab_file::{FileApi, FileSession};
use pairlab_http::HttpSession;

use super::CliSession;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Stored session data.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    login: String,
    api: String,
    token: String,
}

/// Get the session file path.
fn session_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "pairlab").context("Could not determine data directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join("session.json"))
}

/// Save a session to disk.
pub async fn save_session(session: &CliSession) -> Result<()> {
    let stored = StoredSession {
        login: session.login().to_string(),
        api: session.api_url().to_string(),
        token: session.token().as_str().to_string(),
    };

    let path = session_path()?;
    let json = serde_json::to_string_pretty(&stored)?;

    fs::write(&path, &json).context("Failed to write session file")?;

    // Set restrictive permissions (Unix only)
    #[cfg(unix)]
    {
        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&path, perms)?;
    }

    Ok(())
}

/// Load a session from disk.
pub async fn load_session() -> Result<Option<CliSession>> {
    let path = session_path()?;

    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(&path).context("Failed to read session file")?;
    let stored: StoredSession = serde_json::from_str(&json).context("Invalid session file")?;

    let api = ApiUrl::new(&stored.api).context("Invalid API URL in session")?;
    let token = AuthToken::new(stored.token);

    if api.is_local() {
        let file_api = FileApi::from_url(api).context("Failed to open local store")?;
        let session = FileSession::from_persisted(file_api, token)
            .context("Stored session is no longer valid")?;
        Ok(Some(CliSession::File(session)))
    } else {
        let session = HttpSession::from_persisted(api, stored.login, token)
            .context("Stored session is no longer valid")?;
        Ok(Some(CliSession::Http(session)))
    }
}

/// Load the session or fail with a hint to log in.
pub async fn require_session() -> Result<CliSession> {
    load_session()
        .await
        .context("Failed to load session")?
        .context("No active session. Run 'pairlab login' first.")
}

/// Clear the stored session. Returns whether one existed.
pub async fn clear_session() -> Result<bool> {
    let path = session_path()?;

    if path.exists() {
        fs::remove_file(&path).context("Failed to remove session file")?;
        return Ok(true);
    }

    Ok(false)
}
