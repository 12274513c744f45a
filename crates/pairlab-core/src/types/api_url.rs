//! API base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated annotation API base URL.
///
/// Supports both network URLs (HTTPS/HTTP) and local filesystem URLs
/// (`file://`).
///
/// # Network URLs
///
/// Network URLs must use HTTPS (or HTTP for localhost) and point at the
/// remote annotation server.
///
/// # File URLs
///
/// File URLs (`file:///path/to/store`) select the filesystem backend for
/// offline work and tests.
///
/// # Example
///
/// ```
/// use pairlab_core::ApiUrl;
///
/// let api = ApiUrl::new("http://localhost:8080").unwrap();
/// assert_eq!(api.endpoint("/api/admin/datasets"),
///            "http://localhost:8080/api/admin/datasets");
///
/// let local = ApiUrl::new("file:///tmp/pairlab").unwrap();
/// assert!(local.is_local());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Default base URL of the annotation server.
    pub const DEFAULT: &'static str = "http://localhost:8080";

    /// Create a new API URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::ApiUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        // Normalize: remove trailing slash
        let normalized = if url.path() == "/" {
            let mut u = url.clone();
            u.set_path("");
            u
        } else {
            url
        };

        Ok(Self(normalized))
    }

    /// Returns the full URL for an API path such as `/api/user/tasks`.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/{}", base, path.trim_start_matches('/'))
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    /// Returns the URL scheme.
    pub fn scheme(&self) -> &str {
        self.0.scheme()
    }

    /// Returns true if this selects the filesystem backend (file:// URL).
    pub fn is_local(&self) -> bool {
        self.0.scheme() == "file"
    }

    /// Returns true if this is a network API (http:// or https:// URL).
    pub fn is_network(&self) -> bool {
        let scheme = self.0.scheme();
        scheme == "http" || scheme == "https"
    }

    /// Returns the filesystem path for file:// URLs.
    pub fn to_file_path(&self) -> Option<PathBuf> {
        if self.is_local() {
            self.0.to_file_path().ok()
        } else {
            None
        }
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let scheme = url.scheme();

        if scheme == "file" {
            if url.path().is_empty() {
                return Err(InvalidInputError::ApiUrl {
                    value: original.to_string(),
                    reason: "file:// URL must have a path".to_string(),
                }
                .into());
            }
            return Ok(());
        }

        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]");

        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl Default for ApiUrl {
    fn default() -> Self {
        Self(Url::parse(Self::DEFAULT).expect("default API URL is valid"))
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApiUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ApiUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let api = ApiUrl::new("https://annotation.example.org").unwrap();
        assert_eq!(api.host(), Some("annotation.example.org"));
    }

    #[test]
    fn valid_localhost_http() {
        let api = ApiUrl::new("http://localhost:8080").unwrap();
        assert_eq!(api.host(), Some("localhost"));
    }

    #[test]
    fn default_points_at_local_server() {
        assert_eq!(
            ApiUrl::default().endpoint("/api/auth/login"),
            "http://localhost:8080/api/auth/login"
        );
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let api = ApiUrl::new("http://localhost:8080/").unwrap();
        assert_eq!(
            api.endpoint("/api/admin/datasets"),
            "http://localhost:8080/api/admin/datasets"
        );
        assert_eq!(
            api.endpoint("api/user/tasks"),
            "http://localhost:8080/api/user/tasks"
        );
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let api = ApiUrl::new("https://example.org/annotation").unwrap();
        assert_eq!(
            api.endpoint("/api/user/tasks"),
            "https://example.org/annotation/api/user/tasks"
        );
    }

    #[test]
    fn invalid_http_non_localhost() {
        assert!(ApiUrl::new("http://example.org").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(ApiUrl::new("/api/admin").is_err());
    }

    #[test]
    fn valid_file_url() {
        let api = ApiUrl::new("file:///tmp/pairlab").unwrap();
        assert!(api.is_local());
        assert!(!api.is_network());
        assert_eq!(api.scheme(), "file");
    }

    #[cfg(unix)]
    #[test]
    fn file_url_to_path() {
        let api = ApiUrl::new("file:///tmp/pairlab").unwrap();
        assert_eq!(
            api.to_file_path().unwrap(),
            std::path::PathBuf::from("/tmp/pairlab")
        );
    }

    #[test]
    fn network_url_not_local() {
        let api = ApiUrl::new("https://example.org").unwrap();
        assert!(!api.is_local());
        assert!(api.is_network());
        assert!(api.to_file_path().is_none());
    }
}
