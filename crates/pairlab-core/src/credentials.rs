//! Login credentials type.

use std::fmt;

/// Login credentials for the annotation API.
///
/// # Security
///
/// The password is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use pairlab_core::Credentials;
///
/// let creds = Credentials::new("amartin", "s3cret");
/// assert_eq!(creds.login(), "amartin");
/// ```
#[derive(Clone)]
pub struct Credentials {
    login: String,
    password: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
        }
    }

    /// Returns the account login.
    pub fn login(&self) -> &str {
        &self.login
    }

    /// Returns the password.
    ///
    /// Use this only when constructing authentication requests.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
