//! Account role.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AuthError, Error};

/// The role an account holds on the annotation server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Manages datasets, annotators and assignments.
    #[serde(rename = "ROLE_ADMIN_ROLE")]
    Admin,
    /// Annotates the text pairs of assigned tasks.
    #[serde(rename = "ROLE_USER_ROLE")]
    User,
}

impl Role {
    /// The claim value the server puts in tokens.
    pub fn as_claim(&self) -> &'static str {
        match self {
            Role::Admin => "ROLE_ADMIN_ROLE",
            Role::User => "ROLE_USER_ROLE",
        }
    }

    /// Short human name.
    pub fn name(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = Error;

    /// Accepts both the claim form and the short name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ROLE_ADMIN_ROLE" | "admin" => Ok(Role::Admin),
            "ROLE_USER_ROLE" | "user" => Ok(Role::User),
            other => Err(AuthError::UnknownRole(other.to_string()).into()),
        }
    }
}
