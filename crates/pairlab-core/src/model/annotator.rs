//! Annotator account types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, InvalidInputError};

/// An annotator account as listed by the admin API.
///
/// Any field may be missing or `null` on malformed records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotator {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "nom", default)]
    pub last_name: Option<String>,
    #[serde(rename = "prenom", default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub deleted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<serde_json::Value>,
}

impl Annotator {
    pub fn status(&self) -> AnnotatorStatus {
        if self.deleted {
            AnnotatorStatus::Inactive
        } else {
            AnnotatorStatus::Active
        }
    }

    /// "First Last", skipping missing parts.
    pub fn full_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Whether an annotator account is usable.
///
/// The declaration order is the order of a status sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotatorStatus {
    Active,
    Inactive,
}

impl AnnotatorStatus {
    pub const ALL: [AnnotatorStatus; 2] = [AnnotatorStatus::Active, AnnotatorStatus::Inactive];

    pub fn flag(&self) -> &'static str {
        match self {
            AnnotatorStatus::Active => "active",
            AnnotatorStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for AnnotatorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AnnotatorStatus::Active => "Active",
            AnnotatorStatus::Inactive => "Inactive",
        })
    }
}

impl FromStr for AnnotatorStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnnotatorStatus::ALL
            .into_iter()
            .find(|status| status.flag() == s)
            .ok_or_else(|| Error::other(format!("unknown annotator status '{}'", s)))
    }
}

/// Active/inactive counts over an annotator collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AnnotatorStats {
    pub active: usize,
    pub inactive: usize,
}

impl AnnotatorStats {
    pub fn from_annotators(annotators: &[Annotator]) -> Self {
        let inactive = annotators.iter().filter(|a| a.deleted).count();
        Self {
            active: annotators.len() - inactive,
            inactive,
        }
    }
}

/// Create-or-update form for an annotator.
///
/// Without an `id` the form creates a new account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatorForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "nom")]
    pub last_name: String,
    #[serde(rename = "prenom")]
    pub first_name: String,
    pub login: String,
}

impl AnnotatorForm {
    /// Prefill an edit form from an existing record.
    pub fn edit(annotator: &Annotator) -> Self {
        Self {
            id: annotator.id,
            last_name: annotator.last_name.clone().unwrap_or_default(),
            first_name: annotator.first_name.clone().unwrap_or_default(),
            login: annotator.login.clone().unwrap_or_default(),
        }
    }

    pub fn is_update(&self) -> bool {
        self.id.is_some()
    }

    pub fn validate(&self) -> Result<(), Error> {
        for (field, value) in [
            ("nom", &self.last_name),
            ("prenom", &self.first_name),
            ("login", &self.login),
        ] {
            if value.trim().is_empty() {
                return Err(InvalidInputError::MissingField { field }.into());
            }
        }
        Ok(())
    }
}

/// Annotators that can receive a new assignment.
pub fn assignable(annotators: &[Annotator]) -> Vec<Annotator> {
    annotators.iter().filter(|a| !a.deleted).cloned().collect()
}
