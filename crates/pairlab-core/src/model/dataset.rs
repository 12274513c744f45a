//! Dataset, task and assignment types.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, InvalidInputError};

/// Minimum number of annotators a dataset must be assigned to.
pub const MIN_ANNOTATORS_PER_ASSIGNMENT: usize = 3;

/// One text pair to classify.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Couple {
    pub id: i64,
    #[serde(rename = "text_1", default, deserialize_with = "super::null_as_default")]
    pub text_1: String,
    #[serde(rename = "text_2", default, deserialize_with = "super::null_as_default")]
    pub text_2: String,
    #[serde(rename = "originalId", default, skip_serializing_if = "Option::is_none")]
    pub original_id: Option<i64>,
}

/// The annotator summary embedded in a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAnnotator {
    pub id: i64,
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// An assignment of a dataset's couples to one annotator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    /// Deadline as sent by the server.
    #[serde(rename = "dateLimite", default)]
    pub deadline: Option<String>,
    #[serde(rename = "annotateur", default)]
    pub annotator: Option<TaskAnnotator>,
    /// `None` while the task has not been completed.
    #[serde(default)]
    pub couples: Option<Vec<Couple>>,
}

impl Task {
    /// A task is completed once the server reports its couples.
    pub fn is_completed(&self) -> bool {
        self.couples.is_some()
    }

    /// Number of couples reported for this task.
    pub fn couple_count(&self) -> usize {
        self.couples.as_ref().map_or(0, Vec::len)
    }
}

/// A dataset as listed by the admin API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "fileType", default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub tasks: Option<Vec<Task>>,
}

impl Dataset {
    /// Tasks of this dataset, empty when the server sent none.
    pub fn tasks(&self) -> &[Task] {
        self.tasks.as_deref().unwrap_or_default()
    }

    /// Display name, empty when missing.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Derived assignment status.
    pub fn status(&self) -> DatasetStatus {
        let tasks = self.tasks();
        if tasks.is_empty() {
            DatasetStatus::Unassigned
        } else if tasks.iter().all(Task::is_completed) {
            DatasetStatus::Completed
        } else {
            DatasetStatus::InProgress
        }
    }

    /// Completed tasks as a percentage of all tasks.
    pub fn progress(&self) -> f64 {
        let tasks = self.tasks();
        if tasks.is_empty() {
            return 0.0;
        }
        let completed = tasks.iter().filter(|t| t.is_completed()).count();
        completed as f64 / tasks.len() as f64 * 100.0
    }

    /// Total couples across all tasks.
    pub fn total_couples(&self) -> usize {
        self.tasks().iter().map(Task::couple_count).sum()
    }
}

/// Assignment status of a dataset.
///
/// The declaration order is the order of a status sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DatasetStatus {
    Unassigned,
    InProgress,
    Completed,
}

impl DatasetStatus {
    pub const ALL: [DatasetStatus; 3] = [
        DatasetStatus::Unassigned,
        DatasetStatus::InProgress,
        DatasetStatus::Completed,
    ];

    /// Flag name used by category filters.
    pub fn flag(&self) -> &'static str {
        match self {
            DatasetStatus::Unassigned => "unassigned",
            DatasetStatus::InProgress => "in-progress",
            DatasetStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for DatasetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DatasetStatus::Unassigned => "Unassigned",
            DatasetStatus::InProgress => "In Progress",
            DatasetStatus::Completed => "Completed",
        })
    }
}

impl FromStr for DatasetStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DatasetStatus::ALL
            .into_iter()
            .find(|status| status.flag() == s)
            .ok_or_else(|| Error::other(format!("unknown dataset status '{}'", s)))
    }
}

/// Status counts over a dataset collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DatasetStats {
    pub completed: usize,
    pub in_progress: usize,
    pub unassigned: usize,
}

impl DatasetStats {
    pub fn from_datasets(datasets: &[Dataset]) -> Self {
        let mut stats = Self::default();
        for dataset in datasets {
            match dataset.status() {
                DatasetStatus::Completed => stats.completed += 1,
                DatasetStatus::InProgress => stats.in_progress += 1,
                DatasetStatus::Unassigned => stats.unassigned += 1,
            }
        }
        stats
    }
}

/// Form data for uploading a new dataset.
#[derive(Debug, Clone)]
pub struct NewDataset {
    pub name: String,
    pub description: String,
    /// Comma-separated class labels, sent as `classesRaw`.
    pub classes_raw: String,
    pub file: PathBuf,
}

impl NewDataset {
    /// Check that every field is filled in and the file exists.
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(InvalidInputError::MissingField { field: "name" }.into());
        }
        if self.description.trim().is_empty() {
            return Err(InvalidInputError::MissingField {
                field: "description",
            }
            .into());
        }
        if self.classes().is_empty() {
            return Err(InvalidInputError::MissingField { field: "classes" }.into());
        }
        if !self.file.is_file() {
            return Err(Error::other(format!(
                "dataset file '{}' does not exist",
                self.file.display()
            )));
        }
        Ok(())
    }

    /// Class labels, trimmed with empties dropped.
    pub fn classes(&self) -> Vec<String> {
        self.classes_raw
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// File name sent with the upload.
    pub fn file_name(&self) -> String {
        self.file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dataset".to_string())
    }
}

/// A request to assign a dataset to annotators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskAssignment {
    pub dataset_id: i64,
    pub annotator_ids: Vec<i64>,
    pub deadline: NaiveDate,
}

/// Wire body of an assignment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentBody {
    pub annotator_ids: Vec<i64>,
    /// Milliseconds since the epoch at UTC midnight of the deadline.
    pub deadline: i64,
}

impl TaskAssignment {
    /// Build an assignment, dropping duplicate annotator ids.
    pub fn new(dataset_id: i64, annotator_ids: &[i64], deadline: NaiveDate) -> Self {
        let mut seen = BTreeSet::new();
        let annotator_ids = annotator_ids
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .collect();
        Self {
            dataset_id,
            annotator_ids,
            deadline,
        }
    }

    /// Validate against the current date.
    pub fn validate(&self, today: NaiveDate) -> Result<(), Error> {
        if self.annotator_ids.len() < MIN_ANNOTATORS_PER_ASSIGNMENT {
            return Err(InvalidInputError::Assignment {
                reason: format!(
                    "select at least {} annotators ({} given)",
                    MIN_ANNOTATORS_PER_ASSIGNMENT,
                    self.annotator_ids.len()
                ),
            }
            .into());
        }
        if self.deadline < today {
            return Err(InvalidInputError::Assignment {
                reason: format!("deadline {} is in the past", self.deadline),
            }
            .into());
        }
        Ok(())
    }

    /// Validate against today's UTC date, the calendar the wire deadline uses.
    pub fn validate_now(&self) -> Result<(), Error> {
        self.validate(Utc::now().date_naive())
    }

    pub fn body(&self) -> AssignmentBody {
        AssignmentBody {
            annotator_ids: self.annotator_ids.clone(),
            deadline: self
                .deadline
                .and_hms_opt(0, 0, 0)
                .map(|dt| dt.and_utc().timestamp_millis())
                .unwrap_or_default(),
        }
    }
}

/// One annotation made on a couple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: i64,
    #[serde(rename = "coupleText", default)]
    pub couple_text: Option<Couple>,
    #[serde(rename = "chosenClass", default, deserialize_with = "super::null_as_default")]
    pub chosen_class: String,
}

/// An annotator of a dataset together with their annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetAnnotator {
    pub id: i64,
    #[serde(rename = "nom", default)]
    pub last_name: Option<String>,
    #[serde(rename = "prenom", default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub annotations: Vec<Annotation>,
}

impl DatasetAnnotator {
    /// True when any annotation references a couple.
    pub fn has_annotated(&self) -> bool {
        self.annotations.iter().any(|a| a.couple_text.is_some())
    }
}

/// Which annotators the dataset detail screen shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnnotationFilter {
    #[default]
    All,
    Annotated,
    NotAnnotated,
}

impl AnnotationFilter {
    pub fn accepts(&self, annotator: &DatasetAnnotator) -> bool {
        match self {
            AnnotationFilter::All => true,
            AnnotationFilter::Annotated => annotator.has_annotated(),
            AnnotationFilter::NotAnnotated => !annotator.has_annotated(),
        }
    }
}

impl FromStr for AnnotationFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(AnnotationFilter::All),
            "annotated" => Ok(AnnotationFilter::Annotated),
            "not-annotated" | "not_annotated" => Ok(AnnotationFilter::NotAnnotated),
            other => Err(Error::other(format!("unknown annotation filter '{}'", other))),
        }
    }
}

/// Full detail of one dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetDetails {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub tasks: Vec<Task>,
    #[serde(rename = "coupleTexts", default, deserialize_with = "super::null_as_default")]
    pub couple_texts: Vec<Couple>,
}

impl DatasetDetails {
    /// Couples assigned through tasks.
    pub fn total_text_pairs(&self) -> usize {
        self.tasks.iter().map(Task::couple_count).sum()
    }
}

/// The class chosen for a couple by any annotator, if annotated.
pub fn annotation_class_for(annotators: &[DatasetAnnotator], couple_id: i64) -> Option<&str> {
    annotators
        .iter()
        .flat_map(|a| a.annotations.iter())
        .find(|a| a.couple_text.as_ref().is_some_and(|c| c.id == couple_id))
        .map(|a| a.chosen_class.as_str())
}
