//! Annotator-side task types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::dataset::Couple;

/// Reference to the dataset a task belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRef {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

/// A task as listed for the signed-in annotator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserTask {
    pub id: i64,
    #[serde(rename = "dateLimite", default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub dataset: Option<DatasetRef>,
}

/// The signed-in annotator's task list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserTasks {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub tasks: Vec<UserTask>,
    #[serde(rename = "userName", default, deserialize_with = "super::null_as_default")]
    pub user_name: String,
    /// Percent complete keyed by task id.
    #[serde(rename = "taskProgressMap", default, deserialize_with = "super::null_as_default")]
    pub progress: BTreeMap<String, f64>,
}

impl UserTasks {
    pub fn progress_for(&self, task_id: i64) -> f64 {
        self.progress
            .get(&task_id.to_string())
            .copied()
            .unwrap_or(0.0)
    }
}

/// One couple of a task, positioned by index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCouple {
    #[serde(rename = "currentCouple")]
    pub current_couple: Couple,
    #[serde(rename = "totalCouples", default)]
    pub total_couples: usize,
    #[serde(rename = "userName", default, deserialize_with = "super::null_as_default")]
    pub user_name: String,
}

/// A class an annotator can choose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassOption {
    pub id: i64,
    #[serde(rename = "textClass")]
    pub text_class: String,
}

/// A classification submitted for one couple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateRequest {
    pub couple_id: i64,
    pub class_selection: String,
    #[serde(default)]
    pub notes: String,
    pub current_index: usize,
}

/// Server reply to an annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateOutcome {
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completion_message: Option<String>,
    #[serde(default)]
    pub next_index: Option<usize>,
}

/// Position within a task's couples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoupleCursor {
    index: usize,
    total: usize,
}

impl CoupleCursor {
    /// Start at `index`, clamped into the task.
    pub fn new(index: usize, total: usize) -> Self {
        Self {
            index: index.min(total.saturating_sub(1)),
            total,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// The following couple, if any.
    pub fn next(&self) -> Option<Self> {
        (self.index + 1 < self.total).then(|| Self {
            index: self.index + 1,
            total: self.total,
        })
    }

    /// The preceding couple, if any.
    pub fn previous(&self) -> Option<Self> {
        (self.index > 0).then(|| Self {
            index: self.index - 1,
            total: self.total,
        })
    }
}
