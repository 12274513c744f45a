//! Annotator operations.

use async_trait::async_trait;

use crate::Result;
use crate::model::{AnnotateOutcome, AnnotateRequest, ClassOption, TaskCouple, UserTasks};

use super::Session;

/// Operations available to an annotator session.
#[async_trait]
pub trait AnnotatorSession: Session {
    /// Tasks assigned to the signed-in annotator.
    async fn list_tasks(&self) -> Result<UserTasks>;

    /// The couple at `index` within a task.
    async fn task_couple(&self, task_id: i64, index: usize) -> Result<TaskCouple>;

    /// Classes the annotator can choose from for a task.
    async fn task_classes(&self, task_id: i64) -> Result<Vec<ClassOption>>;

    /// Submit a classification.
    async fn annotate(&self, task_id: i64, request: &AnnotateRequest) -> Result<AnnotateOutcome>;
}
