//! CLI session wrapper.

use async_trait::async_trait;

use pairlab_core::model::{
    AnnotateOutcome, AnnotateRequest, Annotator, AnnotatorForm, ClassOption, Dataset,
    DatasetAnnotator, DatasetDetails, NewDataset, TaskAssignment, TaskCouple, UserTasks,
};
use pairlab_core::traits::{AdminSession, AnnotatorSession, Session};
use pairlab_core::types::{ApiUrl, Role};
use pairlab_core::{AuthToken, Result};
use pairlab_file::FileSession;
use pairlab_http::HttpSession;

/// Session wrapper for CLI use.
#[derive(Debug, Clone)]
pub enum CliSession {
    File(FileSession),
    Http(HttpSession),
}

impl Session for CliSession {
    fn login(&self) -> &str {
        match self {
            CliSession::File(session) => session.login(),
            CliSession::Http(session) => session.login(),
        }
    }

    fn role(&self) -> Role {
        match self {
            CliSession::File(session) => session.role(),
            CliSession::Http(session) => session.role(),
        }
    }

    fn token(&self) -> AuthToken {
        match self {
            CliSession::File(session) => session.token(),
            CliSession::Http(session) => session.token(),
        }
    }

    fn api_url(&self) -> &ApiUrl {
        match self {
            CliSession::File(session) => session.api_url(),
            CliSession::Http(session) => session.api_url(),
        }
    }
}

#[async_trait]
impl AdminSession for CliSession {
    async fn list_datasets(&self) -> Result<Vec<Dataset>> {
        match self {
            CliSession::File(session) => session.list_datasets().await,
            CliSession::Http(session) => session.list_datasets().await,
        }
    }

    async fn create_dataset(&self, dataset: &NewDataset) -> Result<()> {
        match self {
            CliSession::File(session) => session.create_dataset(dataset).await,
            CliSession::Http(session) => session.create_dataset(dataset).await,
        }
    }

    async fn assign_task(&self, assignment: &TaskAssignment) -> Result<()> {
        match self {
            CliSession::File(session) => session.assign_task(assignment).await,
            CliSession::Http(session) => session.assign_task(assignment).await,
        }
    }

    async fn dataset_details(&self, dataset_id: i64) -> Result<DatasetDetails> {
        match self {
            CliSession::File(session) => session.dataset_details(dataset_id).await,
            CliSession::Http(session) => session.dataset_details(dataset_id).await,
        }
    }

    async fn dataset_annotators(&self, dataset_id: i64) -> Result<Vec<DatasetAnnotator>> {
        match self {
            CliSession::File(session) => session.dataset_annotators(dataset_id).await,
            CliSession::Http(session) => session.dataset_annotators(dataset_id).await,
        }
    }

    async fn list_annotators(&self) -> Result<Vec<Annotator>> {
        match self {
            CliSession::File(session) => session.list_annotators().await,
            CliSession::Http(session) => session.list_annotators().await,
        }
    }

    async fn save_annotator(&self, form: &AnnotatorForm) -> Result<()> {
        match self {
            CliSession::File(session) => session.save_annotator(form).await,
            CliSession::Http(session) => session.save_annotator(form).await,
        }
    }

    async fn delete_annotator(&self, annotator_id: i64) -> Result<()> {
        match self {
            CliSession::File(session) => session.delete_annotator(annotator_id).await,
            CliSession::Http(session) => session.delete_annotator(annotator_id).await,
        }
    }
}

#[async_trait]
impl AnnotatorSession for CliSession {
    async fn list_tasks(&self) -> Result<UserTasks> {
        match self {
            CliSession::File(session) => session.list_tasks().await,
            CliSession::Http(session) => session.list_tasks().await,
        }
    }

    async fn task_couple(&self, task_id: i64, index: usize) -> Result<TaskCouple> {
        match self {
            CliSession::File(session) => session.task_couple(task_id, index).await,
            CliSession::Http(session) => session.task_couple(task_id, index).await,
        }
    }

    async fn task_classes(&self, task_id: i64) -> Result<Vec<ClassOption>> {
        match self {
            CliSession::File(session) => session.task_classes(task_id).await,
            CliSession::Http(session) => session.task_classes(task_id).await,
        }
    }

    async fn annotate(&self, task_id: i64, request: &AnnotateRequest) -> Result<AnnotateOutcome> {
        match self {
            CliSession::File(session) => session.annotate(task_id, request).await,
            CliSession::Http(session) => session.annotate(task_id, request).await,
        }
    }
}
