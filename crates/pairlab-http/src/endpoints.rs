//! REST endpoint paths and wire-only request/response types.

use serde::{Deserialize, Serialize};

use pairlab_core::model::{Annotator, ClassOption, Dataset, null_as_default};

// ============================================================================
// Paths
// ============================================================================

pub const LOGIN: &str = "/api/auth/login";

pub const ADMIN_DATASETS: &str = "/api/admin/datasets";

pub const ADMIN_ANNOTATORS: &str = "/api/admin/annotateurs";

pub const USER_TASKS: &str = "/api/user/tasks";

/// Size requested from the paged details endpoint; large enough for any dataset.
pub const DETAILS_PAGE_SIZE: usize = 1000;

pub fn dataset_details(dataset_id: i64) -> String {
    format!("/api/admin/datasets/details/{}", dataset_id)
}

pub fn assign_task(dataset_id: i64) -> String {
    format!("/api/admin/tasks/datasets/{}/assign", dataset_id)
}

pub fn dataset_annotators(dataset_id: i64) -> String {
    format!("/api/admin/tasks/datasets/{}/annotators", dataset_id)
}

pub fn annotator(annotator_id: i64) -> String {
    format!("{}/{}", ADMIN_ANNOTATORS, annotator_id)
}

pub fn user_task(task_id: i64) -> String {
    format!("{}/{}", USER_TASKS, task_id)
}

pub fn task_classes(task_id: i64) -> String {
    format!("{}/{}/classes", USER_TASKS, task_id)
}

pub fn annotate(task_id: i64) -> String {
    format!("{}/{}/annotate", USER_TASKS, task_id)
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for login.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub login: &'a str,
    pub password: &'a str,
}

/// Response from login.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Response from the dataset list.
#[derive(Debug, Deserialize)]
pub struct DatasetsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub datasets: Vec<Dataset>,
}

/// The annotator list comes back bare or wrapped, depending on the server version.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AnnotatorsResponse {
    List(Vec<Annotator>),
    Wrapped {
        #[serde(alias = "data", default, deserialize_with = "null_as_default")]
        annotateurs: Vec<Annotator>,
    },
}

impl AnnotatorsResponse {
    pub fn into_vec(self) -> Vec<Annotator> {
        match self {
            AnnotatorsResponse::List(list) => list,
            AnnotatorsResponse::Wrapped { annotateurs } => annotateurs,
        }
    }
}

/// Query for the paged dataset details endpoint.
#[derive(Debug, Serialize)]
pub struct PageQuery {
    pub page: usize,
    pub size: usize,
}

/// Query selecting a couple within a task.
#[derive(Debug, Serialize)]
pub struct IndexQuery {
    pub index: usize,
}

/// Response from the task classes endpoint.
#[derive(Debug, Deserialize)]
pub struct ClassesResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub classes: Vec<ClassOption>,
}

/// Error body returned by the server.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
