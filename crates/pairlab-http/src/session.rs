//! HTTP-backed session implementation.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{debug, instrument};

use pairlab_core::error::{Error, TransportError};
use pairlab_core::model::{
    AnnotateOutcome, AnnotateRequest, Annotator, AnnotatorForm, ClassOption, Dataset,
    DatasetAnnotator, DatasetDetails, NewDataset, TaskAssignment, TaskCouple, UserTasks,
};
use pairlab_core::traits::{AdminSession, AnnotatorSession, Session};
use pairlab_core::types::{ApiUrl, Role};
use pairlab_core::{AuthToken, Result};

use crate::api::HttpApi;
use crate::client::HttpClient;
use crate::endpoints::{self, *};

/// Session against a REST annotation API.
#[derive(Clone)]
pub struct HttpSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    login: String,
    role: Role,
    api: HttpApi,
    token: AuthToken,
}

impl HttpSession {
    pub(crate) fn new(api: HttpApi, login: String, role: Role, token: AuthToken) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                login,
                role,
                api,
                token,
            }),
        }
    }

    /// Restore a session from a persisted token.
    ///
    /// The role is read back from the token so a tampered session file
    /// cannot claim a role the token does not carry.
    pub fn from_persisted(api: ApiUrl, login: impl Into<String>, token: AuthToken) -> Result<Self> {
        let role = token.role()?;
        Ok(Self::new(HttpApi::new(api), login.into(), role, token))
    }

    fn client(&self) -> &HttpClient {
        self.inner.api.client()
    }
}

impl Session for HttpSession {
    fn login(&self) -> &str {
        &self.inner.login
    }

    fn role(&self) -> Role {
        self.inner.role
    }

    fn token(&self) -> AuthToken {
        self.inner.token.clone()
    }

    fn api_url(&self) -> &ApiUrl {
        self.client().api()
    }
}

#[async_trait]
impl AdminSession for HttpSession {
    #[instrument(skip(self), fields(login = %self.inner.login))]
    async fn list_datasets(&self) -> Result<Vec<Dataset>> {
        self.require_role(Role::Admin, "list datasets")?;
        debug!("Listing datasets");
        let response: DatasetsResponse =
            self.client().get(ADMIN_DATASETS, &self.inner.token).await?;
        Ok(response.datasets)
    }

    #[instrument(skip(self, dataset), fields(login = %self.inner.login, name = %dataset.name))]
    async fn create_dataset(&self, dataset: &NewDataset) -> Result<()> {
        self.require_role(Role::Admin, "create dataset")?;
        dataset.validate()?;

        let bytes = tokio::fs::read(&dataset.file)
            .await
            .map_err(TransportError::from)?;
        debug!(size = bytes.len(), "Uploading dataset");

        let file = Part::bytes(bytes).file_name(dataset.file_name());
        let form = Form::new()
            .text("name", dataset.name.clone())
            .text("description", dataset.description.clone())
            .text("classesRaw", dataset.classes_raw.clone())
            .part("file", file);

        self.client()
            .post_multipart(ADMIN_DATASETS, form, &self.inner.token)
            .await
    }

    #[instrument(
        skip(self, assignment),
        fields(login = %self.inner.login, dataset = assignment.dataset_id)
    )]
    async fn assign_task(&self, assignment: &TaskAssignment) -> Result<()> {
        self.require_role(Role::Admin, "assign task")?;
        assignment.validate_now()?;
        debug!(annotators = assignment.annotator_ids.len(), "Assigning dataset");

        self.client()
            .post_authed_no_response(
                &endpoints::assign_task(assignment.dataset_id),
                &assignment.body(),
                &self.inner.token,
            )
            .await
    }

    #[instrument(skip(self), fields(login = %self.inner.login))]
    async fn dataset_details(&self, dataset_id: i64) -> Result<DatasetDetails> {
        self.require_role(Role::Admin, "show dataset")?;
        debug!("Fetching dataset details");
        let query = PageQuery {
            page: 0,
            size: DETAILS_PAGE_SIZE,
        };
        self.client()
            .get_query(&endpoints::dataset_details(dataset_id), &query, &self.inner.token)
            .await
    }

    #[instrument(skip(self), fields(login = %self.inner.login))]
    async fn dataset_annotators(&self, dataset_id: i64) -> Result<Vec<DatasetAnnotator>> {
        self.require_role(Role::Admin, "show dataset")?;
        debug!("Fetching dataset annotators");
        self.client()
            .get(&endpoints::dataset_annotators(dataset_id), &self.inner.token)
            .await
    }

    #[instrument(skip(self), fields(login = %self.inner.login))]
    async fn list_annotators(&self) -> Result<Vec<Annotator>> {
        self.require_role(Role::Admin, "list annotators")?;
        debug!("Listing annotators");
        let response: AnnotatorsResponse =
            self.client().get(ADMIN_ANNOTATORS, &self.inner.token).await?;
        Ok(response.into_vec())
    }

    #[instrument(skip(self, form), fields(login = %self.inner.login, annotator = %form.login))]
    async fn save_annotator(&self, form: &AnnotatorForm) -> Result<()> {
        self.require_role(Role::Admin, "save annotator")?;
        form.validate()?;

        match form.id {
            Some(id) => {
                debug!(id, "Updating annotator");
                self.client()
                    .put_authed_no_response(&endpoints::annotator(id), form, &self.inner.token)
                    .await
            }
            None => {
                debug!("Creating annotator");
                self.client()
                    .post_authed_no_response(ADMIN_ANNOTATORS, form, &self.inner.token)
                    .await
            }
        }
    }

    #[instrument(skip(self), fields(login = %self.inner.login))]
    async fn delete_annotator(&self, annotator_id: i64) -> Result<()> {
        self.require_role(Role::Admin, "delete annotator")?;
        debug!("Deleting annotator");
        self.client()
            .delete_authed(&endpoints::annotator(annotator_id), &self.inner.token)
            .await
    }
}

#[async_trait]
impl AnnotatorSession for HttpSession {
    #[instrument(skip(self), fields(login = %self.inner.login))]
    async fn list_tasks(&self) -> Result<UserTasks> {
        self.require_role(Role::User, "list tasks")?;
        debug!("Listing tasks");
        self.client().get(USER_TASKS, &self.inner.token).await
    }

    #[instrument(skip(self), fields(login = %self.inner.login))]
    async fn task_couple(&self, task_id: i64, index: usize) -> Result<TaskCouple> {
        self.require_role(Role::User, "show task")?;
        debug!("Fetching couple");
        self.client()
            .get_query(&endpoints::user_task(task_id), &IndexQuery { index }, &self.inner.token)
            .await
    }

    #[instrument(skip(self), fields(login = %self.inner.login))]
    async fn task_classes(&self, task_id: i64) -> Result<Vec<ClassOption>> {
        self.require_role(Role::User, "list classes")?;
        debug!("Fetching classes");
        let response: ClassesResponse = self
            .client()
            .get(&endpoints::task_classes(task_id), &self.inner.token)
            .await?;
        Ok(response.classes)
    }

    #[instrument(
        skip(self, request),
        fields(login = %self.inner.login, couple = request.couple_id)
    )]
    async fn annotate(&self, task_id: i64, request: &AnnotateRequest) -> Result<AnnotateOutcome> {
        self.require_role(Role::User, "annotate")?;
        if request.class_selection.trim().is_empty() {
            return Err(Error::other("a class must be selected"));
        }
        debug!("Submitting annotation");
        self.client()
            .post_authed(&endpoints::annotate(task_id), request, &self.inner.token)
            .await
    }
}

impl std::fmt::Debug for HttpSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSession")
            .field("login", &self.inner.login)
            .field("role", &self.inner.role)
            .field("api", self.client().api())
            .field("token", &"[REDACTED]")
            .finish()
    }
}
