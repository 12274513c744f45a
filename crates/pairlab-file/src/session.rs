//! File-backed session implementation.

use async_trait::async_trait;
use tracing::{debug, instrument};

use pairlab_core::error::{AuthError, Error};
use pairlab_core::model::{
    AnnotateOutcome, AnnotateRequest, Annotator, AnnotatorForm, ClassOption, Dataset,
    DatasetAnnotator, DatasetDetails, NewDataset, TaskAssignment, TaskCouple, UserTasks,
};
use pairlab_core::traits::{AdminSession, AnnotatorSession, Api, Session};
use pairlab_core::types::{ApiUrl, Role};
use pairlab_core::{AuthToken, Result};

use crate::api::FileApi;
use crate::records::Collections;
use crate::store::map_io;

/// Session for a file-backed API.
#[derive(Clone)]
pub struct FileSession {
    api: FileApi,
    login: String,
    role: Role,
    token: AuthToken,
}

impl FileSession {
    pub(crate) fn new(api: FileApi, login: String, role: Role, token: AuthToken) -> Self {
        Self {
            api,
            login,
            role,
            token,
        }
    }

    /// Restore a session from a persisted token.
    pub fn from_persisted(api: FileApi, token: AuthToken) -> Result<Self> {
        let account = api.validate_token(&token)?;
        Ok(Self::new(api, account.login, account.role, token))
    }

    /// Role guard plus a fresh token check, since the account may be gone.
    fn authorize(&self, required: Role, operation: &'static str) -> Result<()> {
        self.require_role(required, operation)?;
        self.api.validate_token(&self.token)?;
        Ok(())
    }

    /// The annotator record behind this account.
    fn me(&self, collections: &Collections) -> Result<Annotator> {
        collections
            .annotator_by_login(&self.login)
            .cloned()
            .ok_or_else(|| {
                AuthError::InvalidCredentials(format!("no active annotator for '{}'", self.login))
                    .into()
            })
    }
}

impl Session for FileSession {
    fn login(&self) -> &str {
        &self.login
    }

    fn role(&self) -> Role {
        self.role
    }

    fn token(&self) -> AuthToken {
        self.token.clone()
    }

    fn api_url(&self) -> &ApiUrl {
        self.api.url()
    }
}

#[async_trait]
impl AdminSession for FileSession {
    #[instrument(skip(self), fields(login = %self.login))]
    async fn list_datasets(&self) -> Result<Vec<Dataset>> {
        self.authorize(Role::Admin, "list datasets")?;
        debug!("Listing datasets");
        Ok(self.api.store().load()?.datasets())
    }

    #[instrument(skip(self, dataset), fields(login = %self.login, name = %dataset.name))]
    async fn create_dataset(&self, dataset: &NewDataset) -> Result<()> {
        self.authorize(Role::Admin, "create dataset")?;
        dataset.validate()?;

        let content = tokio::fs::read_to_string(&dataset.file)
            .await
            .map_err(map_io)?;

        let id = self.api.store().update(|c| {
            c.add_dataset(
                &dataset.name,
                &dataset.description,
                dataset.classes(),
                dataset.file_name(),
                &content,
            )
        })?;
        debug!(id, "Created dataset");
        Ok(())
    }

    #[instrument(
        skip(self, assignment),
        fields(login = %self.login, dataset = assignment.dataset_id)
    )]
    async fn assign_task(&self, assignment: &TaskAssignment) -> Result<()> {
        self.authorize(Role::Admin, "assign task")?;
        assignment.validate_now()?;
        debug!(annotators = assignment.annotator_ids.len(), "Assigning dataset");

        self.api.store().update(|c| {
            c.assign(
                assignment.dataset_id,
                &assignment.annotator_ids,
                assignment.deadline,
            )
        })
    }

    #[instrument(skip(self), fields(login = %self.login))]
    async fn dataset_details(&self, dataset_id: i64) -> Result<DatasetDetails> {
        self.authorize(Role::Admin, "show dataset")?;
        self.api.store().load()?.details(dataset_id)
    }

    #[instrument(skip(self), fields(login = %self.login))]
    async fn dataset_annotators(&self, dataset_id: i64) -> Result<Vec<DatasetAnnotator>> {
        self.authorize(Role::Admin, "show dataset")?;
        self.api.store().load()?.dataset_annotators(dataset_id)
    }

    #[instrument(skip(self), fields(login = %self.login))]
    async fn list_annotators(&self) -> Result<Vec<Annotator>> {
        self.authorize(Role::Admin, "list annotators")?;
        debug!("Listing annotators");
        Ok(self.api.store().load()?.annotators)
    }

    #[instrument(skip(self, form), fields(login = %self.login, annotator = %form.login))]
    async fn save_annotator(&self, form: &AnnotatorForm) -> Result<()> {
        self.authorize(Role::Admin, "save annotator")?;
        form.validate()?;

        let id = self.api.store().update(|c| c.save_annotator(form))?;
        debug!(id, update = form.is_update(), "Saved annotator");
        Ok(())
    }

    #[instrument(skip(self), fields(login = %self.login))]
    async fn delete_annotator(&self, annotator_id: i64) -> Result<()> {
        self.authorize(Role::Admin, "delete annotator")?;
        self.api.store().update(|c| c.delete_annotator(annotator_id))
    }
}

#[async_trait]
impl AnnotatorSession for FileSession {
    #[instrument(skip(self), fields(login = %self.login))]
    async fn list_tasks(&self) -> Result<UserTasks> {
        self.authorize(Role::User, "list tasks")?;
        let collections = self.api.store().load()?;
        let me = self.me(&collections)?;
        Ok(collections.user_tasks(&me))
    }

    #[instrument(skip(self), fields(login = %self.login))]
    async fn task_couple(&self, task_id: i64, index: usize) -> Result<TaskCouple> {
        self.authorize(Role::User, "show task")?;
        let collections = self.api.store().load()?;
        let me = self.me(&collections)?;
        let task = collections.task_for(me.id.unwrap_or_default(), task_id)?;

        let user_name = collections.user_tasks(&me).user_name;
        collections.couple_at(task, index, user_name)
    }

    #[instrument(skip(self), fields(login = %self.login))]
    async fn task_classes(&self, task_id: i64) -> Result<Vec<ClassOption>> {
        self.authorize(Role::User, "list classes")?;
        let collections = self.api.store().load()?;
        let me = self.me(&collections)?;
        let task = collections.task_for(me.id.unwrap_or_default(), task_id)?;
        collections.classes(task)
    }

    #[instrument(skip(self, request), fields(login = %self.login, couple = request.couple_id))]
    async fn annotate(&self, task_id: i64, request: &AnnotateRequest) -> Result<AnnotateOutcome> {
        self.authorize(Role::User, "annotate")?;
        if request.class_selection.trim().is_empty() {
            return Err(Error::other("a class must be selected"));
        }

        self.api.store().update(|c| {
            let me = self.me(c)?;
            c.annotate(task_id, me.id.unwrap_or_default(), request)
        })
    }
}

impl std::fmt::Debug for FileSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSession")
            .field("login", &self.login)
            .field("role", &self.role)
            .field("root", &self.api.store().root())
            .field("token", &"[REDACTED]")
            .finish()
    }
}
