//! Administrator operations.

use async_trait::async_trait;

use crate::Result;
use crate::model::{
    Annotator, AnnotatorForm, Dataset, DatasetAnnotator, DatasetDetails, NewDataset,
    TaskAssignment,
};

use super::Session;

/// Operations available to an administrator session.
///
/// Implementations check the session role before touching the backend.
#[async_trait]
pub trait AdminSession: Session {
    /// Fetch every dataset.
    async fn list_datasets(&self) -> Result<Vec<Dataset>>;

    /// Upload a new dataset.
    async fn create_dataset(&self, dataset: &NewDataset) -> Result<()>;

    /// Assign a dataset to annotators.
    async fn assign_task(&self, assignment: &TaskAssignment) -> Result<()>;

    /// Fetch a dataset with its couples.
    async fn dataset_details(&self, dataset_id: i64) -> Result<DatasetDetails>;

    /// Fetch the annotators working on a dataset with their annotations.
    async fn dataset_annotators(&self, dataset_id: i64) -> Result<Vec<DatasetAnnotator>>;

    /// Fetch every annotator account.
    async fn list_annotators(&self) -> Result<Vec<Annotator>>;

    /// Create or update an annotator account.
    async fn save_annotator(&self, form: &AnnotatorForm) -> Result<()>;

    /// Delete an annotator account.
    async fn delete_annotator(&self, annotator_id: i64) -> Result<()>;
}
