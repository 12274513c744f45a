//! Domain records exchanged with the annotation API.

mod annotator;
mod dataset;
mod task;

use serde::{Deserialize, Deserializer};

/// Read an explicit `null` the same way as a missing field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

pub use annotator::{Annotator, AnnotatorForm, AnnotatorStats, AnnotatorStatus, assignable};
pub use dataset::{
    Annotation, AnnotationFilter, AssignmentBody, Couple, Dataset, DatasetAnnotator,
    DatasetDetails, DatasetStats, DatasetStatus, MIN_ANNOTATORS_PER_ASSIGNMENT, NewDataset, Task,
    TaskAnnotator, TaskAssignment, annotation_class_for,
};
pub use task::{
    AnnotateOutcome, AnnotateRequest, ClassOption, CoupleCursor, DatasetRef, TaskCouple, UserTask,
    UserTasks,
};
