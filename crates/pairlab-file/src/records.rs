//! Stored collections and their projection onto the API model.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use pairlab_core::Result;
use pairlab_core::error::{Error, InvalidInputError};
use pairlab_core::model::{
    AnnotateOutcome, AnnotateRequest, Annotation, Annotator, AnnotatorForm, ClassOption, Couple,
    Dataset, DatasetAnnotator, DatasetDetails, DatasetRef, Task, TaskAnnotator, TaskCouple,
    UserTask, UserTasks,
};

/// A dataset as written to `datasets.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StoredDataset {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub file_name: String,
    pub classes: Vec<String>,
    pub couples: Vec<Couple>,
    pub created_at: String,
}

/// One annotator's share of a dataset, written to `assignments.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StoredTask {
    pub id: i64,
    pub dataset_id: i64,
    pub annotator_id: i64,
    pub deadline: NaiveDate,
    pub couple_ids: Vec<i64>,
}

/// A class chosen for a couple, written to `annotations.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StoredAnnotation {
    pub id: i64,
    pub task_id: i64,
    pub couple_id: i64,
    pub annotator_id: i64,
    pub class: String,
    #[serde(default)]
    pub notes: String,
    pub annotated_at: String,
}

/// Everything the store persists besides accounts.
#[derive(Debug, Default)]
pub(crate) struct Collections {
    pub datasets: Vec<StoredDataset>,
    pub annotators: Vec<Annotator>,
    pub tasks: Vec<StoredTask>,
    pub annotations: Vec<StoredAnnotation>,
}

fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().unwrap_or(0) + 1
}

fn not_found(kind: &'static str, id: i64) -> Error {
    InvalidInputError::NotFound { kind, id }.into()
}

/// Split uploaded file content into couples.
///
/// Each non-blank line holds two texts separated by a tab, or by the first
/// comma when there is no tab. A leading `text_1,text_2` header is skipped.
pub(crate) fn parse_couples(content: &str, first_id: i64) -> Result<Vec<Couple>> {
    let mut couples = Vec::new();

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (text_1, text_2) = line
            .split_once('\t')
            .or_else(|| line.split_once(','))
            .ok_or_else(|| {
                Error::other(format!(
                    "line {}: expected two texts separated by a tab or comma",
                    line_no + 1
                ))
            })?;

        let (text_1, text_2) = (text_1.trim(), text_2.trim());
        if couples.is_empty() && text_1.eq_ignore_ascii_case("text_1") {
            continue;
        }

        couples.push(Couple {
            id: first_id + couples.len() as i64,
            text_1: text_1.to_string(),
            text_2: text_2.to_string(),
            original_id: Some(line_no as i64 + 1),
        });
    }

    Ok(couples)
}

impl Collections {
    fn dataset(&self, dataset_id: i64) -> Result<&StoredDataset> {
        self.datasets
            .iter()
            .find(|d| d.id == dataset_id)
            .ok_or_else(|| not_found("dataset", dataset_id))
    }

    fn annotator(&self, annotator_id: i64) -> Option<&Annotator> {
        self.annotators.iter().find(|a| a.id == Some(annotator_id))
    }

    pub fn annotator_by_login(&self, login: &str) -> Option<&Annotator> {
        self.annotators
            .iter()
            .find(|a| !a.deleted && a.login.as_deref() == Some(login))
    }

    fn couple(&self, couple_id: i64) -> Option<&Couple> {
        self.datasets
            .iter()
            .flat_map(|d| d.couples.iter())
            .find(|c| c.id == couple_id)
    }

    fn annotation(&self, task_id: i64, couple_id: i64) -> Option<&StoredAnnotation> {
        self.annotations
            .iter()
            .find(|a| a.task_id == task_id && a.couple_id == couple_id)
    }

    fn annotated_count(&self, task: &StoredTask) -> usize {
        task.couple_ids
            .iter()
            .filter(|c| self.annotation(task.id, **c).is_some())
            .count()
    }

    fn is_completed(&self, task: &StoredTask) -> bool {
        self.annotated_count(task) == task.couple_ids.len()
    }

    // ========================================================================
    // Datasets
    // ========================================================================

    pub fn add_dataset(
        &mut self,
        name: &str,
        description: &str,
        classes: Vec<String>,
        file_name: String,
        content: &str,
    ) -> Result<i64> {
        let first_couple = next_id(
            self.datasets
                .iter()
                .flat_map(|d| d.couples.iter())
                .map(|c| c.id),
        );
        let couples = parse_couples(content, first_couple)?;
        let id = next_id(self.datasets.iter().map(|d| d.id));

        debug!(id, couples = couples.len(), "Storing dataset");
        self.datasets.push(StoredDataset {
            id,
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            file_name,
            classes,
            couples,
            created_at: Utc::now().to_rfc3339(),
        });
        Ok(id)
    }

    /// Create one task per annotator, dealing couples out in turn.
    pub fn assign(
        &mut self,
        dataset_id: i64,
        annotator_ids: &[i64],
        deadline: NaiveDate,
    ) -> Result<()> {
        let dataset = self.dataset(dataset_id)?;
        if self.tasks.iter().any(|t| t.dataset_id == dataset_id) {
            return Err(InvalidInputError::Assignment {
                reason: format!("dataset {} is already assigned", dataset_id),
            }
            .into());
        }

        for id in annotator_ids {
            match self.annotator(*id) {
                Some(a) if !a.deleted => {}
                Some(_) => {
                    return Err(InvalidInputError::Assignment {
                        reason: format!("annotator {} is inactive", id),
                    }
                    .into());
                }
                None => return Err(not_found("annotator", *id)),
            }
        }

        let mut shares = vec![Vec::new(); annotator_ids.len()];
        for (i, couple) in dataset.couples.iter().enumerate() {
            shares[i % annotator_ids.len()].push(couple.id);
        }

        let mut next = next_id(self.tasks.iter().map(|t| t.id));
        for (annotator_id, couple_ids) in annotator_ids.iter().zip(shares) {
            self.tasks.push(StoredTask {
                id: next,
                dataset_id,
                annotator_id: *annotator_id,
                deadline,
                couple_ids,
            });
            next += 1;
        }
        Ok(())
    }

    fn task_view(&self, task: &StoredTask) -> Task {
        let annotator = self.annotator(task.annotator_id).map(|a| TaskAnnotator {
            id: task.annotator_id,
            login: a.login.clone(),
            role: None,
        });

        // Couples are only reported back once the task is done.
        let couples = self.is_completed(task).then(|| {
            task.couple_ids
                .iter()
                .filter_map(|id| self.couple(*id).cloned())
                .collect()
        });

        Task {
            id: task.id,
            deadline: Some(task.deadline.to_string()),
            annotator,
            couples,
        }
    }

    fn tasks_of(&self, dataset_id: i64) -> impl Iterator<Item = &StoredTask> {
        self.tasks.iter().filter(move |t| t.dataset_id == dataset_id)
    }

    pub fn datasets(&self) -> Vec<Dataset> {
        self.datasets
            .iter()
            .map(|d| Dataset {
                id: d.id,
                name: Some(d.name.clone()),
                description: Some(d.description.clone()),
                file_type: d
                    .file_name
                    .rsplit_once('.')
                    .map(|(_, ext)| ext.to_ascii_lowercase()),
                tasks: Some(self.tasks_of(d.id).map(|t| self.task_view(t)).collect()),
            })
            .collect()
    }

    pub fn details(&self, dataset_id: i64) -> Result<DatasetDetails> {
        let dataset = self.dataset(dataset_id)?;
        Ok(DatasetDetails {
            id: Some(dataset.id),
            name: Some(dataset.name.clone()),
            description: Some(dataset.description.clone()),
            tasks: self.tasks_of(dataset_id).map(|t| self.task_view(t)).collect(),
            couple_texts: dataset.couples.clone(),
        })
    }

    pub fn dataset_annotators(&self, dataset_id: i64) -> Result<Vec<DatasetAnnotator>> {
        self.dataset(dataset_id)?;

        Ok(self
            .tasks_of(dataset_id)
            .map(|task| {
                let annotator = self.annotator(task.annotator_id);
                let annotations = self
                    .annotations
                    .iter()
                    .filter(|a| a.task_id == task.id)
                    .map(|a| Annotation {
                        id: a.id,
                        couple_text: self.couple(a.couple_id).cloned(),
                        chosen_class: a.class.clone(),
                    })
                    .collect();

                DatasetAnnotator {
                    id: task.annotator_id,
                    last_name: annotator.and_then(|a| a.last_name.clone()),
                    first_name: annotator.and_then(|a| a.first_name.clone()),
                    login: annotator.and_then(|a| a.login.clone()),
                    annotations,
                }
            })
            .collect())
    }

    // ========================================================================
    // Annotators
    // ========================================================================

    pub fn save_annotator(&mut self, form: &AnnotatorForm) -> Result<i64> {
        let login = form.login.trim();
        let clash = self
            .annotators
            .iter()
            .any(|a| a.login.as_deref() == Some(login) && a.id != form.id);
        if clash {
            return Err(Error::other(format!("login '{}' is already taken", login)));
        }

        let id = match form.id {
            Some(id) => {
                let existing = self
                    .annotators
                    .iter_mut()
                    .find(|a| a.id == Some(id))
                    .ok_or_else(|| not_found("annotator", id))?;
                existing.last_name = Some(form.last_name.trim().to_string());
                existing.first_name = Some(form.first_name.trim().to_string());
                existing.login = Some(login.to_string());
                id
            }
            None => {
                let id = next_id(self.annotators.iter().filter_map(|a| a.id));
                self.annotators.push(Annotator {
                    id: Some(id),
                    last_name: Some(form.last_name.trim().to_string()),
                    first_name: Some(form.first_name.trim().to_string()),
                    login: Some(login.to_string()),
                    deleted: false,
                    role: None,
                });
                id
            }
        };
        Ok(id)
    }

    /// Mark an annotator deleted; their tasks and annotations are kept.
    pub fn delete_annotator(&mut self, annotator_id: i64) -> Result<()> {
        let annotator = self
            .annotators
            .iter_mut()
            .find(|a| a.id == Some(annotator_id))
            .ok_or_else(|| not_found("annotator", annotator_id))?;
        annotator.deleted = true;
        Ok(())
    }

    // ========================================================================
    // Annotation
    // ========================================================================

    pub fn user_tasks(&self, annotator: &Annotator) -> UserTasks {
        let annotator_id = annotator.id.unwrap_or_default();
        let mut tasks = Vec::new();
        let mut progress = std::collections::BTreeMap::new();

        for task in self.tasks.iter().filter(|t| t.annotator_id == annotator_id) {
            let dataset = self.datasets.iter().find(|d| d.id == task.dataset_id);
            tasks.push(UserTask {
                id: task.id,
                deadline: Some(task.deadline.to_string()),
                dataset: dataset.map(|d| DatasetRef {
                    id: d.id,
                    name: Some(d.name.clone()),
                }),
            });

            let percent = if task.couple_ids.is_empty() {
                100.0
            } else {
                self.annotated_count(task) as f64 / task.couple_ids.len() as f64 * 100.0
            };
            progress.insert(task.id.to_string(), percent);
        }

        let full_name = annotator.full_name();
        UserTasks {
            tasks,
            user_name: if full_name.is_empty() {
                annotator.login.clone().unwrap_or_default()
            } else {
                full_name
            },
            progress,
        }
    }

    /// A task owned by the given annotator.
    pub fn task_for(&self, annotator_id: i64, task_id: i64) -> Result<&StoredTask> {
        self.tasks
            .iter()
            .find(|t| t.id == task_id && t.annotator_id == annotator_id)
            .ok_or_else(|| not_found("task", task_id))
    }

    pub fn couple_at(
        &self,
        task: &StoredTask,
        index: usize,
        user_name: String,
    ) -> Result<TaskCouple> {
        let couple = task
            .couple_ids
            .get(index)
            .and_then(|id| self.couple(*id))
            .ok_or_else(|| {
                Error::other(format!(
                    "task {} has no couple at index {} ({} couples)",
                    task.id,
                    index,
                    task.couple_ids.len()
                ))
            })?;

        Ok(TaskCouple {
            current_couple: couple.clone(),
            total_couples: task.couple_ids.len(),
            user_name,
        })
    }

    pub fn classes(&self, task: &StoredTask) -> Result<Vec<ClassOption>> {
        let dataset = self.dataset(task.dataset_id)?;
        Ok(dataset
            .classes
            .iter()
            .enumerate()
            .map(|(i, class)| ClassOption {
                id: i as i64 + 1,
                text_class: class.clone(),
            })
            .collect())
    }

    /// Record a classification, replacing any earlier one for the couple.
    pub fn annotate(
        &mut self,
        task_id: i64,
        annotator_id: i64,
        request: &AnnotateRequest,
    ) -> Result<AnnotateOutcome> {
        let task = self.task_for(annotator_id, task_id)?.clone();

        if !task.couple_ids.contains(&request.couple_id) {
            return Err(not_found("couple", request.couple_id));
        }
        let classes = self.classes(&task)?;
        if !classes.iter().any(|c| c.text_class == request.class_selection) {
            return Err(Error::other(format!(
                "'{}' is not a class of this dataset",
                request.class_selection
            )));
        }

        self.annotations
            .retain(|a| !(a.task_id == task_id && a.couple_id == request.couple_id));
        let id = next_id(self.annotations.iter().map(|a| a.id));
        self.annotations.push(StoredAnnotation {
            id,
            task_id,
            couple_id: request.couple_id,
            annotator_id,
            class: request.class_selection.clone(),
            notes: request.notes.clone(),
            annotated_at: Utc::now().to_rfc3339(),
        });

        let completed = self.is_completed(&task);
        let next_index = (request.current_index + 1 < task.couple_ids.len())
            .then_some(request.current_index + 1);

        Ok(AnnotateOutcome {
            completed,
            completion_message: completed
                .then(|| "All couples of this task are annotated".to_string()),
            next_index: if completed { None } else { next_index },
        })
    }
}
