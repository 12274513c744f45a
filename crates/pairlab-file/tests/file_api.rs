//! End-to-end tests of the file backend through the session traits.

use chrono::{Duration, Local};
use pairlab_core::error::{AuthError, Error};
use pairlab_core::model::{
    AnnotateRequest, AnnotatorForm, DatasetStatus, NewDataset, TaskAssignment,
};
use pairlab_core::{AdminSession, AnnotatorSession, Api, ApiUrl, Credentials, Role, Session};
use pairlab_file::{FileApi, FileSession};
use tempfile::TempDir;

fn open(dir: &TempDir) -> FileApi {
    let url = ApiUrl::new(format!("file://{}", dir.path().display())).unwrap();
    FileApi::from_url(url).unwrap()
}

async fn login(api: &FileApi, login: &str) -> FileSession {
    api.login(Credentials::new(login, "secret")).await.unwrap()
}

#[tokio::test]
async fn login_checks_password() {
    let dir = TempDir::new().unwrap();
    let api = open(&dir);
    api.create_account("admin", "secret", Role::Admin).await.unwrap();

    let session = login(&api, "admin").await;
    assert_eq!(session.role(), Role::Admin);
    assert_eq!(session.token().role().unwrap(), Role::Admin);

    let bad = api.login(Credentials::new("admin", "nope")).await;
    assert!(matches!(bad, Err(Error::Auth(AuthError::InvalidCredentials(_)))));
}

#[tokio::test]
async fn persisted_token_restores_session() {
    let dir = TempDir::new().unwrap();
    let api = open(&dir);
    api.create_account("admin", "secret", Role::Admin).await.unwrap();

    let token = login(&api, "admin").await.token();
    let restored = FileSession::from_persisted(api.clone(), token).unwrap();

    assert_eq!(restored.login(), "admin");
    assert!(restored.list_datasets().await.unwrap().is_empty());
}

#[tokio::test]
async fn user_cannot_run_admin_operations() {
    let dir = TempDir::new().unwrap();
    let api = open(&dir);
    api.create_account("amartin", "secret", Role::User).await.unwrap();

    let session = login(&api, "amartin").await;
    let result = session.list_annotators().await;

    assert!(matches!(result, Err(Error::Auth(AuthError::Forbidden { .. }))));
}

#[tokio::test]
async fn dataset_lifecycle() {
    let dir = TempDir::new().unwrap();
    let api = open(&dir);
    api.create_account("admin", "secret", Role::Admin).await.unwrap();
    for user in ["amartin", "bdupont", "cdurand"] {
        api.create_account(user, "secret", Role::User).await.unwrap();
    }

    let admin = login(&api, "admin").await;

    let file = dir.path().join("pairs.tsv");
    std::fs::write(&file, "good\tgreat\nbad\tawful\nok\tfine\n").unwrap();
    admin
        .create_dataset(&NewDataset {
            name: "Reviews".into(),
            description: "Product reviews".into(),
            classes_raw: "same, different".into(),
            file,
        })
        .await
        .unwrap();

    let datasets = admin.list_datasets().await.unwrap();
    assert_eq!(datasets.len(), 1);
    assert_eq!(datasets[0].status(), DatasetStatus::Unassigned);
    assert_eq!(datasets[0].file_type.as_deref(), Some("tsv"));

    let ids: Vec<i64> = admin
        .list_annotators()
        .await
        .unwrap()
        .iter()
        .filter_map(|a| a.id)
        .collect();
    assert_eq!(ids.len(), 3);

    let deadline = Local::now().date_naive() + Duration::days(3);
    admin
        .assign_task(&TaskAssignment::new(datasets[0].id, &ids, deadline))
        .await
        .unwrap();

    let details = admin.dataset_details(datasets[0].id).await.unwrap();
    assert_eq!(details.couple_texts.len(), 3);
    assert_eq!(details.tasks.len(), 3);

    // Every annotator got one couple; annotate them all.
    for user in ["amartin", "bdupont", "cdurand"] {
        let session = login(&api, user).await;
        let tasks = session.list_tasks().await.unwrap();
        assert_eq!(tasks.tasks.len(), 1);

        let task_id = tasks.tasks[0].id;
        let couple = session.task_couple(task_id, 0).await.unwrap();
        assert_eq!(couple.total_couples, 1);

        let classes = session.task_classes(task_id).await.unwrap();
        assert_eq!(classes.len(), 2);

        let outcome = session
            .annotate(
                task_id,
                &AnnotateRequest {
                    couple_id: couple.current_couple.id,
                    class_selection: classes[0].text_class.clone(),
                    notes: String::new(),
                    current_index: 0,
                },
            )
            .await
            .unwrap();
        assert!(outcome.completed);
        assert_eq!(session.list_tasks().await.unwrap().progress_for(task_id), 100.0);
    }

    let datasets = admin.list_datasets().await.unwrap();
    assert_eq!(datasets[0].status(), DatasetStatus::Completed);

    let annotators = admin.dataset_annotators(datasets[0].id).await.unwrap();
    assert!(annotators.iter().all(|a| a.has_annotated()));
}

#[tokio::test]
async fn annotator_edit_and_delete() {
    let dir = TempDir::new().unwrap();
    let api = open(&dir);
    api.create_account("admin", "secret", Role::Admin).await.unwrap();
    let admin = login(&api, "admin").await;

    admin
        .save_annotator(&AnnotatorForm {
            id: None,
            last_name: "Martin".into(),
            first_name: "Alice".into(),
            login: "amartin".into(),
        })
        .await
        .unwrap();

    let created = admin.list_annotators().await.unwrap().remove(0);
    let mut form = AnnotatorForm::edit(&created);
    form.first_name = "Alicia".into();
    admin.save_annotator(&form).await.unwrap();

    admin.delete_annotator(created.id.unwrap()).await.unwrap();

    let stored = admin.list_annotators().await.unwrap().remove(0);
    assert_eq!(stored.first_name.as_deref(), Some("Alicia"));
    assert!(stored.deleted);
}

#[tokio::test]
async fn assignment_needs_three_active_annotators() {
    let dir = TempDir::new().unwrap();
    let api = open(&dir);
    api.create_account("admin", "secret", Role::Admin).await.unwrap();
    let admin = login(&api, "admin").await;

    let deadline = Local::now().date_naive() + Duration::days(3);
    let result = admin
        .assign_task(&TaskAssignment::new(1, &[1, 2], deadline))
        .await;

    assert!(matches!(result, Err(Error::InvalidInput(_))));
}
