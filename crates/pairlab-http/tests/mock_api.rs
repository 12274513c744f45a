//! Mock API tests for the HTTP backend.
//!
//! These tests use wiremock to stand in for the annotation server.

use chrono::{Duration, Local};
use pairlab_core::error::{AuthError, Error};
use pairlab_core::listing::{ANNOTATORS, FilterState, ListController, ListEvent};
use pairlab_core::model::{
    AnnotateRequest, AnnotatorForm, AnnotatorStatus, NewDataset, TaskAssignment,
};
use pairlab_core::tokens::unsigned_jwt;
use pairlab_core::{AdminSession, AnnotatorSession, Api, ApiUrl, Credentials, Role, Session};
use pairlab_http::{HttpApi, HttpSession};
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mock_api_url(server: &MockServer) -> ApiUrl {
    ApiUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

fn token_for(role: Role) -> String {
    unsigned_jwt(&json!({"sub": "tester", "role": role.as_claim()}))
        .as_str()
        .to_string()
}

fn session(server: &MockServer, role: Role) -> HttpSession {
    let token = pairlab_core::AuthToken::new(token_for(role));
    HttpSession::from_persisted(mock_api_url(server), "tester", token).unwrap()
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_login_reads_role_from_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"login": "admin", "password": "secret123"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": token_for(Role::Admin)
        })))
        .mount(&server)
        .await;

    let api = HttpApi::new(mock_api_url(&server));
    let session = api
        .login(Credentials::new("admin", "secret123"))
        .await
        .unwrap();

    assert_eq!(session.login(), "admin");
    assert_eq!(session.role(), Role::Admin);
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "Unauthorized",
            "message": "Bad credentials"
        })))
        .mount(&server)
        .await;

    let api = HttpApi::new(mock_api_url(&server));
    let result = api.login(Credentials::new("admin", "wrong")).await;

    match result {
        Err(Error::Auth(AuthError::InvalidCredentials(msg))) => assert!(msg.contains("401")),
        other => panic!("expected invalid credentials, got {:?}", other),
    }
}

#[tokio::test]
async fn test_login_rejects_unknown_role() {
    let server = MockServer::start().await;

    let token = unsigned_jwt(&json!({"role": "ROLE_GUEST"}));
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": token.as_str()})))
        .mount(&server)
        .await;

    let api = HttpApi::new(mock_api_url(&server));
    let result = api.login(Credentials::new("guest", "pw")).await;

    assert!(matches!(result, Err(Error::Auth(AuthError::UnknownRole(_)))));
}

// ============================================================================
// Admin Tests
// ============================================================================

#[tokio::test]
async fn test_list_datasets_sends_bearer_token() {
    let server = MockServer::start().await;
    let token = token_for(Role::Admin);

    Mock::given(method("GET"))
        .and(path("/api/admin/datasets"))
        .and(header("authorization", format!("Bearer {}", token).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "datasets": [
                {"id": 1, "name": "Reviews", "tasks": []},
                {"id": 2, "name": "Tweets", "tasks": [
                    {"id": 10, "couples": [{"id": 5, "text_1": "a", "text_2": "b"}]}
                ]}
            ]
        })))
        .mount(&server)
        .await;

    let datasets = session(&server, Role::Admin).list_datasets().await.unwrap();

    assert_eq!(datasets.len(), 2);
    assert_eq!(datasets[1].name(), "Tweets");
    assert_eq!(datasets[1].total_couples(), 1);
}

#[tokio::test]
async fn test_admin_operation_refused_for_user_role() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/datasets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"datasets": []})))
        .expect(0)
        .mount(&server)
        .await;

    let result = session(&server, Role::User).list_datasets().await;

    assert!(matches!(
        result,
        Err(Error::Auth(AuthError::Forbidden { required: "admin", .. }))
    ));
}

#[tokio::test]
async fn test_list_annotators_accepts_wrapped_shape() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/annotateurs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": 1, "nom": "Martin", "prenom": "Alice", "login": "amartin", "deleted": false},
                {"id": 2, "nom": "Dupont", "prenom": "Bob", "login": "bdupont", "deleted": true}
            ]
        })))
        .mount(&server)
        .await;

    let annotators = session(&server, Role::Admin).list_annotators().await.unwrap();

    assert_eq!(annotators.len(), 2);
    assert!(annotators[1].deleted);
}

#[tokio::test]
async fn test_list_annotators_tolerates_null_fields() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/annotateurs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "nom": "Martin", "prenom": "Alice", "login": "amartin", "deleted": null},
            {"id": 2, "nom": "Dupont", "prenom": "Bob", "login": "bdupont", "deleted": true},
            {"id": 3, "nom": null, "prenom": "Chloé", "login": "cmartin", "deleted": false}
        ])))
        .mount(&server)
        .await;

    let annotators = session(&server, Role::Admin).list_annotators().await.unwrap();
    assert_eq!(annotators.len(), 3);

    let view = ListController::new(ANNOTATORS, 5)
        .with_filter(FilterState::new().with_flag(AnnotatorStatus::Active, true))
        .handle(ListEvent::RecordsLoaded(annotators));

    let logins: Vec<_> = view.items.iter().filter_map(|a| a.login.as_deref()).collect();
    assert_eq!(logins, ["amartin", "cmartin"]);
}

#[tokio::test]
async fn test_list_tasks_tolerates_null_collections() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/user/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tasks": null, "userName": null, "taskProgressMap": null
        })))
        .mount(&server)
        .await;

    let tasks = session(&server, Role::User).list_tasks().await.unwrap();

    assert!(tasks.tasks.is_empty());
    assert_eq!(tasks.user_name, "");
}

#[tokio::test]
async fn test_assign_task_posts_ids_and_deadline() {
    let server = MockServer::start().await;

    let deadline = Local::now().date_naive() + Duration::days(7);
    let assignment = TaskAssignment::new(4, &[1, 2, 3], deadline);
    let millis = assignment.body().deadline;

    Mock::given(method("POST"))
        .and(path("/api/admin/tasks/datasets/4/assign"))
        .and(body_json(json!({"annotatorIds": [1, 2, 3], "deadline": millis})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    session(&server, Role::Admin)
        .assign_task(&assignment)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_assign_task_needs_three_annotators() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/admin/tasks/datasets/4/assign"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let deadline = Local::now().date_naive() + Duration::days(7);
    let assignment = TaskAssignment::new(4, &[1, 2, 2], deadline);
    let result = session(&server, Role::Admin).assign_task(&assignment).await;

    assert!(matches!(result, Err(Error::InvalidInput(_))));
}

#[tokio::test]
async fn test_dataset_details_requests_single_large_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/datasets/details/7"))
        .and(query_param("page", "0"))
        .and(query_param("size", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "name": "Reviews",
            "coupleTexts": [
                {"id": 1, "text_1": "good", "text_2": "great"},
                {"id": 2, "text_1": "bad", "text_2": "awful"}
            ]
        })))
        .mount(&server)
        .await;

    let details = session(&server, Role::Admin).dataset_details(7).await.unwrap();

    assert_eq!(details.couple_texts.len(), 2);
    assert_eq!(details.name.as_deref(), Some("Reviews"));
}

#[tokio::test]
async fn test_create_dataset_uploads_multipart() {
    let server = MockServer::start().await;
    let dir = tempfile::TempDir::new().unwrap();
    let file = dir.path().join("pairs.csv");
    std::fs::write(&file, "text_1,text_2\nhello,bonjour\n").unwrap();

    Mock::given(method("POST"))
        .and(path("/api/admin/datasets"))
        .and(body_string_contains("classesRaw"))
        .and(body_string_contains("pairs.csv"))
        .and(body_string_contains("hello,bonjour"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dataset = NewDataset {
        name: "Translations".to_string(),
        description: "EN/FR pairs".to_string(),
        classes_raw: "same, different".to_string(),
        file,
    };

    session(&server, Role::Admin)
        .create_dataset(&dataset)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_save_annotator_updates_with_put() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/admin/annotateurs/9"))
        .and(body_json(json!({
            "id": 9, "nom": "Martin", "prenom": "Alice", "login": "amartin"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let form = AnnotatorForm {
        id: Some(9),
        last_name: "Martin".to_string(),
        first_name: "Alice".to_string(),
        login: "amartin".to_string(),
    };

    session(&server, Role::Admin)
        .save_annotator(&form)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_annotator_maps_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/admin/annotateurs/42"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "NotFound",
            "message": "No annotator 42"
        })))
        .mount(&server)
        .await;

    let result = session(&server, Role::Admin).delete_annotator(42).await;

    match result {
        Err(Error::Protocol(err)) => {
            assert!(err.is_not_found());
            assert_eq!(err.message.as_deref(), Some("No annotator 42"));
        }
        other => panic!("expected protocol error, got {:?}", other),
    }
}

// ============================================================================
// Annotator Tests
// ============================================================================

#[tokio::test]
async fn test_task_couple_passes_index() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/user/tasks/3"))
        .and(query_param("index", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "currentCouple": {"id": 12, "text_1": "cat", "text_2": "chat"},
            "totalCouples": 5,
            "userName": "Alice"
        })))
        .mount(&server)
        .await;

    let couple = session(&server, Role::User).task_couple(3, 2).await.unwrap();

    assert_eq!(couple.current_couple.id, 12);
    assert_eq!(couple.total_couples, 5);
}

#[tokio::test]
async fn test_annotate_returns_outcome() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/user/tasks/3/annotate"))
        .and(body_json(json!({
            "coupleId": 12,
            "classSelection": "same",
            "notes": "",
            "currentIndex": 2
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "completed": false,
            "nextIndex": 3
        })))
        .mount(&server)
        .await;

    let request = AnnotateRequest {
        couple_id: 12,
        class_selection: "same".to_string(),
        notes: String::new(),
        current_index: 2,
    };
    let outcome = session(&server, Role::User)
        .annotate(3, &request)
        .await
        .unwrap();

    assert!(!outcome.completed);
    assert_eq!(outcome.next_index, Some(3));
}

#[tokio::test]
async fn test_task_classes_unwraps_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/user/tasks/3/classes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "classes": [{"id": 1, "textClass": "same"}, {"id": 2, "textClass": "different"}]
        })))
        .mount(&server)
        .await;

    let classes = session(&server, Role::User).task_classes(3).await.unwrap();

    let names: Vec<_> = classes.iter().map(|c| c.text_class.as_str()).collect();
    assert_eq!(names, ["same", "different"]);
}

#[tokio::test]
async fn test_malformed_body_is_protocol_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/user/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = session(&server, Role::User).list_tasks().await;

    match result {
        Err(Error::Protocol(err)) => assert_eq!(err.error.as_deref(), Some("InvalidResponse")),
        other => panic!("expected protocol error, got {:?}", other),
    }
}
