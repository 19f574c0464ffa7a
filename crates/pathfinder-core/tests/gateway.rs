//! Integration tests for the backend gateway against a mock HTTP server.

use mockito::Matcher;
use pathfinder_core::api::models::{
    ChatMessageRequest, LoginRequest, ProfileUpdate, SaveProgressRequest, SetupRequest,
    StartAssessmentRequest, SubmitTestRequest,
};
use pathfinder_core::storage::{keys, ApiConfig};
use pathfinder_core::{ApiClient, ApiError, LocalStore, MemoryStore, SavedAssessment, TestType};
use serde_json::json;

const USER_JSON: &str = r#"{
    "id": 7,
    "username": "asha",
    "name": "Asha",
    "grade": "9th",
    "age": 14,
    "email": null,
    "phone": null,
    "preferred_language": "hi",
    "is_setup_complete": true,
    "created_at": "2024-06-01T10:00:00Z"
}"#;

fn config(server: &mockito::ServerGuard) -> ApiConfig {
    ApiConfig {
        base_url: format!("{}/api/", server.url()),
        timeout_secs: 5,
    }
}

fn logged_in_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.set(keys::ACCESS_TOKEN, "acc-1").unwrap();
    store.set(keys::REFRESH_TOKEN, "ref-1").unwrap();
    store
}

#[tokio::test]
async fn test_login_stores_tokens() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/auth/login/")
        .match_body(Matcher::PartialJson(json!({"username": "asha", "password": "pw"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(r#"{{"user": {USER_JSON}, "access": "acc-9", "refresh": "ref-9"}}"#))
        .create_async()
        .await;

    let store = MemoryStore::new();
    let client = ApiClient::new(&config(&server), &store).unwrap();
    let user = client
        .login(&LoginRequest {
            username: "asha".into(),
            password: "pw".into(),
        })
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(user.name, "Asha");
    assert_eq!(user.age, Some(14));
    assert_eq!(store.get(keys::ACCESS_TOKEN).unwrap().as_deref(), Some("acc-9"));
    assert_eq!(store.get(keys::REFRESH_TOKEN).unwrap().as_deref(), Some("ref-9"));
}

#[tokio::test]
async fn test_setup_account() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/auth/setup/")
        .match_body(Matcher::PartialJson(json!({"name": "Asha", "grade": "9th", "age": 14})))
        .with_status(201)
        .with_body(format!(r#"{{"user": {USER_JSON}, "access": "a", "refresh": "r"}}"#))
        .create_async()
        .await;

    let store = MemoryStore::new();
    let client = ApiClient::new(&config(&server), &store).unwrap();
    let user = client
        .setup(&SetupRequest {
            username: "asha".into(),
            password: "pw".into(),
            name: "Asha".into(),
            grade: "9th".into(),
            age: Some(14),
        })
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(user.is_setup_complete);
    assert!(client.is_authenticated().unwrap());
}

#[tokio::test]
async fn test_login_error_surfaces_backend_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/auth/login/")
        .with_status(401)
        .with_body(r#"{"error": "Invalid credentials"}"#)
        .create_async()
        .await;

    let store = MemoryStore::new();
    let client = ApiClient::new(&config(&server), &store).unwrap();
    let err = client
        .login(&LoginRequest {
            username: "asha".into(),
            password: "wrong".into(),
        })
        .await
        .unwrap_err();

    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("expected status error, got {other:?}"),
    }
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_logout_sends_refresh_and_clears_tokens() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/auth/logout/")
        .match_header("authorization", "Bearer acc-1")
        .match_body(Matcher::Json(json!({"refresh": "ref-1"})))
        .with_status(200)
        .with_body(r#"{"message": "Successfully logged out"}"#)
        .create_async()
        .await;

    let store = logged_in_store();
    let client = ApiClient::new(&config(&server), &store).unwrap();
    client.logout().await.unwrap();

    mock.assert_async().await;
    assert!(store.get(keys::ACCESS_TOKEN).unwrap().is_none());
    assert!(store.get(keys::REFRESH_TOKEN).unwrap().is_none());
}

#[tokio::test]
async fn test_failed_logout_keeps_tokens() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/auth/logout/")
        .with_status(500)
        .with_body("oops")
        .create_async()
        .await;

    let store = logged_in_store();
    let client = ApiClient::new(&config(&server), &store).unwrap();
    assert!(client.logout().await.is_err());
    assert!(store.get(keys::ACCESS_TOKEN).unwrap().is_some());
}

#[tokio::test]
async fn test_unauthenticated_call_makes_no_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/home/")
        .expect(0)
        .create_async()
        .await;

    let store = MemoryStore::new();
    let client = ApiClient::new(&config(&server), &store).unwrap();
    assert!(matches!(client.home().await, Err(ApiError::NotAuthenticated)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_home_summary() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/home/")
        .match_header("authorization", "Bearer acc-1")
        .with_status(200)
        .with_body(format!(
            r#"{{
                "user_profile": {USER_JSON},
                "saved_assessment": {{"id": 3, "assessment_number": 2, "status": "in_progress",
                                      "current_test_type": "values"}},
                "completed_assessments": [
                    {{"id": 1, "assessment_number": 1, "status": "completed",
                      "completed_at": "2024-06-02T09:00:00Z"}}
                ],
                "completion_stats": {{"total_assessments": 1, "completed_percentage": 33.3}}
            }}"#
        ))
        .create_async()
        .await;

    let store = logged_in_store();
    let client = ApiClient::new(&config(&server), &store).unwrap();
    let home = client.home().await.unwrap();

    assert_eq!(home.user_profile.id, 7);
    assert_eq!(
        home.saved_assessment.and_then(|a| a.current_test_type),
        Some(TestType::Values)
    );
    assert_eq!(home.completed_assessments.len(), 1);
    assert_eq!(home.completion_stats.total_assessments, 1);
}

#[tokio::test]
async fn test_assessment_round() {
    let mut server = mockito::Server::new_async().await;
    let start = server
        .mock("POST", "/api/assessment/start/")
        .match_body(Matcher::Json(json!({"aptitude_total_questions": 20})))
        .with_status(200)
        .with_body(r#"{"assessment_id": 11, "first_test_type": "aptitude", "redirect_url": "/assessment/test/aptitude/11/"}"#)
        .create_async()
        .await;
    let detail = server
        .mock("GET", "/api/assessment/11/test/aptitude/")
        .with_status(200)
        .with_body(r#"{"id": 40, "test_type": "aptitude", "is_completed": false, "current_question_index": 0, "total_questions": 20}"#)
        .create_async()
        .await;
    let save = server
        .mock("POST", "/api/assessment/save-progress/")
        .match_body(Matcher::Json(json!({
            "test_response_id": 40,
            "answers": {"0": "b"},
            "current_question_index": 1
        })))
        .with_status(200)
        .with_body(r#"{"success": true, "saved_at": "2024-06-02T09:05:00Z"}"#)
        .create_async()
        .await;
    let submit = server
        .mock("POST", "/api/assessment/submit-test/")
        .match_body(Matcher::PartialJson(json!({"test_response_id": 40, "total_questions": 15})))
        .with_status(200)
        .with_body(r#"{"success": true, "next_test_type": "values", "redirect_url": "/assessment/test/values/11/"}"#)
        .create_async()
        .await;

    let store = logged_in_store();
    let client = ApiClient::new(&config(&server), &store).unwrap();

    let started = client
        .start_assessment(&StartAssessmentRequest {
            aptitude_total_questions: Some(20),
        })
        .await
        .unwrap();
    assert_eq!(started.first_test_type, TestType::Aptitude);

    let response = client
        .test_response(started.assessment_id, started.first_test_type)
        .await
        .unwrap();
    assert_eq!(response.total_questions, 20);

    let mut saved = SavedAssessment::new(TestType::Aptitude);
    saved.record_answer(0, "b", 20).unwrap();
    let ack = client
        .save_progress(&SaveProgressRequest::from_saved(response.id, &saved))
        .await
        .unwrap();
    assert!(ack.success);

    let submitted = client
        .submit_test(&SubmitTestRequest {
            test_response_id: response.id,
            answers: saved.answers.clone(),
            total_questions: Some(15),
        })
        .await
        .unwrap();
    assert_eq!(submitted.next_test_type, Some(TestType::Values));

    start.assert_async().await;
    detail.assert_async().await;
    save.assert_async().await;
    submit.assert_async().await;
}

#[tokio::test]
async fn test_history_and_responses() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/assessment/history/")
        .with_status(200)
        .with_body(r#"{"completed_assessments": [{"id": 2, "assessment_number": 2, "status": "completed"}, {"id": 1, "assessment_number": 1, "status": "completed"}]}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/assessment/2/responses/")
        .with_status(200)
        .with_body(r#"{
            "assessment": {"id": 2, "assessment_number": 2, "status": "completed"},
            "test_responses": [
                {"test_type": "aptitude", "answers": {"0": "a"}},
                {"test_type": "values", "answers": {}}
            ]
        }"#)
        .create_async()
        .await;

    let store = logged_in_store();
    let client = ApiClient::new(&config(&server), &store).unwrap();

    let history = client.history().await.unwrap();
    assert_eq!(history.completed_assessments.len(), 2);

    let responses = client.responses(2).await.unwrap();
    assert_eq!(responses.test_responses.len(), 2);
    assert_eq!(responses.test_responses[0].answers["0"], "a");
}

#[tokio::test]
async fn test_not_found_maps_to_status_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/assessment/99/responses/")
        .with_status(404)
        .with_body(r#"{"error": "Assessment not found"}"#)
        .create_async()
        .await;

    let store = logged_in_store();
    let client = ApiClient::new(&config(&server), &store).unwrap();
    let err = client.responses(99).await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 404, .. }));
    assert!(err.to_string().contains("Assessment not found"));
}

#[tokio::test]
async fn test_chat_message_and_history() {
    let mut server = mockito::Server::new_async().await;
    let send = server
        .mock("POST", "/api/chatbot/message/")
        .match_body(Matcher::Json(json!({"message": "What suits me?", "assessment_id": 2})))
        .with_status(200)
        .with_body(r#"{"bot_message": "Engineering looks like a strong fit."}"#)
        .create_async()
        .await;
    let scoped = server
        .mock("GET", "/api/chatbot/history/")
        .match_query(Matcher::UrlEncoded("assessment_id".into(), "2".into()))
        .with_status(200)
        .with_body(r#"{"messages": [
            {"id": 1, "message_text": "What suits me?", "sender": "user", "is_results_chat": true},
            {"id": 2, "message_text": "Engineering looks like a strong fit.", "sender": "bot", "is_results_chat": true}
        ]}"#)
        .create_async()
        .await;

    let store = logged_in_store();
    let client = ApiClient::new(&config(&server), &store).unwrap();

    let reply = client
        .send_chat_message(&ChatMessageRequest {
            message: "What suits me?".into(),
            assessment_id: Some(2),
        })
        .await
        .unwrap();
    assert!(reply.bot_message.starts_with("Engineering"));

    let history = client.chat_history(Some(2)).await.unwrap();
    assert_eq!(history.messages.len(), 2);
    assert!(history.messages.iter().all(|m| m.is_results_chat));

    send.assert_async().await;
    scoped.assert_async().await;
}

#[tokio::test]
async fn test_profile_update_and_delete() {
    let mut server = mockito::Server::new_async().await;
    let update = server
        .mock("PATCH", "/api/profile/update/")
        .match_body(Matcher::Json(json!({"name": "Asha K", "phone": "98765"})))
        .with_status(200)
        .with_body(format!(r#"{{"success": true, "user": {USER_JSON}}}"#))
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/api/profile/delete/")
        .with_status(200)
        .with_body(r#"{"success": true, "message": "Account deleted successfully"}"#)
        .create_async()
        .await;

    let store = logged_in_store();
    let client = ApiClient::new(&config(&server), &store).unwrap();

    let updated = client
        .update_profile(&ProfileUpdate {
            name: Some("Asha K".into()),
            phone: Some("98765".into()),
            ..ProfileUpdate::default()
        })
        .await
        .unwrap();
    assert!(updated.success);

    let deleted = client.delete_account().await.unwrap();
    assert!(deleted.success);

    update.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/assessment/history/")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let store = logged_in_store();
    let client = ApiClient::new(&config(&server), &store).unwrap();
    assert!(matches!(client.history().await, Err(ApiError::Decode(_))));
}
