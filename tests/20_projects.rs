mod common;

use axum::http::{Method, StatusCode};
use common::{app, create_project, id_of, send, send_raw};
use serde_json::json;

#[tokio::test]
async fn test_create_and_list_projects() {
    let app = app();

    let project = create_project(&app, "user1", "Test Project").await;
    assert_eq!(project["name"], "Test Project");
    assert_eq!(project["deleted"], false);
    assert!(project["created_at"].is_string());

    create_project(&app, "user1", "Second").await;

    let (status, list) = send(&app, Method::GET, "/projects/", Some("user1"), None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = list.as_array().unwrap().iter().map(|p| p["name"].clone()).collect();
    assert_eq!(names, vec![json!("Test Project"), json!("Second")]);

    // Both spellings of the collection route answer
    let (status, without_slash) = send(&app, Method::GET, "/projects", Some("user1"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(without_slash, list);
}

#[tokio::test]
async fn test_projects_are_scoped_to_owner() {
    let app = app();
    let project = create_project(&app, "user1", "Private").await;
    let uri = format!("/projects/{}", id_of(&project));

    let (_, list) = send(&app, Method::GET, "/projects/", Some("user2"), None).await;
    assert_eq!(list, json!([]));

    let (status, body) = send(&app, Method::GET, &uri, Some("user2"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Project not found");

    let (status, _) = send(&app, Method::PATCH, &uri, Some("user2"), Some(json!({ "name": "Stolen" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, mine) = send(&app, Method::GET, &uri, Some("user1"), None).await;
    assert_eq!(mine["name"], "Private");
}

#[tokio::test]
async fn test_rename_and_soft_delete_project() {
    let app = app();
    let project = create_project(&app, "user1", "Old Name").await;
    let uri = format!("/projects/{}", id_of(&project));

    let (status, renamed) = send(&app, Method::PATCH, &uri, Some("user1"), Some(json!({ "name": "New Name" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["name"], "New Name");
    assert!(renamed["updated_at"].is_string());

    let (_, deleted) = send(&app, Method::PATCH, &uri, Some("user1"), Some(json!({ "deleted": true }))).await;
    assert_eq!(deleted["deleted"], true);
    assert_eq!(deleted["name"], "New Name");

    let (_, list) = send(&app, Method::GET, "/projects/", Some("user1"), None).await;
    assert_eq!(list, json!([]));

    // Still addressable by id, and restorable
    let (status, _) = send(&app, Method::GET, &uri, Some("user1"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, restored) = send(&app, Method::PATCH, &uri, Some("user1"), Some(json!({ "deleted": false }))).await;
    assert_eq!(restored["deleted"], false);
    let (_, list) = send(&app, Method::GET, "/projects/", Some("user1"), None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_empty_update_returns_project_unchanged() {
    let app = app();
    let project = create_project(&app, "user1", "Stable").await;
    let uri = format!("/projects/{}", id_of(&project));

    let (status, body) = send(&app, Method::PATCH, &uri, Some("user1"), Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, project);
}

#[tokio::test]
async fn test_project_validation_errors() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/projects/", Some("user1"), Some(json!({ "name": "  " }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["field_errors"]["name"].is_string());

    let (status, _) = send(&app, Method::POST, "/projects/", Some("user1"), Some(json!({}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send_raw(&app, Method::POST, "/projects/", "user1", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_JSON");

    let (status, _) = send(&app, Method::GET, "/projects/not-a-uuid", Some("user1"), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, list) = send(&app, Method::GET, "/projects/", Some("user1"), None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_unknown_project_is_not_found() {
    let app = app();
    let uri = format!("/projects/{}", uuid::Uuid::new_v4());

    let (status, body) = send(&app, Method::GET, &uri, Some("user1"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}
