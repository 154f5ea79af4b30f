use std::time::Duration;

use reqwest::StatusCode;
use rstest::rstest;
use serde_json::json;
use taskdesk::api::{HttpTaskApi, TaskApi};
use taskdesk::error::{Cause, Operation};
use taskdesk_shared::{CreateTaskRequest, TaskId, UpdateTaskRequest};
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> HttpTaskApi {
    let base = Url::parse(&format!("{}/api/tasks/", server.uri())).unwrap();
    HttpTaskApi::new(base, None).unwrap()
}

fn task_json(id: u64, title: &str, done: bool) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "description": "",
        "is_completed": done,
        "created_at": "2025-05-01T09:30:00Z"
    })
}

#[rstest]
#[case(None, vec![("page", "2")])]
#[case(Some(false), vec![("page", "2"), ("is_completed", "false")])]
#[case(Some(true), vec![("page", "2"), ("is_completed", "true")])]
#[tokio::test]
async fn list_sends_completion_param_only_when_filtering(
    #[case] completion: Option<bool>,
    #[case] expected: Vec<(&str, &str)>,
) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/all/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 7,
            "next": null,
            "previous": null,
            "results": [task_json(6, "six", false), task_json(7, "seven", true)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = api_for(&server).list_tasks(2, completion).await.unwrap();
    assert_eq!(page.count, 7);
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.total_pages(), 2);

    let requests = server.received_requests().await.unwrap();
    let query: Vec<(String, String)> = requests[0].url.query_pairs().into_owned().collect();
    let expected: Vec<(String, String)> = expected
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    assert_eq!(query, expected);
}

#[tokio::test]
async fn list_failure_is_a_generic_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/all/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = api_for(&server).list_tasks(1, None).await.unwrap_err();
    assert_eq!(err.operation, Operation::List);
    assert_eq!(err.to_string(), "Failed to fetch tasks");
    assert_eq!(err.status_code(), Some(StatusCode::INTERNAL_SERVER_ERROR));
}

#[tokio::test]
async fn undecodable_list_body_is_a_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/all/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
        .mount(&server)
        .await;

    let err = api_for(&server).list_tasks(1, None).await.unwrap_err();
    assert_eq!(err.operation, Operation::List);
}

#[tokio::test]
async fn unreachable_server_is_a_fetch_error() {
    let api = HttpTaskApi::new(Url::parse("http://127.0.0.1:1/api/tasks/").unwrap(), None).unwrap();
    let err = api.list_tasks(1, None).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch tasks");
    assert_eq!(err.status_code(), None);
}

#[tokio::test]
async fn slow_response_times_out_as_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/all/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "count": 0, "results": [] }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let base = Url::parse(&format!("{}/api/tasks/", server.uri())).unwrap();
    let api = HttpTaskApi::new(base, Some(Duration::from_millis(200))).unwrap();
    let err = api.list_tasks(1, None).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch tasks");
    assert!(matches!(err.cause, Cause::Http(ref e) if e.is_timeout()), "{:?}", err.cause);
}

#[tokio::test]
async fn create_posts_title_and_description_only() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tasks/create/"))
        .and(body_json(json!({ "title": "Ship it", "description": "" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(task_json(3, "Ship it", false)))
        .expect(1)
        .mount(&server)
        .await;

    let task = api_for(&server)
        .create_task(CreateTaskRequest {
            title: "Ship it".into(),
            description: String::new(),
        })
        .await
        .unwrap();
    assert_eq!(task.id, TaskId(3));
    assert!(!task.is_completed);
}

#[tokio::test]
async fn rejected_create_is_a_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tasks/create/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "title": ["Title cannot be empty."] })),
        )
        .mount(&server)
        .await;

    let err = api_for(&server)
        .create_task(CreateTaskRequest {
            title: " ".into(),
            description: String::new(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Failed to create task");
}

#[tokio::test]
async fn toggle_patches_only_the_completion_flag() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/tasks/9/update/"))
        .and(body_json(json!({ "is_completed": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_json(9, "nine", true)))
        .expect(1)
        .mount(&server)
        .await;

    let task = api_for(&server)
        .update_task(TaskId(9), UpdateTaskRequest::completion(true))
        .await
        .unwrap();
    assert!(task.is_completed);
}

#[tokio::test]
async fn update_of_missing_task_fails() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/tasks/404/update/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "Not found." })))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .update_task(TaskId(404), UpdateTaskRequest::completion(false))
        .await
        .unwrap_err();
    assert_eq!(err.operation, Operation::Update);
    assert_eq!(err.status_code(), Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn delete_accepts_empty_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/tasks/5/delete/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/tasks/6/delete/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let api = api_for(&server);
    api.delete_task(TaskId(5)).await.unwrap();
    let err = api.delete_task(TaskId(6)).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to delete task");
}

#[tokio::test]
async fn base_without_trailing_slash_keeps_its_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/all/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 0, "results": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let base = Url::parse(&format!("{}/api/tasks", server.uri())).unwrap();
    let api = HttpTaskApi::new(base, None).unwrap();
    assert!(api.base().path().ends_with("/api/tasks/"));
    let page = api.list_tasks(1, None).await.unwrap();
    assert!(page.results.is_empty());
}
