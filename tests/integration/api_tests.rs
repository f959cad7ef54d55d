//! API integration tests
//!
//! Each test serves the real router on an ephemeral port, backed by
//! in-memory stores.

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use wildtrack_server::{
    api,
    config::{AppConfig, StorageBackend},
    repository::Repository,
    AppState,
};

/// Start a server and return its API base URL
async fn spawn_server(configure: impl FnOnce(&mut AppConfig)) -> String {
    let mut config = AppConfig::default();
    config.storage.backend = StorageBackend::Memory;
    configure(&mut config);

    let app = api::router(AppState::new(config, Repository::in_memory()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("No local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    format!("http://{}/api/v1", addr)
}

async fn post(client: &Client, url: String, body: Value) -> (StatusCode, Value) {
    let response = client
        .post(url)
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    let body = response.json().await.expect("Failed to parse response");
    (status, body)
}

async fn get(client: &Client, url: String) -> (StatusCode, Value) {
    let response = client.get(url).send().await.expect("Failed to send request");
    let status = response.status();
    let body = response.json().await.expect("Failed to parse response");
    (status, body)
}

async fn put(client: &Client, url: String) -> (StatusCode, Value) {
    let response = client.put(url).send().await.expect("Failed to send request");
    let status = response.status();
    let body = response.json().await.expect("Failed to parse response");
    (status, body)
}

fn user_body(email: &str) -> Value {
    json!({
        "email": email,
        "firstName": "A",
        "lastName": "B",
        "password": "secret"
    })
}

#[tokio::test]
async fn test_health_check() {
    let base = spawn_server(|_| {}).await;
    let client = Client::new();

    let (status, body) = get(&client, format!("{}/health", base)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = get(&client, format!("{}/ready", base)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["storage"], "memory");
}

#[tokio::test]
async fn test_register_user_and_duplicate_email() {
    let base = spawn_server(|_| {}).await;
    let client = Client::new();

    let (status, body) = post(&client, format!("{}/users", base), user_body("a@x.com")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "a@x.com");
    assert_eq!(body["firstName"], "A");
    assert!(body.get("passwordHash").is_none());
    assert!(body.get("password").is_none());

    let (status, body) = post(&client, format!("{}/users", base), user_body("a@x.com")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "DuplicateEmail");

    let (status, body) = get(&client, format!("{}/users", base)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_register_user_validation() {
    let base = spawn_server(|_| {}).await;
    let client = Client::new();

    let (status, body) = post(&client, format!("{}/users", base), user_body("not-an-email")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ValidationError");

    let (_, body) = get(&client, format!("{}/users", base)).await;
    assert_eq!(body.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_case_insensitive_email_policy() {
    let base = spawn_server(|config| config.users.email_case_insensitive = true).await;
    let client = Client::new();

    let (status, _) = post(&client, format!("{}/users", base), user_body("Reader@X.com")).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post(&client, format!("{}/users", base), user_body("reader@x.com")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "DuplicateEmail");
}

#[tokio::test]
async fn test_book_catalog_uniqueness() {
    let base = spawn_server(|_| {}).await;
    let client = Client::new();

    let (status, book) = post(
        &client,
        format!("{}/books", base),
        json!({"accessionNumber": "ACC1", "isbn": "ISBN1", "title": "T1", "author": "Perrault"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(book["accessionNumber"], "ACC1");
    assert_eq!(book["author"], "Perrault");

    let (status, body) = post(
        &client,
        format!("{}/books", base),
        json!({"accessionNumber": "ACC1", "isbn": "ISBN2", "title": "T2"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "DuplicateAccessionNumber");

    let (status, body) = post(
        &client,
        format!("{}/books", base),
        json!({"accessionNumber": "ACC2", "isbn": "ISBN1", "title": "T1"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "DuplicateIsbn");

    let (status, body) = get(&client, format!("{}/books/{}", base, book["id"])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "T1");

    let (status, body) = get(&client, format!("{}/books/999", base)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "BookNotFound");
}

#[tokio::test]
async fn test_isbn_duplicates_allowed_when_not_enforced() {
    let base = spawn_server(|config| config.catalog.enforce_unique_isbn = false).await;
    let client = Client::new();

    for accession in ["ACC1", "ACC2"] {
        let (status, _) = post(
            &client,
            format!("{}/books", base),
            json!({"accessionNumber": accession, "isbn": "ISBN1", "title": "T1"}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, first) = get(&client, format!("{}/books", base)).await;
    let (_, second) = get(&client, format!("{}/books", base)).await;
    assert_eq!(first.as_array().map(Vec::len), Some(2));
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_assign_book_to_library_hours() {
    let base = spawn_server(|_| {}).await;
    let client = Client::new();

    let (_, book) = post(
        &client,
        format!("{}/books", base),
        json!({"accessionNumber": "ACC1", "isbn": "ISBN1", "title": "T1"}),
    )
    .await;
    let (status, session) = post(
        &client,
        format!("{}/library-hours", base),
        json!({"idNumber": "2021-0001"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(session["bookTitle"].is_null());

    let (status, body) = put(
        &client,
        format!("{}/books/{}/library-hours/{}", base, book["id"], session["id"]),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bookTitle"], "T1");
    assert!(body["message"].as_str().is_some());

    let (status, reread) = get(&client, format!("{}/library-hours/{}", base, session["id"])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reread["bookTitle"], "T1");

    let (_, mine) = get(&client, format!("{}/library-hours/user/2021-0001", base)).await;
    assert_eq!(mine.as_array().map(Vec::len), Some(1));
    assert_eq!(mine[0]["bookTitle"], "T1");
}

#[tokio::test]
async fn test_assign_with_missing_entities() {
    let base = spawn_server(|_| {}).await;
    let client = Client::new();

    let (_, session) = post(
        &client,
        format!("{}/library-hours", base),
        json!({"idNumber": "2021-0001"}),
    )
    .await;

    let (status, body) = put(
        &client,
        format!("{}/books/404/library-hours/{}", base, session["id"]),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "BookNotFound");

    let (_, reread) = get(&client, format!("{}/library-hours/{}", base, session["id"])).await;
    assert!(reread["bookTitle"].is_null());

    let (_, book) = post(
        &client,
        format!("{}/books", base),
        json!({"accessionNumber": "ACC1", "isbn": "ISBN1", "title": "T1"}),
    )
    .await;
    let (status, body) = put(
        &client,
        format!("{}/books/{}/library-hours/404", base, book["id"]),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "SessionNotFound");
}

#[tokio::test]
async fn test_missing_body_field_is_validation_error() {
    let base = spawn_server(|_| {}).await;
    let client = Client::new();

    let (status, body) = post(
        &client,
        format!("{}/users", base),
        json!({"email": "a@x.com", "firstName": "A", "lastName": "B"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ValidationError");
    assert_eq!(body["code"], 18);
    assert!(body["message"].as_str().is_some_and(|m| m.contains("password")));

    let (status, body) = post(
        &client,
        format!("{}/books", base),
        json!({"accessionNumber": "ACC1", "title": "T1"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ValidationError");

    let (_, users) = get(&client, format!("{}/users", base)).await;
    assert_eq!(users.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_malformed_path_id_is_validation_error() {
    let base = spawn_server(|_| {}).await;
    let client = Client::new();

    let (status, body) = put(&client, format!("{}/books/abc/library-hours/1", base)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ValidationError");

    let (status, body) = get(&client, format!("{}/library-hours/abc", base)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ValidationError");
}
