//! Handler tests for the Users domain
//!
//! Drive `POST /users` through the real router, service and binding, with the
//! storage layer replaced by an in-memory or an always-failing repository.

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use domain_users::{User, UserError, UserRepository, UserResult, UserService, handlers};
use http_body_util::BodyExt;
use mongodb::bson::oid::ObjectId;
use serde_json::json;
use std::sync::{Arc, Mutex};
use test_utils::TestDataBuilder;
use tower::ServiceExt; // For oneshot()

/// Stores records in a shared vector and assigns ids the way MongoDB does.
#[derive(Clone, Default)]
struct InMemoryUserRepository {
    users: Arc<Mutex<Vec<User>>>,
}

impl InMemoryUserRepository {
    fn stored(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, mut user: User) -> UserResult<()> {
        user.id = Some(ObjectId::new());
        self.users.lock().unwrap().push(user);
        Ok(())
    }
}

struct FailingUserRepository;

#[async_trait]
impl UserRepository for FailingUserRepository {
    async fn insert(&self, _user: User) -> UserResult<()> {
        Err(UserError::Storage(
            "Server selection timeout: No available servers".to_string(),
        ))
    }
}

fn app<R: UserRepository + 'static>(repo: R) -> Router {
    Router::new().nest("/users", handlers::router(UserService::new(repo)))
}

fn post_users(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn body_bytes(body: Body) -> Vec<u8> {
    body.collect().await.unwrap().to_bytes().to_vec()
}

#[tokio::test]
async fn test_create_user_stores_exact_values() {
    let repo = InMemoryUserRepository::default();
    let app = app(repo.clone());

    let response = app
        .oneshot(post_users(r#"{"name":"Alice","email":"alice@example.com"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: String = serde_json::from_slice(&body_bytes(response.into_body()).await).unwrap();
    assert_eq!(body, "User Created");

    let stored = repo.stored();
    assert_eq!(stored.len(), 1);
    assert!(stored[0].id.is_some());
    assert_eq!(stored[0].name, "Alice");
    assert_eq!(stored[0].email, "alice@example.com");
}

#[tokio::test]
async fn test_empty_object_creates_user_with_empty_fields() {
    let repo = InMemoryUserRepository::default();

    let response = app(repo.clone()).oneshot(post_users("{}")).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let stored = repo.stored();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "");
    assert_eq!(stored[0].email, "");
}

#[tokio::test]
async fn test_malformed_json_returns_400_and_stores_nothing() {
    let repo = InMemoryUserRepository::default();

    let response = app(repo.clone()).oneshot(post_users("not-json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_bytes(response.into_body()).await, b"Bad request");
    assert!(repo.stored().is_empty());
}

#[tokio::test]
async fn test_null_field_binds_as_empty_string() {
    let repo = InMemoryUserRepository::default();

    let response = app(repo.clone())
        .oneshot(post_users(r#"{"name":null,"email":"a@b.c"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let stored = repo.stored();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "");
    assert_eq!(stored[0].email, "a@b.c");
}

#[tokio::test]
async fn test_wrong_field_type_returns_400() {
    let repo = InMemoryUserRepository::default();

    let response = app(repo.clone())
        .oneshot(post_users(r#"{"name":42,"email":"x@example.com"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(repo.stored().is_empty());
}

#[tokio::test]
async fn test_missing_content_type_returns_400() {
    let repo = InMemoryUserRepository::default();

    let request = Request::builder()
        .method("POST")
        .uri("/users")
        .body(Body::from(r#"{"name":"Alice"}"#))
        .unwrap();
    let response = app(repo.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(repo.stored().is_empty());
}

#[tokio::test]
async fn test_storage_failure_returns_500_with_message() {
    let response = app(FailingUserRepository)
        .oneshot(post_users(r#"{"name":"Alice","email":"alice@example.com"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_bytes(response.into_body()).await;
    assert!(!body.is_empty());

    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        error["message"],
        "Server selection timeout: No available servers"
    );
}

#[tokio::test]
async fn test_identical_requests_create_distinct_records() {
    let repo = InMemoryUserRepository::default();
    let builder = TestDataBuilder::from_test_name("identical_requests");
    let payload = json!({
        "name": builder.name("user", "twin"),
        "email": builder.email("twin"),
    })
    .to_string();

    for _ in 0..2 {
        let response = app(repo.clone())
            .oneshot(post_users(payload.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let stored = repo.stored();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].name, stored[1].name);
    assert_eq!(stored[0].email, stored[1].email);
    assert_ne!(stored[0].id, stored[1].id);
}
