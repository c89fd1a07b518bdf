use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use axum_helpers::{BoundJson, errors::responses::DatabaseErrorResponse};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{User, UserRequest};
use crate::repository::UserRepository;
use crate::service::UserService;

/// Body of a successful create
pub const USER_CREATED: &str = "User Created";

/// OpenAPI documentation for Users API
#[derive(OpenApi)]
#[openapi(
    paths(create_user),
    components(
        schemas(UserRequest, User),
        responses(DatabaseErrorResponse)
    ),
    tags(
        (name = "Users", description = "User creation endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the users router. Mount it at `/users`.
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", post(create_user))
        .with_state(shared_service)
}

/// Create a new user
#[utoipa::path(
    post,
    path = "",
    tag = "Users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User stored", body = String, example = json!("User Created")),
        (status = 400, description = "Body is not a JSON user", body = String, content_type = "text/plain", example = json!("Bad request")),
        (status = 500, response = DatabaseErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    BoundJson(input): BoundJson<UserRequest>,
) -> UserResult<impl IntoResponse> {
    service.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(USER_CREATED)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UserError;
    use crate::repository::MockUserRepository;
    use axum::{
        body::Body,
        http::{Request, header},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app(repo: MockUserRepository) -> Router {
        Router::new().nest("/users", router(UserService::new(repo)))
    }

    fn post_users(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/users")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_create_user_returns_created() {
        let mut repo = MockUserRepository::new();
        repo.expect_insert().times(1).returning(|_| Ok(()));

        let response = app(repo)
            .oneshot(post_users(r#"{"name":"Alice","email":"alice@example.com"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_string(response).await, "\"User Created\"");
    }

    #[tokio::test]
    async fn test_malformed_body_never_reaches_repository() {
        let mut repo = MockUserRepository::new();
        repo.expect_insert().times(0);

        let response = app(repo).oneshot(post_users("not-json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_string(response).await, "Bad request");
    }

    #[tokio::test]
    async fn test_storage_failure_returns_500_with_detail() {
        let mut repo = MockUserRepository::new();
        repo.expect_insert()
            .times(1)
            .returning(|_| Err(UserError::Storage("no reachable servers".to_string())));

        let response = app(repo)
            .oneshot(post_users(r#"{"name":"Alice","email":"alice@example.com"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["error"], "DATABASE_ERROR");
        assert_eq!(body["message"], "no reachable servers");
    }

    #[tokio::test]
    async fn test_get_is_not_allowed() {
        let repo = MockUserRepository::new();

        let response = app(repo)
            .oneshot(
                Request::builder()
                    .uri("/users")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
