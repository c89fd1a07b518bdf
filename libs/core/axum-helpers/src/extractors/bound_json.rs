//! JSON extractor whose every failure is a plain-text `400 Bad Request`.

use crate::errors::ErrorCode;
use axum::{
    extract::{FromRequest, Json, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// Body returned when a request cannot be bound.
pub const BAD_REQUEST_BODY: &str = "Bad request";

/// JSON body extractor with a uniform rejection.
///
/// Axum's `Json` answers 400, 415 or 422 depending on what went wrong. Services
/// that only promise "the body binds or it doesn't" use this instead: syntax
/// errors, shape mismatches, and a missing or wrong `Content-Type` all become
/// `400` with the body `Bad request`. No validation happens beyond
/// deserialization.
///
/// Request headers are logged at `debug` before binding.
///
/// # Example
/// ```ignore
/// use axum_helpers::BoundJson;
///
/// async fn create(BoundJson(payload): BoundJson<CreateThing>) -> StatusCode {
///     StatusCode::CREATED
/// }
/// ```
pub struct BoundJson<T>(pub T);

/// Rejection for [`BoundJson`], wrapping the underlying cause for logs.
#[derive(Debug)]
pub struct BindRejection(pub JsonRejection);

impl IntoResponse for BindRejection {
    fn into_response(self) -> Response {
        tracing::warn!(
            error_code = ErrorCode::InvalidJson.code(),
            status = %self.0.status(),
            "Request body rejected: {}",
            self.0.body_text()
        );
        (StatusCode::BAD_REQUEST, BAD_REQUEST_BODY).into_response()
    }
}

impl<T, S> FromRequest<S> for BoundJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BindRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        tracing::debug!(
            method = %req.method(),
            uri = %req.uri(),
            headers = ?req.headers(),
            "Binding request body"
        );

        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(BindRejection)?;

        Ok(BoundJson(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request as HttpRequest, header},
        routing::post,
    };
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Payload {
        #[serde(default)]
        name: String,
    }

    async fn echo(BoundJson(payload): BoundJson<Payload>) -> String {
        payload.name
    }

    async fn send(content_type: Option<&str>, body: &'static str) -> (StatusCode, String) {
        let app = Router::new().route("/", post(echo));
        let mut request = HttpRequest::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        let response = app
            .oneshot(request.body(Body::from(body)).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_binds_valid_json() {
        let (status, body) = send(Some("application/json"), r#"{"name":"Alice"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Alice");
    }

    #[tokio::test]
    async fn test_syntax_error_is_bad_request() {
        let (status, body) = send(Some("application/json"), "not-json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, BAD_REQUEST_BODY);
    }

    #[tokio::test]
    async fn test_shape_mismatch_is_bad_request_not_422() {
        let (status, body) = send(Some("application/json"), r#"{"name":42}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, BAD_REQUEST_BODY);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request_not_415() {
        let (status, _) = send(None, r#"{"name":"Alice"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(Some("text/plain"), r#"{"name":"Alice"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
