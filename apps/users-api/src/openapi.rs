//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users API",
        version = "0.1.0",
        description = "Creates user records in MongoDB"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/users", api = domain_users::ApiDoc)
    ),
    tags(
        (name = "Users", description = "User creation endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_users_path_documented() {
        let doc = ApiDoc::openapi();
        let path = doc.paths.paths.get("/users").expect("/users documented");
        assert!(path.post.is_some());
    }
}
