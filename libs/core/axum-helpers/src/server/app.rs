use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::http::security::security_headers;
use axum::{Json, Router, middleware, routing::get};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

/// Path of the generated OpenAPI document.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Creates the application router around the domain routes.
///
/// This sets up:
/// - the routes in `apis`, merged at the root
/// - OpenAPI JSON at [`OPENAPI_JSON_PATH`] and a Scalar page at `/scalar`
/// - request tracing and security headers
/// - a JSON 404 fallback
///
/// Domain routers apply their own state before being passed in.
///
/// # Example
/// ```ignore
/// use axum_helpers::server::create_router;
///
/// let router = create_router::<ApiDoc>(Router::new().nest("/users", users_router));
/// ```
pub fn create_router<T>(apis: Router) -> Router
where
    T: OpenApi + 'static,
{
    let openapi = T::openapi();

    Router::new()
        .merge(Scalar::with_url("/scalar", openapi.clone()))
        .route(OPENAPI_JSON_PATH, get(move || async move { Json(openapi) }))
        .merge(apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
}

/// Production server with signal handling and bounded cleanup.
///
/// Serves until SIGINT/SIGTERM, lets in-flight requests finish, then runs
/// `cleanup` (closing database clients and the like) for at most
/// `shutdown_timeout`. Cleanup also runs when binding or serving fails.
///
/// # Example
/// ```ignore
/// create_production_app(router, &config.server, Duration::from_secs(30), async move {
///     client.shutdown().await;
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = match TcpListener::bind(server_config.address()).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", server_config.address(), e);
            run_cleanup(cleanup, shutdown_timeout).await;
            return Err(e);
        }
    };

    let coordinator = ShutdownCoordinator::default();
    let signals = coordinator.clone();
    tokio::spawn(async move { signals.wait_for_signal().await });

    serve_until_shutdown(listener, router, coordinator, shutdown_timeout, cleanup).await
}

/// Serve on an already bound listener until `coordinator` signals shutdown.
///
/// Cleanup runs after the server has drained, whatever the outcome.
pub async fn serve_until_shutdown<F>(
    listener: TcpListener,
    router: Router,
    coordinator: ShutdownCoordinator,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!("Server starting on {}", addr);
    }

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { coordinator.wait_for_shutdown().await })
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    run_cleanup(cleanup, shutdown_timeout).await;

    serve_result
}

async fn run_cleanup<F>(cleanup: F, shutdown_timeout: Duration)
where
    F: Future<Output = ()>,
{
    info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed successfully"),
        Err(_) => tracing::warn!(
            "Cleanup exceeded timeout of {:?}, forcing shutdown",
            shutdown_timeout
        ),
    }
}
