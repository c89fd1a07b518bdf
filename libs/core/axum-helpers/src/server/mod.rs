//! Server infrastructure module.
//!
//! - Router assembly with OpenAPI documentation and common middleware
//! - Health and readiness helpers
//! - Graceful shutdown with a bounded cleanup step
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::app_info;
//!
//! let app = create_router::<ApiDoc>(api_routes).merge(health_router(app_info!()));
//! create_production_app(app, &config.server, Duration::from_secs(30), async move {
//!     client.shutdown().await;
//! })
//! .await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_production_app, create_router, serve_until_shutdown};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::ShutdownCoordinator;
