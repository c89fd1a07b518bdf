//! Users Domain
//!
//! Accepts user-creation requests and persists them in MongoDB.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← POST /users, JSON binding
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← UserRequest → User
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← trait + MongoDB implementation ("users" collection)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← UserRequest (DTO), User (domain record)
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{handlers, MongoUserRepository, UserService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("youwont");
//!
//! let repository = MongoUserRepository::new(db);
//! let service = UserService::new(repository);
//!
//! let router = axum::Router::new().nest("/users", handlers::router(service));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{User, UserRequest};
pub use mongodb::{MongoUserRepository, USERS_COLLECTION};
pub use repository::UserRepository;
pub use service::UserService;
