//! Custom extractors for Axum handlers.

mod bound_json;

pub use bound_json::{BindRejection, BoundJson};
