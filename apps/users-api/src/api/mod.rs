//! HTTP routes of the users API

pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Routes served at the root: `/users` and `/ready`.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/users", users::router(state))
        .merge(health::router(state.clone()))
}
