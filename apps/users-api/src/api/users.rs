use axum::Router;
use domain_users::{MongoUserRepository, UserService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoUserRepository::new(state.db.clone());
    let service = UserService::new(repository);
    handlers::router(service)
}
