//! User Service - turns requests into stored records

use std::sync::Arc;
use tracing::instrument;

use crate::error::UserResult;
use crate::models::{User, UserRequest};
use crate::repository::UserRepository;

/// User service
///
/// Stateless apart from the repository handle. Input is stored as received:
/// no trimming, no validation, one insert per call.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a user from the request. Storage errors are returned unchanged.
    #[instrument(skip(self, input))]
    pub async fn create_user(&self, input: UserRequest) -> UserResult<()> {
        let user = User::new(input);
        self.repository.insert(user).await
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
