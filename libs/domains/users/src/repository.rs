use async_trait::async_trait;

use crate::error::UserResult;
use crate::models::User;

/// Persistence for user records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert one record. The store assigns the id.
    async fn insert(&self, user: User) -> UserResult<()>;
}
