//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use mongodb::{Collection, Database};
use tracing::instrument;

use crate::error::UserResult;
use crate::models::User;
use crate::repository::UserRepository;

/// Collection holding user records
pub const USERS_COLLECTION: &str = "users";

/// MongoDB implementation of the UserRepository
///
/// Holds a `Collection` handle, which shares the client's connection pool and
/// is cheap to clone across request tasks.
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    /// Create a repository over the `users` collection
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let repo = MongoUserRepository::new(client.database("youwont"));
    /// ```
    pub fn new(db: Database) -> Self {
        Self::with_collection(db, USERS_COLLECTION)
    }

    /// Create a repository with a custom collection name
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<User>(collection_name);
        Self { collection }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(collection = %self.collection.name()))]
    async fn insert(&self, user: User) -> UserResult<()> {
        let result = self.collection.insert_one(&user).await?;

        tracing::info!(user_id = %result.inserted_id, "User inserted");
        Ok(())
    }
}
