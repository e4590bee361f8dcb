use std::sync::Arc;
use storage::{Store, User};
use tracing::info;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UserPatch};

/// Business logic for user registration and maintenance.
#[derive(Clone)]
pub struct UserService<S: Store> {
    store: Arc<S>,
}

impl<S: Store> UserService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Register a user. Fails with a uniqueness error if the email is
    /// already registered.
    pub async fn add_user(&self, input: CreateUser) -> UserResult<User> {
        let user = self.store.save_user(input.name, input.email).await?;
        info!(user_id = user.id, "User registered");
        Ok(user)
    }

    pub async fn find_by_id(&self, id: i64) -> UserResult<User> {
        self.store
            .find_user(id)
            .await?
            .ok_or(UserError::NotFoundById(id))
    }

    pub async fn find_all(&self) -> UserResult<Vec<User>> {
        Ok(self.store.all_users().await?)
    }

    pub async fn remove_by_id(&self, id: i64) -> UserResult<()> {
        if !self.store.delete_user(id).await? {
            return Err(UserError::NotFoundById(id));
        }
        info!(user_id = id, "User removed");
        Ok(())
    }

    /// Merge only the fields present in the patch; the email uniqueness
    /// check is re-run against other users.
    pub async fn update_user(&self, id: i64, patch: UserPatch) -> UserResult<User> {
        let existing = self.find_by_id(id).await?;
        let merged = patch.apply(existing);
        let updated = self.store.update_user(merged).await?;
        info!(user_id = id, "User updated");
        Ok(updated)
    }
}
