use serde::Deserialize;
use storage::User;
use utoipa::ToSchema;

/// Payload for registering a user.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
}

/// Partial update: absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UserPatch {
    /// Merge the patch onto an existing user, overwriting only present
    /// fields.
    pub fn apply(&self, mut user: User) -> User {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        user
    }
}
