use crate::errors::ServerError;
use async_trait::async_trait;
use roster_core::models::User;

/// Persistence port used by the HTTP handlers.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert_user(&self, user: &User) -> Result<(), ServerError>;

    async fn list_users(&self) -> Result<Vec<User>, ServerError>;
}
