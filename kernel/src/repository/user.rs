use crate::model::{id::UserId, user::User};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_current_user(&self, user_id: UserId) -> AppResult<Option<User>>;
}
