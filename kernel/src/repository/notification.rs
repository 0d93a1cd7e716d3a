use crate::model::id::UserId;
use crate::model::notification::{event::CreateNotification, Notification};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, event: CreateNotification) -> AppResult<()>;
    async fn find_all_by_user(&self, user_id: UserId) -> AppResult<Vec<Notification>>;
}
