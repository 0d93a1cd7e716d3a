use crate::database::{model::notification::NotificationRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::id::UserId;
use kernel::model::notification::{event::CreateNotification, Notification};
use kernel::repository::notification::NotificationRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct NotificationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl NotificationRepository for NotificationRepositoryImpl {
    async fn create(&self, event: CreateNotification) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                INSERT INTO notifications (user_id, message, hotel_booking_id)
                VALUES ($1, $2, $3)
            "#,
        )
        .bind(event.user_id)
        .bind(&event.message)
        .bind(event.hotel_booking_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No notification record has been created".into(),
            ));
        }

        Ok(())
    }

    async fn find_all_by_user(&self, user_id: UserId) -> AppResult<Vec<Notification>> {
        let rows: Vec<NotificationRow> = sqlx::query_as(
            r#"
                SELECT
                    notification_id,
                    user_id,
                    message,
                    hotel_booking_id,
                    is_read,
                    created_at
                FROM notifications
                WHERE user_id = $1
                ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Notification::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    const GUEST_ID: &str = "9582f9de-0fd1-4892-b20c-70139a7eb95b";
    const GUEST2_ID: &str = "d33d2a07-cbb5-4b35-8f0a-3452ba2cc67c";

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("common")))]
    async fn test_create_and_list_by_user(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = NotificationRepositoryImpl::new(ConnectionPool::new(pool));
        let user_id = UserId::from_str(GUEST_ID)?;
        let other_id = UserId::from_str(GUEST2_ID)?;

        repo.create(CreateNotification::new(
            user_id,
            "旅程が確定しました。".into(),
            None,
        ))
        .await?;
        repo.create(CreateNotification::new(
            other_id,
            "ご予約はキャンセルになりました。".into(),
            None,
        ))
        .await?;

        let notifications = repo.find_all_by_user(user_id).await?;
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].message, "旅程が確定しました。");
        assert!(!notifications[0].is_read);
        Ok(())
    }
}
