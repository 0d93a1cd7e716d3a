use chrono::{DateTime, Utc};
use kernel::model::id::{HotelBookingId, NotificationId, UserId};
use kernel::model::notification::Notification;

#[derive(sqlx::FromRow)]
pub struct NotificationRow {
    pub notification_id: NotificationId,
    pub user_id: UserId,
    pub message: String,
    pub hotel_booking_id: Option<HotelBookingId>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<NotificationRow> for Notification {
    fn from(value: NotificationRow) -> Self {
        let NotificationRow {
            notification_id,
            user_id,
            message,
            hotel_booking_id,
            is_read,
            created_at,
        } = value;
        Notification {
            notification_id,
            user_id,
            message,
            hotel_booking_id,
            is_read,
            created_at,
        }
    }
}
