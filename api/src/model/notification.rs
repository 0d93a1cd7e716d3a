use chrono::{DateTime, Utc};
use kernel::model::id::{HotelBookingId, NotificationId};
use kernel::model::notification::Notification;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub notification_id: NotificationId,
    pub message: String,
    pub hotel_booking_id: Option<HotelBookingId>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(value: Notification) -> Self {
        Self {
            notification_id: value.notification_id,
            message: value.message,
            hotel_booking_id: value.hotel_booking_id,
            is_read: value.is_read,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationsResponse {
    pub items: Vec<NotificationResponse>,
}
