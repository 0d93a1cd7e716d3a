use crate::model::id::{HotelBookingId, NotificationId, UserId};
use chrono::{DateTime, Utc};

pub mod event;

#[derive(Debug)]
pub struct Notification {
    pub notification_id: NotificationId,
    pub user_id: UserId,
    pub message: String,
    pub hotel_booking_id: Option<HotelBookingId>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
