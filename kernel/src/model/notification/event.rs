use crate::model::id::{HotelBookingId, UserId};
use derive_new::new;

#[derive(new)]
pub struct CreateNotification {
    pub user_id: UserId,
    pub message: String,
    pub hotel_booking_id: Option<HotelBookingId>,
}
