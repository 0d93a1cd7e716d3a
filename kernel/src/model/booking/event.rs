use crate::model::booking::BookingStatus;
use crate::model::date_range::DateRange;
use crate::model::id::{HotelBookingId, ItineraryId, RoomTypeId, UserId};
use derive_new::new;

#[derive(new)]
pub struct CreateHotelBooking {
    pub room_type_id: RoomTypeId,
    pub user_id: UserId,
    pub itinerary_id: Option<ItineraryId>,
    pub stay: DateRange,
    pub status: BookingStatus,
}

#[derive(new)]
pub struct CancelHotelBooking {
    pub hotel_booking_id: HotelBookingId,
    pub requested_user: UserId,
}
