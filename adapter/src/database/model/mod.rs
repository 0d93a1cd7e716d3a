pub mod flight_booking;
pub mod hotel_booking;
pub mod itinerary;
pub mod notification;
pub mod room_type;
pub mod user;
