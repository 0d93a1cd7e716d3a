pub mod auth;
pub mod booking;
pub mod health;
pub mod itinerary;
pub mod notification;
pub mod room_type;
pub mod v1;
